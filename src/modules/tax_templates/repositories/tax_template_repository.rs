use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::tax_templates::models::{TaxTemplate, TemplateTaxRow};

/// Read access to tax template records.
///
/// This is the seam the form runtime and the save hooks fetch templates
/// through; tests substitute an in-memory implementation.
#[async_trait]
pub trait TaxTemplateReader: Send + Sync {
    /// Fetch a template and its ordered tax rows.
    /// Returns `None` when no such record exists.
    async fn find_by_name(&self, name: &str) -> Result<Option<TaxTemplate>>;
}

pub struct MySqlTaxTemplateRepository {
    pool: MySqlPool,
}

impl MySqlTaxTemplateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TemplateHead {
    name: String,
    title: Option<String>,
}

#[async_trait]
impl TaxTemplateReader for MySqlTaxTemplateRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<TaxTemplate>> {
        let head = sqlx::query_as::<_, TemplateHead>(
            "SELECT name, title FROM tax_templates WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        let Some(head) = head else {
            return Ok(None);
        };

        let taxes = sqlx::query_as::<_, TemplateTaxRow>(
            r#"
            SELECT item_tax_template, tax_category, valid_from,
                   minimum_net_rate, maximum_net_rate
            FROM tax_template_taxes
            WHERE parent = ?
            ORDER BY idx
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(TaxTemplate {
            name: head.name,
            title: head.title,
            taxes,
        }))
    }
}
