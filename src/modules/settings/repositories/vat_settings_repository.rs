use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::settings::models::{VatAccountRule, VatSettings};

/// Read access to per-company VAT settings.
#[async_trait]
pub trait VatSettingsRepository: Send + Sync {
    /// Fetch the settings record for a company.
    /// Returns `None` when none is configured.
    async fn find_by_company(&self, company: &str) -> Result<Option<VatSettings>>;
}

pub struct MySqlVatSettingsRepository {
    pool: MySqlPool,
}

impl MySqlVatSettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn account_rules(&self, company: &str, section: &str) -> Result<Vec<VatAccountRule>> {
        let rules = sqlx::query_as::<_, VatAccountRule>(
            r#"
            SELECT title, account, item_tax_template
            FROM vat_settings_accounts
            WHERE company = ? AND section = ?
            ORDER BY idx
            "#,
        )
        .bind(company)
        .bind(section)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }
}

#[derive(sqlx::FromRow)]
struct SettingsHead {
    company: String,
    currency: String,
}

#[async_trait]
impl VatSettingsRepository for MySqlVatSettingsRepository {
    async fn find_by_company(&self, company: &str) -> Result<Option<VatSettings>> {
        let head = sqlx::query_as::<_, SettingsHead>(
            "SELECT company, currency FROM vat_settings WHERE company = ?",
        )
        .bind(company)
        .fetch_optional(&self.pool)
        .await?;

        let Some(head) = head else {
            return Ok(None);
        };

        let sales_accounts = self.account_rules(company, "sales").await?;
        let purchase_accounts = self.account_rules(company, "purchase").await?;

        Ok(Some(VatSettings {
            company: head.company,
            currency: head.currency,
            sales_accounts,
            purchase_accounts,
        }))
    }
}
