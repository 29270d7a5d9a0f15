use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::items::models::{Item, ItemTaxRow};

/// Persistence for item records and their child tax rows.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch an item and its ordered tax rows.
    /// Returns `None` when no such record exists.
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>>;

    /// Persist the item head and replace its tax rows.
    async fn save(&self, item: &Item) -> Result<()>;
}

pub struct MySqlItemRepository {
    pool: MySqlPool,
}

impl MySqlItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn replace_tax_rows(
        tx: &mut Transaction<'_, MySql>,
        item: &Item,
    ) -> Result<()> {
        sqlx::query("DELETE FROM item_taxes WHERE parent = ?")
            .bind(&item.name)
            .execute(&mut **tx)
            .await?;

        for (idx, row) in item.taxes.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO item_taxes (
                    parent, idx, item_tax_template, tax_category, valid_from,
                    minimum_net_rate, maximum_net_rate
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.name)
            .bind(idx as i64 + 1)
            .bind(&row.item_tax_template)
            .bind(&row.tax_category)
            .bind(row.valid_from)
            .bind(row.minimum_net_rate)
            .bind(row.maximum_net_rate)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ItemHead {
    name: String,
    item_name: Option<String>,
    tax_template: Option<String>,
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>> {
        let head = sqlx::query_as::<_, ItemHead>(
            "SELECT name, item_name, tax_template FROM items WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        let Some(head) = head else {
            return Ok(None);
        };

        let taxes = sqlx::query_as::<_, ItemTaxRow>(
            r#"
            SELECT item_tax_template, tax_category, valid_from,
                   minimum_net_rate, maximum_net_rate
            FROM item_taxes
            WHERE parent = ?
            ORDER BY idx
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Item {
            name: head.name,
            item_name: head.item_name,
            tax_template: head.tax_template,
            taxes,
        }))
    }

    async fn save(&self, item: &Item) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO items (name, item_name, tax_template)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                item_name = VALUES(item_name),
                tax_template = VALUES(tax_template)
            "#,
        )
        .bind(&item.name)
        .bind(&item.item_name)
        .bind(&item.tax_template)
        .execute(&mut *tx)
        .await?;

        Self::replace_tax_rows(&mut tx, item).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }
}
