use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::tax_templates::models::TemplateTaxRow;

/// A sellable or stockable good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Record name, e.g. "ITM-0001"
    pub name: String,
    pub item_name: Option<String>,
    /// Reference to the tax template whose rows populate `taxes`.
    /// `None` means no template is selected and `taxes` should be empty.
    pub tax_template: Option<String>,
    /// Ordered tax rows, kept in step with the referenced template.
    pub taxes: Vec<ItemTaxRow>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_name: None,
            tax_template: None,
            taxes: Vec::new(),
        }
    }
}

/// One tax rule on an item. Carries exactly the five fields copied from a
/// template row; nothing item-specific is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemTaxRow {
    pub item_tax_template: String,
    pub tax_category: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub minimum_net_rate: Decimal,
    pub maximum_net_rate: Decimal,
}

impl From<&TemplateTaxRow> for ItemTaxRow {
    fn from(row: &TemplateTaxRow) -> Self {
        Self {
            item_tax_template: row.item_tax_template.clone(),
            tax_category: row.tax_category.clone(),
            valid_from: row.valid_from,
            minimum_net_rate: row.minimum_net_rate,
            maximum_net_rate: row.maximum_net_rate,
        }
    }
}
