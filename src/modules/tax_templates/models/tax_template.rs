use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reusable named set of tax-rule rows referenced by items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTemplate {
    /// Record name, e.g. "TT-001"
    pub name: String,
    pub title: Option<String>,
    /// Ordered tax-rule rows. Row order is significant and preserved
    /// wherever the rows are copied.
    pub taxes: Vec<TemplateTaxRow>,
}

impl TaxTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            taxes: Vec::new(),
        }
    }
}

/// A single tax rule inside a template: category, validity date and the
/// net-rate band the rule applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TemplateTaxRow {
    pub item_tax_template: String,
    pub tax_category: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub minimum_net_rate: Decimal,
    pub maximum_net_rate: Decimal,
}
