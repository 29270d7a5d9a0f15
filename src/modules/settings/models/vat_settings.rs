use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-company VAT configuration: which tax accounts and item tax
/// templates feed each section of the VAT report, and the currency every
/// report row is stated in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatSettings {
    pub company: String,
    pub currency: String,
    pub sales_accounts: Vec<VatAccountRule>,
    pub purchase_accounts: Vec<VatAccountRule>,
}

/// One configured VAT account: the row title shown on the report, the tax
/// account collected under it, and the item tax template that marks
/// invoice items as belonging to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VatAccountRule {
    pub title: String,
    pub account: String,
    pub item_tax_template: String,
}
