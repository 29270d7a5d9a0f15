use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column type hint for report renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Data,
    Currency,
}

/// One report column definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportColumn {
    pub fieldname: String,
    pub label: String,
    pub fieldtype: ColumnType,
    pub width: u32,
    pub hidden: bool,
}

impl ReportColumn {
    pub fn new(
        fieldname: impl Into<String>,
        label: impl Into<String>,
        fieldtype: ColumnType,
        width: u32,
    ) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: label.into(),
            fieldtype,
            width,
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One output row. Heading and spacer rows carry no amounts; every row
/// carries the company currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatReportRow {
    pub title: String,
    pub amount: Option<Decimal>,
    pub adjustment_amount: Option<Decimal>,
    pub vat_amount: Option<Decimal>,
    pub currency: String,
}

impl VatReportRow {
    pub fn heading(title: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount: None,
            adjustment_amount: None,
            vat_amount: None,
            currency: currency.into(),
        }
    }

    pub fn spacer(currency: impl Into<String>) -> Self {
        Self::heading("", currency)
    }

    pub fn totals(
        title: impl Into<String>,
        amount: Decimal,
        adjustment_amount: Decimal,
        vat_amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount: Some(amount),
            adjustment_amount: Some(adjustment_amount),
            vat_amount: Some(vat_amount),
            currency: currency.into(),
        }
    }
}

/// The assembled VAT report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatReport {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<VatReportRow>,
}
