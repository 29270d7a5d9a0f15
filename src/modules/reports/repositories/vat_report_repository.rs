use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::Result;

/// Which invoice ledger a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceKind {
    Sales,
    Purchase,
}

impl InvoiceKind {
    fn invoice_table(self) -> &'static str {
        match self {
            InvoiceKind::Sales => "sales_invoices",
            InvoiceKind::Purchase => "purchase_invoices",
        }
    }

    fn item_table(self) -> &'static str {
        match self {
            InvoiceKind::Sales => "sales_invoice_items",
            InvoiceKind::Purchase => "purchase_invoice_items",
        }
    }

    fn charge_table(self) -> &'static str {
        match self {
            InvoiceKind::Sales => "sales_taxes_charges",
            InvoiceKind::Purchase => "purchase_taxes_charges",
        }
    }
}

/// A submitted invoice inside the reporting window.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceRef {
    pub name: String,
    pub is_return: bool,
}

/// Net amounts of one invoice item.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceItemAmount {
    pub net_amount: Decimal,
    pub base_net_amount: Option<Decimal>,
}

impl InvoiceItemAmount {
    /// Company-currency amount: the base amount when present, else the
    /// transaction amount.
    pub fn amount(&self) -> Decimal {
        self.base_net_amount.unwrap_or(self.net_amount)
    }
}

/// Read access to the invoice data the VAT report aggregates.
#[async_trait]
pub trait VatReportRepository: Send + Sync {
    /// Submitted invoices for the company posted inside the window.
    async fn submitted_invoices(
        &self,
        kind: InvoiceKind,
        company: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<InvoiceRef>>;

    /// Items of one invoice carrying the given item tax template.
    async fn items_with_template(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        template: &str,
    ) -> Result<Vec<InvoiceItemAmount>>;

    /// All items of one invoice.
    async fn all_items(&self, kind: InvoiceKind, invoice: &str) -> Result<Vec<InvoiceItemAmount>>;

    /// Whether the invoice carries a tax charge on the given account.
    async fn has_tax_charge(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        account: &str,
    ) -> Result<bool>;

    /// Summed tax charged on the account for one invoice, in company
    /// currency when available.
    async fn tax_amount(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        account: &str,
    ) -> Result<Decimal>;
}

pub struct MySqlVatReportRepository {
    pool: MySqlPool,
}

impl MySqlVatReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VatReportRepository for MySqlVatReportRepository {
    async fn submitted_invoices(
        &self,
        kind: InvoiceKind,
        company: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<InvoiceRef>> {
        let sql = format!(
            r#"
            SELECT name, is_return
            FROM {}
            WHERE docstatus = 1 AND company = ? AND posting_date BETWEEN ? AND ?
            ORDER BY posting_date, name
            "#,
            kind.invoice_table()
        );

        let invoices = sqlx::query_as::<_, InvoiceRef>(&sql)
            .bind(company)
            .bind(from_date)
            .bind(to_date)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    async fn items_with_template(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        template: &str,
    ) -> Result<Vec<InvoiceItemAmount>> {
        let sql = format!(
            r#"
            SELECT net_amount, base_net_amount
            FROM {}
            WHERE parent = ? AND item_tax_template = ?
            ORDER BY idx
            "#,
            kind.item_table()
        );

        let items = sqlx::query_as::<_, InvoiceItemAmount>(&sql)
            .bind(invoice)
            .bind(template)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn all_items(&self, kind: InvoiceKind, invoice: &str) -> Result<Vec<InvoiceItemAmount>> {
        let sql = format!(
            r#"
            SELECT net_amount, base_net_amount
            FROM {}
            WHERE parent = ?
            ORDER BY idx
            "#,
            kind.item_table()
        );

        let items = sqlx::query_as::<_, InvoiceItemAmount>(&sql)
            .bind(invoice)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn has_tax_charge(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        account: &str,
    ) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE parent = ? AND account_head = ?",
            kind.charge_table()
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(invoice)
            .bind(account)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn tax_amount(
        &self,
        kind: InvoiceKind,
        invoice: &str,
        account: &str,
    ) -> Result<Decimal> {
        let sql = format!(
            r#"
            SELECT COALESCE(SUM(COALESCE(base_tax_amount, tax_amount)), 0)
            FROM {}
            WHERE parent = ? AND account_head = ?
            "#,
            kind.charge_table()
        );

        let total: Decimal = sqlx::query_scalar(&sql)
            .bind(invoice)
            .bind(account)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
