use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{ColumnType, ReportColumn, VatReport, VatReportRow};
use crate::modules::reports::repositories::{InvoiceKind, VatReportRepository};
use crate::modules::settings::models::VatAccountRule;
use crate::modules::settings::repositories::VatSettingsRepository;

/// Filters for one report run.
#[derive(Debug, Clone, Deserialize)]
pub struct VatReportFilters {
    pub company: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

#[derive(Debug, Default, Clone, Copy)]
struct RuleTotals {
    taxable: Decimal,
    adjustment: Decimal,
    tax: Decimal,
}

/// Builds the per-company VAT summary: a sales section and a purchase
/// section, one row per configured VAT account, plus grand totals.
pub struct VatReportService {
    settings: Arc<dyn VatSettingsRepository>,
    invoices: Arc<dyn VatReportRepository>,
}

impl VatReportService {
    pub fn new(
        settings: Arc<dyn VatSettingsRepository>,
        invoices: Arc<dyn VatReportRepository>,
    ) -> Self {
        Self { settings, invoices }
    }

    /// Report columns: title, taxable amount, adjustment amount, VAT
    /// amount and a hidden currency column.
    pub fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::new("title", "Title", ColumnType::Data, 300),
            ReportColumn::new("amount", "Amount", ColumnType::Currency, 150),
            ReportColumn::new(
                "adjustment_amount",
                "Adjustment",
                ColumnType::Currency,
                150,
            ),
            ReportColumn::new("vat_amount", "VAT Amount", ColumnType::Currency, 150),
            ReportColumn::new("currency", "Currency", ColumnType::Currency, 150).hidden(),
        ]
    }

    pub async fn execute(&self, filters: &VatReportFilters) -> Result<VatReport> {
        if filters.from_date > filters.to_date {
            return Err(AppError::validation(
                "from_date must be on or before to_date",
            ));
        }

        let settings = self
            .settings
            .find_by_company(&filters.company)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("VAT settings for company {}", filters.company))
            })?;

        let currency = settings.currency.as_str();
        let mut rows = Vec::new();

        rows.push(VatReportRow::heading("VAT on Sales", currency));
        self.append_section(
            InvoiceKind::Sales,
            &settings.sales_accounts,
            filters,
            currency,
            &mut rows,
        )
        .await?;

        rows.push(VatReportRow::spacer(currency));

        rows.push(VatReportRow::heading("VAT on Purchases", currency));
        if settings.purchase_accounts.is_empty() {
            rows.push(VatReportRow::totals(
                "No Purchase VAT Settings Configured",
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                currency,
            ));
        }
        self.append_section(
            InvoiceKind::Purchase,
            &settings.purchase_accounts,
            filters,
            currency,
            &mut rows,
        )
        .await?;

        info!(
            company = %filters.company,
            from = %filters.from_date,
            to = %filters.to_date,
            rows = rows.len(),
            "VAT report generated"
        );

        Ok(VatReport {
            columns: Self::columns(),
            rows,
        })
    }

    /// One report section: a row per account rule and a grand-total row.
    async fn append_section(
        &self,
        kind: InvoiceKind,
        rules: &[VatAccountRule],
        filters: &VatReportFilters,
        currency: &str,
        rows: &mut Vec<VatReportRow>,
    ) -> Result<()> {
        let mut grand = RuleTotals::default();

        for rule in rules {
            let totals = self.totals_for_rule(kind, rule, filters).await?;
            rows.push(VatReportRow::totals(
                rule.title.clone(),
                totals.taxable,
                totals.adjustment,
                totals.tax,
                currency,
            ));

            grand.taxable += totals.taxable;
            grand.adjustment += totals.adjustment;
            grand.tax += totals.tax;
        }

        rows.push(VatReportRow::totals(
            "Grand Total",
            grand.taxable,
            grand.adjustment,
            grand.tax,
            currency,
        ));

        Ok(())
    }

    /// Scan the window's invoices for one account rule. Items matching the
    /// rule's template count first; when none match but the invoice
    /// carries a tax charge on the rule's account, all of its items count
    /// instead; an invoice with neither is skipped entirely. Regular
    /// invoices accumulate into the taxable amount, returns into the
    /// adjustment amount, and the rule's VAT adds the invoice's charges on
    /// the account.
    async fn totals_for_rule(
        &self,
        kind: InvoiceKind,
        rule: &VatAccountRule,
        filters: &VatReportFilters,
    ) -> Result<RuleTotals> {
        let mut totals = RuleTotals::default();

        let invoices = self
            .invoices
            .submitted_invoices(kind, &filters.company, filters.from_date, filters.to_date)
            .await?;

        for invoice in invoices {
            let mut items = self
                .invoices
                .items_with_template(kind, &invoice.name, &rule.item_tax_template)
                .await?;

            if items.is_empty()
                && self
                    .invoices
                    .has_tax_charge(kind, &invoice.name, &rule.account)
                    .await?
            {
                items = self.invoices.all_items(kind, &invoice.name).await?;
            }

            if items.is_empty() {
                continue;
            }

            for item in &items {
                if invoice.is_return {
                    totals.adjustment += item.amount();
                } else {
                    totals.taxable += item.amount();
                }
            }

            totals.tax += self
                .invoices
                .tax_amount(kind, &invoice.name, &rule.account)
                .await?;
        }

        Ok(totals)
    }
}
