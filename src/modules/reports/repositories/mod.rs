mod vat_report_repository;

pub use vat_report_repository::{
    InvoiceItemAmount, InvoiceKind, InvoiceRef, MySqlVatReportRepository, VatReportRepository,
};
