mod vat_report_service;

pub use vat_report_service::{VatReportFilters, VatReportService};
