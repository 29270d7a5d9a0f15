mod vat_report;

pub use vat_report::{ColumnType, ReportColumn, VatReport, VatReportRow};
