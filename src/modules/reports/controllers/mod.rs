mod vat_report_controller;

pub use vat_report_controller::configure;
