// Reports module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{VatReport, VatReportRow};
pub use repositories::VatReportRepository;
pub use services::VatReportService;
