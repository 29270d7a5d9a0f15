// VAT settings module

pub mod models;
pub mod repositories;

pub use models::{VatAccountRule, VatSettings};
pub use repositories::VatSettingsRepository;
