mod vat_settings_repository;

pub use vat_settings_repository::{MySqlVatSettingsRepository, VatSettingsRepository};
