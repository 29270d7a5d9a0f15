mod vat_settings;

pub use vat_settings::{VatAccountRule, VatSettings};
