mod tax_template_repository;

pub use tax_template_repository::{MySqlTaxTemplateRepository, TaxTemplateReader};
