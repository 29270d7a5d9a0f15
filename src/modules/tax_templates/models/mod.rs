mod tax_template;

pub use tax_template::{TaxTemplate, TemplateTaxRow};
