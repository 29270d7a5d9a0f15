// Tax templates module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{TaxTemplate, TemplateTaxRow};
pub use repositories::TaxTemplateReader;
