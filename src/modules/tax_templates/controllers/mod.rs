mod tax_template_controller;

pub use tax_template_controller::configure;
