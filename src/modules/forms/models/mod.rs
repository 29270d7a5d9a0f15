mod item_form;

pub use item_form::{ItemForm, SharedItemForm, TAXES_FIELD, TAX_TEMPLATE_FIELD};
