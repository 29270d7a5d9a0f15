// Form runtime: typed in-memory document state plus the field-change
// observers bound to it.

pub mod models;
pub mod services;

pub use models::{ItemForm, SharedItemForm, TAXES_FIELD, TAX_TEMPLATE_FIELD};
pub use services::{FieldObserver, ItemFormEvents, SyncOutcome, TaxTemplateSync};
