mod field_events;
mod tax_template_sync;

pub use field_events::{FieldObserver, ItemFormEvents};
pub use tax_template_sync::{SyncOutcome, TaxTemplateSync};
