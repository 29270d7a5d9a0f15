use std::sync::Arc;

use tokio::sync::Mutex;

use crate::modules::items::models::{Item, ItemTaxRow};

/// Field name of the template reference on the item form.
pub const TAX_TEMPLATE_FIELD: &str = "tax_template";

/// Field name of the child tax table on the item form.
pub const TAXES_FIELD: &str = "taxes";

/// An item form shared with async field observers. The lock is never held
/// across a record read.
pub type SharedItemForm = Arc<Mutex<ItemForm>>;

/// The live, editable in-memory state of an item record bound to a form.
///
/// Mutations here touch form state only; nothing reaches storage until the
/// document goes through the item save path.
#[derive(Debug)]
pub struct ItemForm {
    doc: Item,
    refreshed_fields: Vec<String>,
}

impl ItemForm {
    pub fn new(doc: Item) -> Self {
        Self {
            doc,
            refreshed_fields: Vec::new(),
        }
    }

    pub fn shared(doc: Item) -> SharedItemForm {
        Arc::new(Mutex::new(Self::new(doc)))
    }

    pub fn doc(&self) -> &Item {
        &self.doc
    }

    pub fn into_doc(self) -> Item {
        self.doc
    }

    pub fn set_tax_template(&mut self, value: Option<String>) {
        self.doc.tax_template = value;
    }

    /// Empty the child tax table.
    pub fn clear_table(&mut self) {
        self.doc.taxes.clear();
    }

    /// Append a row at the end of the child tax table.
    pub fn append_tax_row(&mut self, row: ItemTaxRow) {
        self.doc.taxes.push(row);
    }

    /// Record that a field's display should be re-rendered. Rendering is
    /// owned by whatever UI hosts the form; the log is what callers observe.
    pub fn refresh_field(&mut self, field: &str) {
        self.refreshed_fields.push(field.to_string());
    }

    pub fn refreshed_fields(&self) -> &[String] {
        &self.refreshed_fields
    }
}
