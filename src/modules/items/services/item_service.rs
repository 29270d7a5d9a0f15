use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::forms::models::{ItemForm, TAX_TEMPLATE_FIELD};
use crate::modules::forms::services::{ItemFormEvents, TaxTemplateSync};
use crate::modules::items::models::Item;
use crate::modules::items::repositories::ItemRepository;
use crate::modules::items::services::update_hooks::ItemUpdateHook;
use crate::modules::tax_templates::repositories::TaxTemplateReader;

/// Business logic around item records: form sessions and the save
/// lifecycle.
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    update_hook: ItemUpdateHook,
    events: ItemFormEvents,
}

impl ItemService {
    /// Wires the form event registry: the tax template sync observes the
    /// `tax_template` field.
    pub fn new(
        items: Arc<dyn ItemRepository>,
        templates: Arc<dyn TaxTemplateReader>,
    ) -> Self {
        let mut events = ItemFormEvents::new();
        events.on_field_change(
            TAX_TEMPLATE_FIELD,
            Arc::new(TaxTemplateSync::new(templates.clone())),
        );

        Self {
            items,
            update_hook: ItemUpdateHook::new(templates),
            events,
        }
    }

    pub async fn get_item(&self, name: &str) -> Result<Item> {
        self.items
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {}", name)))
    }

    /// Change the item's tax template the way the form does: load the
    /// record into a form, dispatch the field change through the registry,
    /// then save the resulting document.
    pub async fn set_tax_template(
        &self,
        item_name: &str,
        template: Option<String>,
    ) -> Result<Item> {
        let mut item = self.get_item(item_name).await?;
        item.tax_template = template;

        let form = ItemForm::shared(item);
        self.events.notify(TAX_TEMPLATE_FIELD, &form).await;

        let doc = { form.lock().await.doc().clone() };
        self.save_item(doc).await
    }

    /// Persist an item through the save lifecycle: update hooks run first,
    /// then the record is written.
    pub async fn save_item(&self, mut item: Item) -> Result<Item> {
        self.update_hook.on_update(&mut item).await?;
        self.items.save(&item).await?;
        Ok(item)
    }
}
