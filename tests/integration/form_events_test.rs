// Tests for the form event registry: dispatch scoping, ordering, failure
// isolation, and the wired-up tax template sync.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use taxsync::core::{AppError, Result};
use taxsync::modules::forms::models::{ItemForm, SharedItemForm, TAX_TEMPLATE_FIELD};
use taxsync::modules::forms::services::{FieldObserver, ItemFormEvents, TaxTemplateSync};
use taxsync::modules::items::models::Item;
use taxsync::modules::tax_templates::models::{TaxTemplate, TemplateTaxRow};
use taxsync::modules::tax_templates::repositories::TaxTemplateReader;

/// Observer that appends its label to a shared log when fired.
struct RecordingObserver {
    label: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl FieldObserver for RecordingObserver {
    async fn field_changed(&self, _form: &SharedItemForm) -> Result<()> {
        self.log.lock().unwrap().push(self.label);
        Ok(())
    }
}

/// Observer that always fails.
struct FailingObserver;

#[async_trait]
impl FieldObserver for FailingObserver {
    async fn field_changed(&self, _form: &SharedItemForm) -> Result<()> {
        Err(AppError::internal("observer blew up"))
    }
}

struct MemoryTemplates {
    templates: HashMap<String, TaxTemplate>,
}

#[async_trait]
impl TaxTemplateReader for MemoryTemplates {
    async fn find_by_name(&self, name: &str) -> Result<Option<TaxTemplate>> {
        Ok(self.templates.get(name).cloned())
    }
}

fn form() -> SharedItemForm {
    ItemForm::shared(Item::new("ITM-0001"))
}

#[tokio::test]
async fn test_notify_fires_only_observers_of_that_field() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut events = ItemFormEvents::new();
    events.on_field_change(
        "tax_template",
        Arc::new(RecordingObserver {
            label: "tax_template",
            log: log.clone(),
        }),
    );
    events.on_field_change(
        "item_name",
        Arc::new(RecordingObserver {
            label: "item_name",
            log: log.clone(),
        }),
    );

    events.notify("tax_template", &form()).await;

    assert_eq!(*log.lock().unwrap(), ["tax_template"]);
}

#[tokio::test]
async fn test_notify_for_unwatched_field_is_a_no_op() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut events = ItemFormEvents::new();
    events.on_field_change(
        "tax_template",
        Arc::new(RecordingObserver {
            label: "tax_template",
            log: log.clone(),
        }),
    );

    events.notify("description", &form()).await;

    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_observers_fire_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut events = ItemFormEvents::new();
    for label in ["first", "second", "third"] {
        events.on_field_change(
            "tax_template",
            Arc::new(RecordingObserver {
                label,
                log: log.clone(),
            }),
        );
    }

    events.notify("tax_template", &form()).await;

    assert_eq!(*log.lock().unwrap(), ["first", "second", "third"]);
}

#[tokio::test]
async fn test_observer_failure_does_not_stop_later_observers() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut events = ItemFormEvents::new();
    events.on_field_change("tax_template", Arc::new(FailingObserver));
    events.on_field_change(
        "tax_template",
        Arc::new(RecordingObserver {
            label: "after-failure",
            log: log.clone(),
        }),
    );

    events.notify("tax_template", &form()).await;

    assert_eq!(*log.lock().unwrap(), ["after-failure"]);
}

#[tokio::test]
async fn test_registered_sync_observer_populates_the_table() {
    let templates = MemoryTemplates {
        templates: HashMap::from([(
            "TT-001".to_string(),
            TaxTemplate {
                name: "TT-001".to_string(),
                title: None,
                taxes: vec![TemplateTaxRow {
                    item_tax_template: "VAT-5".to_string(),
                    tax_category: Some("Standard".to_string()),
                    valid_from: None,
                    minimum_net_rate: dec!(0),
                    maximum_net_rate: dec!(1000000),
                }],
            },
        )]),
    };

    let mut events = ItemFormEvents::new();
    events.on_field_change(
        TAX_TEMPLATE_FIELD,
        Arc::new(TaxTemplateSync::new(Arc::new(templates))),
    );

    let mut item = Item::new("ITM-0001");
    item.tax_template = Some("TT-001".to_string());
    let form = ItemForm::shared(item);

    events.notify(TAX_TEMPLATE_FIELD, &form).await;

    let form = form.lock().await;
    assert_eq!(form.doc().taxes.len(), 1);
    assert_eq!(form.doc().taxes[0].item_tax_template, "VAT-5");
    assert_eq!(form.refreshed_fields(), ["taxes"]);
}
