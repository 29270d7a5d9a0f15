// End-to-end tests of the item service over in-memory repositories:
// form dispatch on template selection, the save lifecycle and its hook.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

use taxsync::core::{AppError, Result};
use taxsync::modules::items::models::{Item, ItemTaxRow};
use taxsync::modules::items::repositories::ItemRepository;
use taxsync::modules::items::services::ItemService;
use taxsync::modules::tax_templates::models::{TaxTemplate, TemplateTaxRow};
use taxsync::modules::tax_templates::repositories::TaxTemplateReader;

struct MemoryItems {
    items: Mutex<HashMap<String, Item>>,
}

impl MemoryItems {
    fn new(items: Vec<Item>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items.into_iter().map(|i| (i.name.clone(), i)).collect()),
        })
    }

    async fn stored(&self, name: &str) -> Option<Item> {
        self.items.lock().await.get(name).cloned()
    }
}

#[async_trait]
impl ItemRepository for MemoryItems {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>> {
        Ok(self.items.lock().await.get(name).cloned())
    }

    async fn save(&self, item: &Item) -> Result<()> {
        self.items
            .lock()
            .await
            .insert(item.name.clone(), item.clone());
        Ok(())
    }
}

struct MemoryTemplates {
    templates: HashMap<String, TaxTemplate>,
    reads: AtomicUsize,
}

impl MemoryTemplates {
    fn new(templates: Vec<TaxTemplate>) -> Arc<Self> {
        Arc::new(Self {
            templates: templates
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
            reads: AtomicUsize::new(0),
        })
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaxTemplateReader for MemoryTemplates {
    async fn find_by_name(&self, name: &str) -> Result<Option<TaxTemplate>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.templates.get(name).cloned())
    }
}

fn template_row(key: &str) -> TemplateTaxRow {
    TemplateTaxRow {
        item_tax_template: key.to_string(),
        tax_category: Some("Standard".to_string()),
        valid_from: None,
        minimum_net_rate: dec!(0),
        maximum_net_rate: dec!(1000000),
    }
}

fn vat_template() -> TaxTemplate {
    TaxTemplate {
        name: "TT-001".to_string(),
        title: Some("KSA VAT".to_string()),
        taxes: vec![template_row("VAT-5"), template_row("VAT-15")],
    }
}

fn setup(items: Vec<Item>) -> (ItemService, Arc<MemoryItems>, Arc<MemoryTemplates>) {
    let item_repo = MemoryItems::new(items);
    let template_repo = MemoryTemplates::new(vec![vat_template()]);
    let service = ItemService::new(item_repo.clone(), template_repo.clone());
    (service, item_repo, template_repo)
}

#[tokio::test]
async fn test_selecting_template_populates_and_persists_rows() {
    let (service, items, _) = setup(vec![Item::new("ITM-0001")]);

    let saved = service
        .set_tax_template("ITM-0001", Some("TT-001".to_string()))
        .await
        .unwrap();

    let expected: Vec<ItemTaxRow> = vat_template().taxes.iter().map(ItemTaxRow::from).collect();
    assert_eq!(saved.tax_template.as_deref(), Some("TT-001"));
    assert_eq!(saved.taxes, expected);

    let stored = items.stored("ITM-0001").await.unwrap();
    assert_eq!(stored.taxes, expected);
}

#[tokio::test]
async fn test_clearing_template_empties_rows_without_read() {
    let (service, items, templates) = setup(vec![Item::new("ITM-0001")]);

    service
        .set_tax_template("ITM-0001", Some("TT-001".to_string()))
        .await
        .unwrap();
    let reads_after_select = templates.reads();

    let saved = service.set_tax_template("ITM-0001", None).await.unwrap();

    assert!(saved.tax_template.is_none());
    assert!(saved.taxes.is_empty());
    assert!(items.stored("ITM-0001").await.unwrap().taxes.is_empty());
    // The clear path issues no template read; neither does the save hook
    // once the reference is gone.
    assert_eq!(templates.reads(), reads_after_select);
}

#[tokio::test]
async fn test_save_item_appends_rows_dropped_from_the_table() {
    let (service, items, _) = setup(vec![]);

    let mut item = Item::new("ITM-0002");
    item.tax_template = Some("TT-001".to_string());
    item.taxes.push(ItemTaxRow::from(&template_row("VAT-5")));

    let saved = service.save_item(item).await.unwrap();

    let keys: Vec<&str> = saved
        .taxes
        .iter()
        .map(|row| row.item_tax_template.as_str())
        .collect();
    assert_eq!(keys, ["VAT-5", "VAT-15"]);
    assert_eq!(items.stored("ITM-0002").await.unwrap().taxes, saved.taxes);
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let (service, _, _) = setup(vec![]);

    let err = service
        .set_tax_template("ITM-0404", Some("TT-001".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_dangling_template_reference_fails_the_save() {
    let (service, items, _) = setup(vec![Item::new("ITM-0001")]);

    let err = service
        .set_tax_template("ITM-0001", Some("TT-404".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    // The stored record is untouched by the failed save.
    let stored = items.stored("ITM-0001").await.unwrap();
    assert!(stored.tax_template.is_none());
    assert!(stored.taxes.is_empty());
}
