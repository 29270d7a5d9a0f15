use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::items::models::{Item, ItemTaxRow};
use crate::modules::tax_templates::models::TaxTemplate;
use crate::modules::tax_templates::repositories::TaxTemplateReader;

/// Append the template rows whose `item_tax_template` the item does not
/// carry yet. Existing rows keep their order and values; appended rows
/// follow in template order. Returns how many rows were appended.
pub fn merge_template_taxes(item: &mut Item, template: &TaxTemplate) -> usize {
    let existing: HashSet<String> = item
        .taxes
        .iter()
        .map(|row| row.item_tax_template.clone())
        .collect();

    let mut appended = 0;
    for row in &template.taxes {
        if !existing.contains(&row.item_tax_template) {
            item.taxes.push(ItemTaxRow::from(row));
            appended += 1;
        }
    }

    appended
}

/// Save-lifecycle hook that re-applies the referenced template's rows to
/// the item before it is persisted.
pub struct ItemUpdateHook {
    templates: Arc<dyn TaxTemplateReader>,
}

impl ItemUpdateHook {
    pub fn new(templates: Arc<dyn TaxTemplateReader>) -> Self {
        Self { templates }
    }

    /// Runs as part of every item save. Without a template reference this
    /// is a no-op and no read is issued; a dangling reference fails the
    /// save.
    pub async fn on_update(&self, item: &mut Item) -> Result<()> {
        let Some(template_name) = item.tax_template.clone().filter(|n| !n.is_empty()) else {
            return Ok(());
        };

        let template = self
            .templates
            .find_by_name(&template_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tax template {}", template_name)))?;

        let appended = merge_template_taxes(item, &template);
        if appended > 0 {
            info!(
                item = %item.name,
                template = %template_name,
                appended,
                "Appended missing tax rows from template"
            );
        }

        Ok(())
    }
}
