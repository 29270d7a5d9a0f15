use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::Result;
use crate::modules::forms::models::{SharedItemForm, TAXES_FIELD};
use crate::modules::forms::services::field_events::FieldObserver;
use crate::modules::items::models::ItemTaxRow;
use crate::modules::tax_templates::repositories::TaxTemplateReader;

/// What a sync pass did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Reference was empty: table cleared without a template read.
    Cleared,
    /// Template found: table now holds exactly its rows (count given).
    Applied(usize),
    /// Template not found: table left untouched.
    TemplateMissing,
    /// A newer trigger fired while the read was in flight; the response
    /// was discarded.
    Superseded,
}

/// Keeps an item form's tax table consistent with its selected tax template.
///
/// Every trigger takes a ticket from `seq`, including the clear path. A
/// template response is applied only while its ticket is still the latest,
/// so a slow read cannot clobber a newer selection or a clear.
pub struct TaxTemplateSync {
    templates: Arc<dyn TaxTemplateReader>,
    seq: AtomicU64,
}

impl TaxTemplateSync {
    pub fn new(templates: Arc<dyn TaxTemplateReader>) -> Self {
        Self {
            templates,
            seq: AtomicU64::new(0),
        }
    }

    /// Run one sync pass against the form's current `tax_template` value.
    ///
    /// With an empty reference the table is cleared synchronously and no
    /// read is issued. With a reference, the named template is fetched and
    /// its rows replace the table in original order, copied field for
    /// field. A missing template leaves the table as it was.
    pub async fn sync(&self, form: &SharedItemForm) -> Result<SyncOutcome> {
        let selected = { form.lock().await.doc().tax_template.clone() };
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(template_name) = selected.filter(|name| !name.is_empty()) else {
            let mut form = form.lock().await;
            form.clear_table();
            form.refresh_field(TAXES_FIELD);
            return Ok(SyncOutcome::Cleared);
        };

        let template = self.templates.find_by_name(&template_name).await?;

        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!(
                template = %template_name,
                "Discarding superseded tax template response"
            );
            return Ok(SyncOutcome::Superseded);
        }

        let Some(template) = template else {
            warn!(
                template = %template_name,
                "Tax template not found, leaving tax table unchanged"
            );
            return Ok(SyncOutcome::TemplateMissing);
        };

        let mut form = form.lock().await;
        form.clear_table();
        for row in &template.taxes {
            form.append_tax_row(ItemTaxRow::from(row));
        }
        form.refresh_field(TAXES_FIELD);

        debug!(
            template = %template_name,
            rows = template.taxes.len(),
            "Tax table synced from template"
        );
        Ok(SyncOutcome::Applied(template.taxes.len()))
    }
}

#[async_trait]
impl FieldObserver for TaxTemplateSync {
    async fn field_changed(&self, form: &SharedItemForm) -> Result<()> {
        self.sync(form).await.map(|_| ())
    }
}
