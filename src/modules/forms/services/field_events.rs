use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::core::Result;
use crate::modules::forms::models::SharedItemForm;

/// Observer notified when a watched field on an item form changes.
#[async_trait]
pub trait FieldObserver: Send + Sync {
    async fn field_changed(&self, form: &SharedItemForm) -> Result<()>;
}

/// Dispatch table binding item form fields to their change observers.
///
/// Registration is explicit and instance-scoped; there is no process-wide
/// handler table.
#[derive(Default)]
pub struct ItemFormEvents {
    observers: HashMap<String, Vec<Arc<dyn FieldObserver>>>,
}

impl ItemFormEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for changes of `field`. Observers for the same
    /// field fire in registration order.
    pub fn on_field_change(&mut self, field: &str, observer: Arc<dyn FieldObserver>) {
        self.observers
            .entry(field.to_string())
            .or_default()
            .push(observer);
    }

    /// Dispatch a field change to every observer registered for it.
    ///
    /// An observer failure is logged and does not stop the remaining
    /// observers; the form itself never sees an error.
    pub async fn notify(&self, field: &str, form: &SharedItemForm) {
        let Some(observers) = self.observers.get(field) else {
            return;
        };

        for observer in observers {
            if let Err(err) = observer.field_changed(form).await {
                warn!(field = %field, error = %err, "Field observer failed");
            }
        }
    }
}
