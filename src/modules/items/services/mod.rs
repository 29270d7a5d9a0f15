mod item_service;
mod update_hooks;

pub use item_service::ItemService;
pub use update_hooks::{merge_template_taxes, ItemUpdateHook};
