mod item;

pub use item::{Item, ItemTaxRow};
