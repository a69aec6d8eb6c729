//! Value types stored inside [`super::PlayerState`].
mod item;

pub use item::{InventoryItem, ItemId, item_display_name};
