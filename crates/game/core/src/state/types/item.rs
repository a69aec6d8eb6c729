use core::fmt;

use crate::env::TierId;

/// Unique identifier of an inventory item.
///
/// Allocated sequentially per player and never reused, even across a progress reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A collectible owned by the player that produces passive income.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub id: ItemId,
    pub tier: TierId,
    /// Currency generated per second.
    pub cps: u64,
    /// Set once the single mutation attempt has been spent; never cleared.
    pub mutated: bool,
    pub display_name: String,
}

impl InventoryItem {
    pub fn new(id: ItemId, tier: TierId, cps: u64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            tier,
            cps,
            mutated: false,
            display_name: display_name.into(),
        }
    }

    /// Marks the item as already mutated (builder pattern).
    #[must_use]
    pub fn with_mutated(mut self, mutated: bool) -> Self {
        self.mutated = mutated;
        self
    }
}

/// Display name for a drawn item: `"<tier name> NFT #<serial>"`.
pub fn item_display_name(tier_display_name: &str, serial: u32) -> String {
    format!("{tier_display_name} NFT #{serial}")
}
