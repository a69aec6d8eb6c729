//! Authoritative player state.
//!
//! [`PlayerState`] is a plain value: transitions receive it by reference and
//! the engine is the only component that mutates it. Runtime layers clone it
//! for queries.
pub mod types;

pub use types::{InventoryItem, ItemId, item_display_name};

use crate::config::EconomyConfig;

/// Canonical snapshot of one player's session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at session start by the host and never modified. Never leaves
    /// the host; callers see a [`PlayerView`] instead.
    game_seed: u64,

    /// Resolution counter; advances once per randomised resolution so each
    /// draw gets a fresh seed.
    pub nonce: u64,

    /// Sequential item id allocator (monotonically increasing).
    next_item_id: u64,

    pub balance: u64,
    /// Currency credited per accepted click. Never decreases except on reset.
    pub click_power: u64,
    /// Owned items in acquisition order.
    pub inventory: Vec<InventoryItem>,
    pub is_admin: bool,

    /// Terminal flag; once set, every click is dropped for the rest of the session.
    pub banned: bool,
    /// Click-guard strikes recorded so far.
    pub warning_count: u32,
    /// Timestamp of the last accepted click; 0 means no click yet.
    pub last_click_ms: u64,
}

impl PlayerState {
    /// Creates a fresh session state with the given game seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
            next_item_id: 1,
            balance: 0,
            click_power: EconomyConfig::STARTING_CLICK_POWER,
            inventory: Vec::new(),
            is_admin: false,
            banned: false,
            warning_count: 0,
            last_click_ms: 0,
        }
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Passive income per second: the sum of every owned item's cps.
    pub fn total_cps(&self) -> u64 {
        sum_cps(&self.inventory)
    }

    /// Projection safe to hand to the player.
    pub fn view(&self) -> PlayerView {
        PlayerView::from(self)
    }

    pub fn can_afford(&self, price: u64) -> bool {
        price <= self.balance
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut InventoryItem> {
        self.inventory.iter_mut().find(|item| item.id == id)
    }

    /// Allocates a new unique ItemId.
    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        id
    }

    /// Advances the resolution nonce after a randomised resolution.
    pub fn advance_nonce(&mut self) {
        self.nonce = self.nonce.wrapping_add(1);
    }
}

/// What a player may see of their own state.
///
/// Omits the game seed, the resolution nonce and the id allocator: with the
/// seed and nonce every upcoming loot roll and mutation coin is computable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub balance: u64,
    pub click_power: u64,
    pub inventory: Vec<InventoryItem>,
    pub is_admin: bool,
    pub banned: bool,
    pub warning_count: u32,
    pub last_click_ms: u64,
}

impl PlayerView {
    pub fn total_cps(&self) -> u64 {
        sum_cps(&self.inventory)
    }
}

impl From<&PlayerState> for PlayerView {
    fn from(state: &PlayerState) -> Self {
        Self {
            balance: state.balance,
            click_power: state.click_power,
            inventory: state.inventory.clone(),
            is_admin: state.is_admin,
            banned: state.banned,
            warning_count: state.warning_count,
            last_click_ms: state.last_click_ms,
        }
    }
}

fn sum_cps(inventory: &[InventoryItem]) -> u64 {
    inventory
        .iter()
        .fold(0u64, |sum, item| sum.saturating_add(item.cps))
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TierId;

    #[test]
    fn fresh_state_matches_session_defaults() {
        let state = PlayerState::with_seed(7);

        assert_eq!(state.balance, 0);
        assert_eq!(state.click_power, 1);
        assert!(state.inventory.is_empty());
        assert!(!state.is_admin);
        assert!(!state.banned);
        assert_eq!(state.warning_count, 0);
        assert_eq!(state.total_cps(), 0);
    }

    #[test]
    fn total_cps_sums_inventory() {
        let mut state = PlayerState::default();
        for cps in [3, 12, 40] {
            let id = state.allocate_item_id();
            state
                .inventory
                .push(InventoryItem::new(id, TierId::from("common"), cps, "x"));
        }

        assert_eq!(state.total_cps(), 55);
    }

    #[test]
    fn view_mirrors_visible_fields() {
        let mut state = PlayerState::with_seed(0xDEAD_BEEF);
        state.balance = 42;
        state.is_admin = true;
        state.advance_nonce();
        let id = state.allocate_item_id();
        state
            .inventory
            .push(InventoryItem::new(id, TierId::from("rare"), 20, "Rare NFT #1"));

        let view = state.view();

        assert_eq!(view.balance, 42);
        assert!(view.is_admin);
        assert_eq!(view.inventory, state.inventory);
        assert_eq!(view.total_cps(), state.total_cps());
        assert_eq!(state.game_seed(), 0xDEAD_BEEF);
    }

    #[test]
    fn item_ids_are_never_reused() {
        let mut state = PlayerState::default();
        let first = state.allocate_item_id();
        let second = state.allocate_item_id();

        assert_ne!(first, second);
        assert!(second > first);
    }
}
