//! Event types for different topics.
//!
//! These are the notifications a UI renders: guard warnings, loot reveals,
//! mutation results, grants and passive income.

use serde::{Deserialize, Serialize};

use clicker_core::{InventoryItem, ItemId, TierId};

/// Balance movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    ClickCredited { amount: u64, balance: u64 },
    PassiveIncome { amount: u64, balance: u64 },
    UpgradePurchased {
        price: u64,
        click_power: u64,
        balance: u64,
    },
}

/// Case openings and mutation attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootEvent {
    /// A case was paid for; the reveal follows after the pending window.
    CaseOpening { price: u64, balance: u64 },
    LootAcquired {
        item: InventoryItem,
        tier_name: String,
        total_cps: u64,
    },
    MutationStarted { item: ItemId, price: u64, balance: u64 },
    MutationSucceeded {
        item: InventoryItem,
        from: TierId,
        previous_cps: u64,
    },
    /// The attempt was spent without changing tier. `top_tier` is set when the
    /// coin succeeded but there was no higher tier to move to.
    MutationFailed { item: InventoryItem, top_tier: bool },
}

/// Click-guard escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardEvent {
    Warning { strike: u32, confiscated: u64 },
    Banned,
}

/// Promo redemption and admin grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegeEvent {
    AdminGranted,
    CurrencyGranted { amount: u64, balance: u64 },
    ClickPowerGranted { amount: u64, click_power: u64 },
    ItemGranted { item: InventoryItem },
    ProgressReset,
}
