//! Deterministic economy rules for the clicker.
//!
//! `clicker-core` defines the canonical rules (ledger, click guard, loot,
//! mutation, privileges) and exposes pure APIs that the runtime drives. All
//! state mutation flows through [`engine::EconomyEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
mod testing;

pub use action::{
    BeginCase, BeginMutation, ClickOutcome, Credit, Debit, GrantClickPower, GrantCurrency,
    GrantItem, GrantOutcome, GuardVerdict, LedgerOutcome, LootOutcome, MutationOutcome,
    MutationResult, OperationKind, PassiveTick, PendingCase, PendingMutation, PromoOutcome,
    PurchaseUpgrade, RedeemPromo, RegisterClick, ResetProgress, ResolveCase, ResolveMutation,
    Transition, UpgradeOutcome,
};
pub use config::EconomyConfig;
pub use engine::{EconomyEngine, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use env::{
    EconomyEnv, PcgRng, RarityTable, RarityTier, RngOracle, TableError, TierId, compute_seed,
};
pub use error::{EconomyError, ErrorContext, ErrorSeverity, GameError};
pub use state::{InventoryItem, ItemId, PlayerState, PlayerView, item_display_name};
