//! Economy operations expressed as state transitions.
//!
//! Each submodule owns one component of the engine:
//! - [`guard`]: click cadence checks and the warning/ban escalation
//! - [`ledger`]: balance accounting, passive income and click-power upgrades
//! - [`loot`]: paid weighted-random draws from the rarity table
//! - [`mutation`]: one-shot paid attempts to advance an item one tier
//! - [`privilege`]: promo redemption and admin-only grants
pub mod guard;
pub mod ledger;
pub mod loot;
pub mod mutation;
pub mod privilege;

mod kind;
mod transition;

pub use guard::{ClickOutcome, GuardVerdict, RegisterClick};
pub use kind::OperationKind;
pub use ledger::{Credit, Debit, LedgerOutcome, PassiveTick, PurchaseUpgrade, UpgradeOutcome};
pub use loot::{BeginCase, LootOutcome, PendingCase, ResolveCase};
pub use mutation::{BeginMutation, MutationOutcome, MutationResult, PendingMutation, ResolveMutation};
pub use privilege::{
    GrantClickPower, GrantCurrency, GrantItem, GrantOutcome, PromoOutcome, RedeemPromo,
    ResetProgress,
};
pub use transition::Transition;
