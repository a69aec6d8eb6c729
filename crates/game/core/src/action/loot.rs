//! Loot resolver: paid, weighted-random draws from the rarity table.
//!
//! Opening a case is split in two transitions so a host can insert a pending
//! window between paying and revealing:
//!
//! 1. [`BeginCase`] debits the case price and yields a [`PendingCase`] token.
//! 2. [`ResolveCase`] consumes the token, rolls a tier and a cps value and
//!    appends the new item to the inventory.
//!
//! Only `BeginCase` can mint a `PendingCase`, so a resolution is always backed
//! by a debit.

use crate::action::{OperationKind, Transition, ledger};
use crate::config::EconomyConfig;
use crate::env::{EconomyEnv, RarityTier};
use crate::error::EconomyError;
use crate::state::{InventoryItem, PlayerState, item_display_name};

/// RNG stream id for loot draws.
pub(crate) const LOOT_STREAM: u32 = 1;

const DRAW_TIER: u32 = 0;
const DRAW_CPS: u32 = 1;
const DRAW_SERIAL: u32 = 2;

/// Proof that a case was paid for and still awaits resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingCase {
    price: u64,
}

impl PendingCase {
    pub fn price(&self) -> u64 {
        self.price
    }
}

/// Pays for a loot case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeginCase;

impl Transition for BeginCase {
    type Outcome = PendingCase;

    fn kind(&self) -> OperationKind {
        OperationKind::OpenCase
    }

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        ledger::require_funds(state, env.config().case_price)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let price = env.config().case_price;
        ledger::debit(state, price)?;
        Ok(PendingCase { price })
    }
}

/// What a resolved case produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootOutcome {
    pub item: InventoryItem,
    pub tier_name: String,
    pub price: u64,
    pub total_cps: u64,
}

/// Reveals a paid case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveCase {
    pending: PendingCase,
}

impl ResolveCase {
    pub fn new(pending: PendingCase) -> Self {
        Self { pending }
    }
}

impl Transition for ResolveCase {
    type Outcome = LootOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::ResolveCase
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let rng = env.rng();
        let roll = rng.percent(env.seed_for(state, LOOT_STREAM, DRAW_TIER));
        let tier = env.table().select(roll);
        let (cps, display_name) = draw_reward(state, env, tier, LOOT_STREAM);

        let id = state.allocate_item_id();
        let item = InventoryItem::new(id, tier.id.clone(), cps, display_name);
        state.inventory.push(item.clone());
        state.advance_nonce();

        Ok(LootOutcome {
            item,
            tier_name: tier.display_name.clone(),
            price: self.pending.price,
            total_cps: state.total_cps(),
        })
    }

    fn post_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        if let Some(item) = state.inventory.last() {
            debug_assert!(
                env.table()
                    .get(&item.tier)
                    .is_some_and(|tier| tier.contains_cps(item.cps)),
                "drawn cps must lie inside the tier range"
            );
        }
        Ok(())
    }
}

/// Draws a cps value inside `tier` and a fresh display name.
///
/// Shared by loot resolution and successful mutations; `stream` keeps the two
/// from reusing the same seeds.
pub(crate) fn draw_reward(
    state: &PlayerState,
    env: &EconomyEnv<'_>,
    tier: &RarityTier,
    stream: u32,
) -> (u64, String) {
    let rng = env.rng();
    let cps = tier.draw_cps(rng.unit(env.seed_for(state, stream, DRAW_CPS)));
    // MAX_SERIAL itself is reserved for admin-granted items.
    let serial = rng.range(
        env.seed_for(state, stream, DRAW_SERIAL),
        0,
        EconomyConfig::MAX_SERIAL - 1,
    );
    (cps, item_display_name(&tier.display_name, serial))
}
