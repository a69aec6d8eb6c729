//! Mutation: a paid, one-shot attempt to push an item up one rarity tier.
//!
//! Like loot, mutation is split into a paying half ([`BeginMutation`]) and a
//! resolving half ([`ResolveMutation`]). Whatever the coin says, the item ends
//! up flagged as mutated and can never be mutated again.

use crate::action::loot::draw_reward;
use crate::action::{OperationKind, Transition, ledger};
use crate::env::{EconomyEnv, TierId};
use crate::error::EconomyError;
use crate::state::{InventoryItem, ItemId, PlayerState};

/// RNG stream id for mutation draws.
pub(crate) const MUTATION_STREAM: u32 = 2;

const DRAW_COIN: u32 = 0;

/// Proof that a mutation on `item` was paid for and awaits resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingMutation {
    item: ItemId,
    price: u64,
}

impl PendingMutation {
    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

/// Pays for a mutation attempt on one owned item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeginMutation {
    pub item: ItemId,
}

impl BeginMutation {
    pub fn new(item: ItemId) -> Self {
        Self { item }
    }
}

impl Transition for BeginMutation {
    type Outcome = PendingMutation;

    fn kind(&self) -> OperationKind {
        OperationKind::Mutate
    }

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        let item = state
            .item(self.item)
            .ok_or_else(|| EconomyError::not_found(self.item, state.nonce))?;
        if item.mutated {
            return Err(EconomyError::already_mutated(self.item, state.nonce));
        }
        if env.table().get(&item.tier).is_none() {
            return Err(EconomyError::unknown_tier(
                item.tier.clone(),
                self.item,
                state.nonce,
            ));
        }
        ledger::require_funds(state, env.config().mutation_price)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let price = env.config().mutation_price;
        ledger::debit(state, price)?;
        Ok(PendingMutation {
            item: self.item,
            price,
        })
    }
}

/// How a resolved mutation turned out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationResult {
    /// The item advanced one tier and received a freshly drawn cps and name.
    Upgraded {
        from: TierId,
        to: TierId,
        previous_cps: u64,
    },
    /// The coin came up short; the item keeps its tier and cps.
    Failed,
    /// The coin succeeded but the item already sits in the highest tier.
    TopTier,
}

impl MutationResult {
    pub fn is_upgrade(&self) -> bool {
        matches!(self, Self::Upgraded { .. })
    }
}

/// Result of a resolved mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationOutcome {
    pub result: MutationResult,
    /// The item as it stands after resolution.
    pub item: InventoryItem,
    pub total_cps: u64,
}

/// Flips the mutation coin for a paid attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveMutation {
    pending: PendingMutation,
}

impl ResolveMutation {
    pub fn new(pending: PendingMutation) -> Self {
        Self { pending }
    }
}

impl Transition for ResolveMutation {
    type Outcome = MutationOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::ResolveMutation
    }

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        let id = self.pending.item;
        match state.item(id) {
            None => Err(EconomyError::not_found(id, state.nonce)),
            Some(item) if item.mutated => Err(EconomyError::already_mutated(id, state.nonce)),
            Some(_) => Ok(()),
        }
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let id = self.pending.item;
        let current_tier = state
            .item(id)
            .map(|item| item.tier.clone())
            .ok_or_else(|| EconomyError::not_found(id, state.nonce))?;

        let success = env.rng().chance(
            env.seed_for(state, MUTATION_STREAM, DRAW_COIN),
            env.config().mutation_success_percent,
        );

        let upgrade = if success {
            env.table()
                .next_tier(&current_tier)
                .map(|next| (next, draw_reward(state, env, next, MUTATION_STREAM)))
        } else {
            None
        };

        let nonce = state.nonce;
        let item = state
            .item_mut(id)
            .ok_or_else(|| EconomyError::not_found(id, nonce))?;

        let result = match upgrade {
            Some((next, (cps, display_name))) => {
                let previous_cps = item.cps;
                item.tier = next.id.clone();
                item.cps = cps;
                item.display_name = display_name;
                MutationResult::Upgraded {
                    from: current_tier,
                    to: next.id.clone(),
                    previous_cps,
                }
            }
            None if success => MutationResult::TopTier,
            None => MutationResult::Failed,
        };
        item.mutated = true;
        let item = item.clone();

        state.advance_nonce();

        Ok(MutationOutcome {
            result,
            item,
            total_cps: state.total_cps(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedRng, Fixture};

    fn seeded(tier: &str, cps: u64) -> (PlayerState, ItemId) {
        let mut state = PlayerState::default();
        let id = state.allocate_item_id();
        state
            .inventory
            .push(InventoryItem::new(id, TierId::from(tier), cps, "Seed NFT #1"));
        state.balance = 500;
        (state, id)
    }

    fn mutate(
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
        item: ItemId,
    ) -> Result<MutationOutcome, EconomyError> {
        let begin = BeginMutation::new(item);
        begin.pre_validate(state, env)?;
        let pending = begin.apply(state, env)?;
        let resolve = ResolveMutation::new(pending);
        resolve.pre_validate(state, env)?;
        resolve.apply(state, env)
    }

    #[test]
    fn successful_coin_advances_one_tier() {
        let fixture = Fixture::with_rng(FixedRng(0));
        let (mut state, id) = seeded("rare", 20);

        let outcome = mutate(&mut state, &fixture.env(), id).unwrap();

        assert_eq!(
            outcome.result,
            MutationResult::Upgraded {
                from: TierId::from("rare"),
                to: TierId::from("epic"),
                previous_cps: 20,
            }
        );
        assert_eq!(outcome.item.tier.as_str(), "epic");
        assert_eq!(outcome.item.cps, 30);
        assert_eq!(outcome.item.display_name, "Epic NFT #0");
        assert!(outcome.item.mutated);
        assert_eq!(state.balance, 0);
        assert_eq!(outcome.total_cps, 30);
    }

    #[test]
    fn failed_coin_only_marks_item() {
        let fixture = Fixture::with_rng(FixedRng(u32::MAX));
        let (mut state, id) = seeded("rare", 20);

        let outcome = mutate(&mut state, &fixture.env(), id).unwrap();

        assert_eq!(outcome.result, MutationResult::Failed);
        assert_eq!(outcome.item.tier.as_str(), "rare");
        assert_eq!(outcome.item.cps, 20);
        assert_eq!(outcome.item.display_name, "Seed NFT #1");
        assert!(outcome.item.mutated);
        assert_eq!(state.balance, 0);
    }

    #[test]
    fn top_tier_success_keeps_item() {
        let fixture = Fixture::with_rng(FixedRng(0));
        let (mut state, id) = seeded("admin", 750);

        let outcome = mutate(&mut state, &fixture.env(), id).unwrap();

        assert_eq!(outcome.result, MutationResult::TopTier);
        assert_eq!(outcome.item.cps, 750);
        assert!(outcome.item.mutated);
    }

    #[test]
    fn second_mutation_is_rejected() {
        let fixture = Fixture::default();
        let (mut state, id) = seeded("common", 3);
        state.balance = 1_000;
        let env = fixture.env();

        mutate(&mut state, &env, id).unwrap();
        let balance = state.balance;

        let error = BeginMutation::new(id).pre_validate(&state, &env).unwrap_err();

        assert!(matches!(error, EconomyError::AlreadyMutated { item, .. } if item == id));
        assert_eq!(state.balance, balance);
    }

    #[test]
    fn validation_order_reports_missing_item_first() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.balance = 0;

        let error = BeginMutation::new(ItemId(42))
            .pre_validate(&state, &fixture.env())
            .unwrap_err();

        assert!(matches!(error, EconomyError::NotFound { .. }));
    }

    #[test]
    fn insufficient_funds_checked_after_item() {
        let fixture = Fixture::default();
        let (mut state, id) = seeded("common", 3);
        state.balance = 499;

        let error = BeginMutation::new(id)
            .pre_validate(&state, &fixture.env())
            .unwrap_err();

        assert!(matches!(
            error,
            EconomyError::InsufficientFunds {
                required: 500,
                available: 499,
                ..
            }
        ));
    }

    #[test]
    fn unknown_tier_is_rejected_before_payment() {
        let fixture = Fixture::default();
        let (state, id) = seeded("mythic", 3);

        let error = BeginMutation::new(id)
            .pre_validate(&state, &fixture.env())
            .unwrap_err();

        assert!(matches!(error, EconomyError::UnknownTier { .. }));
    }
}
