//! Atomic execution of economy transitions.
//!
//! The [`EconomyEngine`] is the authoritative reducer for [`PlayerState`]. It
//! drives every operation through the three transition phases and restores
//! the prior state whenever a phase fails, so a rejected operation never
//! leaves a half-applied debit or a dangling item behind.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{
    BeginCase, BeginMutation, ClickOutcome, Credit, Debit, GrantClickPower, GrantCurrency,
    GrantItem, GrantOutcome, LedgerOutcome, LootOutcome, MutationOutcome, PassiveTick,
    PendingCase, PendingMutation, PromoOutcome, PurchaseUpgrade, RedeemPromo, RegisterClick,
    ResetProgress, ResolveCase, ResolveMutation, Transition, UpgradeOutcome,
};
use crate::env::EconomyEnv;
use crate::state::{ItemId, PlayerState};

/// Economy engine bound to one player's state for the duration of a call.
///
/// All state mutations flow through [`execute`](Self::execute):
/// pre_validate → apply → post_validate
///
/// The named helpers are thin wrappers that build the matching transition.
pub struct EconomyEngine<'a> {
    state: &'a mut PlayerState,
    env: EconomyEnv<'a>,
}

impl<'a> EconomyEngine<'a> {
    pub fn new(state: &'a mut PlayerState, env: EconomyEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &PlayerState {
        self.state
    }

    pub fn env(&self) -> EconomyEnv<'a> {
        self.env
    }

    /// Executes a transition atomically.
    ///
    /// On any phase error the state is rolled back to its value before the
    /// call and the error is returned tagged with the operation kind.
    /// Transitions that cannot fail after mutating skip the snapshot.
    pub fn execute<T>(&mut self, transition: &T) -> Result<T::Outcome, ExecuteError>
    where
        T: Transition + ?Sized,
    {
        if !transition.needs_rollback() {
            return transition::drive_transition(transition, self.state, &self.env)
                .map_err(|inner| ExecuteError::new(transition.kind(), inner));
        }

        let snapshot = self.state.clone();
        match transition::drive_transition(transition, self.state, &self.env) {
            Ok(outcome) => Ok(outcome),
            Err(inner) => {
                *self.state = snapshot;
                Err(ExecuteError::new(transition.kind(), inner))
            }
        }
    }

    pub fn register_click(&mut self, now_ms: u64) -> Result<ClickOutcome, ExecuteError> {
        self.execute(&RegisterClick::new(now_ms))
    }

    pub fn credit(&mut self, amount: u64) -> Result<LedgerOutcome, ExecuteError> {
        self.execute(&Credit { amount })
    }

    pub fn debit(&mut self, amount: u64) -> Result<LedgerOutcome, ExecuteError> {
        self.execute(&Debit { amount })
    }

    /// Accrues `elapsed_secs` seconds of passive income.
    pub fn tick(&mut self, elapsed_secs: u64) -> Result<LedgerOutcome, ExecuteError> {
        self.execute(&PassiveTick::new(elapsed_secs))
    }

    pub fn purchase_upgrade(&mut self) -> Result<UpgradeOutcome, ExecuteError> {
        self.execute(&PurchaseUpgrade)
    }

    /// Pays for a case; resolve it later with [`resolve_case`](Self::resolve_case).
    pub fn begin_case(&mut self) -> Result<PendingCase, ExecuteError> {
        self.execute(&BeginCase)
    }

    pub fn resolve_case(&mut self, pending: PendingCase) -> Result<LootOutcome, ExecuteError> {
        self.execute(&ResolveCase::new(pending))
    }

    /// Pays for and resolves a case in one step.
    pub fn open_case(&mut self) -> Result<LootOutcome, ExecuteError> {
        let pending = self.begin_case()?;
        self.resolve_case(pending)
    }

    pub fn begin_mutation(&mut self, item: ItemId) -> Result<PendingMutation, ExecuteError> {
        self.execute(&BeginMutation::new(item))
    }

    pub fn resolve_mutation(
        &mut self,
        pending: PendingMutation,
    ) -> Result<MutationOutcome, ExecuteError> {
        self.execute(&ResolveMutation::new(pending))
    }

    /// Pays for and resolves a mutation in one step.
    pub fn mutate(&mut self, item: ItemId) -> Result<MutationOutcome, ExecuteError> {
        let pending = self.begin_mutation(item)?;
        self.resolve_mutation(pending)
    }

    pub fn redeem_promo(&mut self, code: &str) -> Result<PromoOutcome, ExecuteError> {
        self.execute(&RedeemPromo::new(code))
    }

    pub fn grant_currency(&mut self) -> Result<GrantOutcome, ExecuteError> {
        self.execute(&GrantCurrency)
    }

    pub fn grant_click_power(&mut self) -> Result<GrantOutcome, ExecuteError> {
        self.execute(&GrantClickPower)
    }

    pub fn grant_item(&mut self) -> Result<GrantOutcome, ExecuteError> {
        self.execute(&GrantItem)
    }

    pub fn reset_progress(&mut self) -> Result<GrantOutcome, ExecuteError> {
        self.execute(&ResetProgress)
    }
}
