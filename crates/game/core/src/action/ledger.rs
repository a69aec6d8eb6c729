//! Economy ledger: balance accounting, passive income and click-power upgrades.
//!
//! Every spend goes through [`debit`], which checks and subtracts in one step
//! so the balance can never go negative.

use crate::action::{OperationKind, Transition};
use crate::env::EconomyEnv;
use crate::error::EconomyError;
use crate::state::PlayerState;

/// Adds `amount` to the balance (saturating) and returns the new balance.
pub fn credit(state: &mut PlayerState, amount: u64) -> u64 {
    state.balance = state.balance.saturating_add(amount);
    state.balance
}

/// Subtracts `amount` from the balance and returns the new balance.
///
/// # Errors
///
/// Returns `InsufficientFunds` without touching the balance when `amount > balance`.
pub fn debit(state: &mut PlayerState, amount: u64) -> Result<u64, EconomyError> {
    if !state.can_afford(amount) {
        return Err(EconomyError::insufficient_funds(
            amount,
            state.balance,
            state.nonce,
        ));
    }
    state.balance -= amount;
    Ok(state.balance)
}

/// Fails with `InsufficientFunds` unless the balance covers `price`.
pub(crate) fn require_funds(state: &PlayerState, price: u64) -> Result<(), EconomyError> {
    if state.can_afford(price) {
        Ok(())
    } else {
        Err(EconomyError::insufficient_funds(
            price,
            state.balance,
            state.nonce,
        ))
    }
}

/// Balance movement reported by ledger transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerOutcome {
    pub amount: u64,
    pub balance: u64,
}

/// Direct credit of currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Credit {
    pub amount: u64,
}

impl Transition for Credit {
    type Outcome = LedgerOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::Credit
    }

    fn needs_rollback(&self) -> bool {
        false
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let balance = credit(state, self.amount);
        Ok(LedgerOutcome {
            amount: self.amount,
            balance,
        })
    }
}

/// Atomic check-then-subtract of currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debit {
    pub amount: u64,
}

impl Transition for Debit {
    type Outcome = LedgerOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::Debit
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let balance = debit(state, self.amount)?;
        Ok(LedgerOutcome {
            amount: self.amount,
            balance,
        })
    }
}

/// Passive income accrual: adds `total_cps * elapsed_secs` to the balance.
///
/// A no-op when the player owns nothing that produces income.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassiveTick {
    pub elapsed_secs: u64,
}

impl PassiveTick {
    pub fn new(elapsed_secs: u64) -> Self {
        Self { elapsed_secs }
    }
}

impl Default for PassiveTick {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Transition for PassiveTick {
    type Outcome = LedgerOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::PassiveTick
    }

    fn needs_rollback(&self) -> bool {
        false
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let accrued = state.total_cps().saturating_mul(self.elapsed_secs);
        if accrued == 0 {
            return Ok(LedgerOutcome {
                amount: 0,
                balance: state.balance,
            });
        }
        let balance = credit(state, accrued);
        Ok(LedgerOutcome {
            amount: accrued,
            balance,
        })
    }
}

/// Result of a click-power upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOutcome {
    pub price: u64,
    pub click_power: u64,
    pub balance: u64,
}

/// Buys one click-power step for the configured upgrade price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PurchaseUpgrade;

impl Transition for PurchaseUpgrade {
    type Outcome = UpgradeOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::PurchaseUpgrade
    }

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        require_funds(state, env.config().upgrade_price)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let config = env.config();
        let balance = debit(state, config.upgrade_price)?;
        state.click_power = state.click_power.saturating_add(config.click_power_step);

        Ok(UpgradeOutcome {
            price: config.upgrade_price,
            click_power: state.click_power,
            balance,
        })
    }
}
