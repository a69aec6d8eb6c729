//! Privilege gate: promo redemption and the admin-only grants.
//!
//! Redeeming the configured promo code is the only way to become admin. Every
//! grant checks `is_admin` in `pre_validate`, so a non-admin request fails
//! with `NotAdmin` before touching state.

use crate::action::{OperationKind, Transition, ledger};
use crate::config::EconomyConfig;
use crate::env::EconomyEnv;
use crate::error::EconomyError;
use crate::state::{InventoryItem, PlayerState, item_display_name};

fn require_admin(state: &PlayerState) -> Result<(), EconomyError> {
    if state.is_admin {
        Ok(())
    } else {
        Err(EconomyError::not_admin(state.nonce))
    }
}

/// Result of a promo redemption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromoOutcome {
    /// True if the player was already admin before this redemption.
    pub already_admin: bool,
}

/// Redeems a promo code; the configured code grants admin status.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedeemPromo {
    pub code: String,
}

impl RedeemPromo {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Transition for RedeemPromo {
    type Outcome = PromoOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::RedeemPromo
    }

    fn pre_validate(&self, state: &PlayerState, env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        if env.config().promo_matches(&self.code) {
            Ok(())
        } else {
            Err(EconomyError::invalid_code(state.nonce))
        }
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let already_admin = state.is_admin;
        state.is_admin = true;
        Ok(PromoOutcome { already_admin })
    }
}

/// What an admin grant changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrantOutcome {
    Currency { amount: u64, balance: u64 },
    ClickPower { amount: u64, click_power: u64 },
    Item { item: InventoryItem },
    Reset,
}

/// Adds the configured currency grant to the balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrantCurrency;

impl Transition for GrantCurrency {
    type Outcome = GrantOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::GrantCurrency
    }

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        require_admin(state)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let amount = env.config().admin_currency_grant;
        let balance = ledger::credit(state, amount);
        Ok(GrantOutcome::Currency { amount, balance })
    }
}

/// Adds the configured click-power grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrantClickPower;

impl Transition for GrantClickPower {
    type Outcome = GrantOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::GrantClickPower
    }

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        require_admin(state)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let amount = env.config().admin_click_power_grant;
        state.click_power = state.click_power.saturating_add(amount);
        Ok(GrantOutcome::ClickPower {
            amount,
            click_power: state.click_power,
        })
    }
}

/// Appends a top-tier item at its maximum cps, already marked as mutated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrantItem;

impl Transition for GrantItem {
    type Outcome = GrantOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::GrantItem
    }

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        require_admin(state)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        let tier = env.table().highest();
        let id = state.allocate_item_id();
        let item = InventoryItem::new(
            id,
            tier.id.clone(),
            tier.cps_max,
            item_display_name(&tier.display_name, EconomyConfig::MAX_SERIAL),
        )
        .with_mutated(true);
        state.inventory.push(item.clone());
        Ok(GrantOutcome::Item { item })
    }
}

/// Wipes progress: balance, click power and inventory.
///
/// Admin status and the click-guard record survive the reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetProgress;

impl Transition for ResetProgress {
    type Outcome = GrantOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::ResetProgress
    }

    fn pre_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        require_admin(state)
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        _env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        state.balance = 0;
        state.click_power = EconomyConfig::STARTING_CLICK_POWER;
        state.inventory.clear();
        Ok(GrantOutcome::Reset)
    }

    fn post_validate(&self, state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        debug_assert_eq!(state.total_cps(), 0);
        Ok(())
    }
}
