//! Click guard: detects abnormally fast click cadence and escalates penalties.
//!
//! Strike 1 warns, strike 2 halves the balance (floor), strike 3 bans the
//! player for the rest of the session. A banned player's clicks are dropped
//! without touching state.

use crate::action::{OperationKind, Transition, ledger};
use crate::config::EconomyConfig;
use crate::env::EconomyEnv;
use crate::error::EconomyError;
use crate::state::PlayerState;

/// Guard decision attached to every click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardVerdict {
    /// Cadence looked human (or this was the first click).
    Clean,
    /// Too-fast click recorded as a strike; the click is still credited.
    Warning {
        strike: u32,
        /// Currency removed by the penalty (non-zero only on the confiscation strike).
        confiscated: u64,
    },
    /// This click triggered the ban. It is not credited.
    Banned,
    /// The player was already banned; the click was dropped.
    AlreadyBanned,
}

/// Result of registering one click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickOutcome {
    pub accepted: bool,
    /// Currency credited by this click (the click power, or 0 if rejected).
    pub credited: u64,
    pub verdict: GuardVerdict,
    pub balance: u64,
}

impl ClickOutcome {
    fn rejected(verdict: GuardVerdict, balance: u64) -> Self {
        Self {
            accepted: false,
            credited: 0,
            verdict,
            balance,
        }
    }
}

/// Registers a manual click at a caller-supplied monotonic timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterClick {
    pub now_ms: u64,
}

impl RegisterClick {
    pub fn new(now_ms: u64) -> Self {
        Self { now_ms }
    }
}

impl Transition for RegisterClick {
    type Outcome = ClickOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::RegisterClick
    }

    fn needs_rollback(&self) -> bool {
        false
    }

    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError> {
        if state.banned {
            return Ok(ClickOutcome::rejected(
                GuardVerdict::AlreadyBanned,
                state.balance,
            ));
        }

        let mut verdict = GuardVerdict::Clean;

        // The very first click has nothing to measure against.
        if state.last_click_ms != 0 {
            let delta = self.now_ms.saturating_sub(state.last_click_ms);
            if delta < env.config().min_click_interval_ms {
                state.warning_count = state.warning_count.saturating_add(1);
                let strike = state.warning_count;

                if strike >= EconomyConfig::BAN_STRIKE {
                    // last_click_ms stays frozen; nothing is credited.
                    state.banned = true;
                    return Ok(ClickOutcome::rejected(GuardVerdict::Banned, state.balance));
                }

                let confiscated = if strike == EconomyConfig::CONFISCATION_STRIKE {
                    let before = state.balance;
                    state.balance = before / 2;
                    before - state.balance
                } else {
                    0
                };

                verdict = GuardVerdict::Warning {
                    strike,
                    confiscated,
                };
            }
        }

        state.last_click_ms = self.now_ms;
        let credited = state.click_power;
        let balance = ledger::credit(state, credited);

        Ok(ClickOutcome {
            accepted: true,
            credited,
            verdict,
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn click(state: &mut PlayerState, fixture: &Fixture, now_ms: u64) -> ClickOutcome {
        RegisterClick::new(now_ms)
            .apply(state, &fixture.env())
            .unwrap()
    }

    #[test]
    fn spaced_clicks_credit_click_power() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.click_power = 3;

        for i in 0..20 {
            let outcome = click(&mut state, &fixture, 1_000 + i * 10);
            assert!(outcome.accepted);
            assert_eq!(outcome.verdict, GuardVerdict::Clean);
        }

        assert_eq!(state.balance, 60);
        assert_eq!(state.warning_count, 0);
    }

    #[test]
    fn first_click_skips_cadence_check() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();

        let outcome = click(&mut state, &fixture, 3);

        assert_eq!(outcome.verdict, GuardVerdict::Clean);
        assert_eq!(state.last_click_ms, 3);
        assert_eq!(state.balance, 1);
    }

    #[test]
    fn three_fast_clicks_escalate_to_ban() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.last_click_ms = 1_000;
        state.balance = 101;

        let first = click(&mut state, &fixture, 1_005);
        assert_eq!(
            first.verdict,
            GuardVerdict::Warning {
                strike: 1,
                confiscated: 0
            }
        );
        assert!(first.accepted);
        assert_eq!(state.balance, 102);

        let second = click(&mut state, &fixture, 1_009);
        assert_eq!(
            second.verdict,
            GuardVerdict::Warning {
                strike: 2,
                confiscated: 51
            }
        );
        // floor(102 / 2) = 51, then the click itself is credited
        assert_eq!(state.balance, 52);

        let third = click(&mut state, &fixture, 1_010);
        assert_eq!(third.verdict, GuardVerdict::Banned);
        assert!(!third.accepted);
        assert_eq!(third.credited, 0);
        assert!(state.banned);
        assert_eq!(state.balance, 52);
        assert_eq!(state.last_click_ms, 1_009);
    }

    #[test]
    fn banned_player_clicks_are_dropped() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.banned = true;
        state.balance = 10;
        state.last_click_ms = 500;
        let before = state.clone();

        let outcome = click(&mut state, &fixture, 10_000);

        assert_eq!(outcome.verdict, GuardVerdict::AlreadyBanned);
        assert!(!outcome.accepted);
        assert_eq!(state, before);
    }

    #[test]
    fn exactly_min_interval_is_clean() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.last_click_ms = 100;

        let outcome = click(&mut state, &fixture, 110);

        assert_eq!(outcome.verdict, GuardVerdict::Clean);
        assert_eq!(state.warning_count, 0);
    }

    #[test]
    fn odd_balance_halves_with_floor() {
        let fixture = Fixture::default();
        let mut state = PlayerState::default();
        state.last_click_ms = 100;
        state.warning_count = 1;
        state.balance = 7;

        let outcome = click(&mut state, &fixture, 101);

        assert_eq!(
            outcome.verdict,
            GuardVerdict::Warning {
                strike: 2,
                confiscated: 4
            }
        );
        // floor(7 / 2) = 3, plus one for the click
        assert_eq!(state.balance, 4);
    }
}
