//! Three-phase transition driver.

use crate::action::Transition;
use crate::env::EconomyEnv;
use crate::error::EconomyError;
use crate::state::PlayerState;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs a transition through the three-phase pipeline and returns its outcome.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the player state and return the outcome
/// 3. `post_validate` - Verify postconditions after mutation
///
/// The caller owns rollback: a failure in `apply` or `post_validate` may leave
/// `state` partially mutated.
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut PlayerState,
    env: &EconomyEnv<'_>,
) -> Result<T::Outcome, TransitionPhaseError<EconomyError>>
where
    T: Transition + ?Sized,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let outcome = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(outcome)
}
