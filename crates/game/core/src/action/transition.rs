use crate::action::OperationKind;
use crate::env::EconomyEnv;
use crate::error::EconomyError;
use crate::state::PlayerState;

/// Defines how one economy operation mutates player state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the mutation. Hooks receive read-only
/// access to the session's static data via [`EconomyEnv`] and must stay side
/// effect free. The engine restores the prior state if any phase fails.
pub trait Transition {
    /// Data returned to the caller on success (amounts, item, tier names).
    type Outcome;

    /// Which operation this transition implements.
    fn kind(&self) -> OperationKind;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        Ok(())
    }

    /// Applies the operation by mutating the state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut PlayerState,
        env: &EconomyEnv<'_>,
    ) -> Result<Self::Outcome, EconomyError>;

    /// Whether the engine must snapshot the state to undo a failed phase.
    ///
    /// Return `false` only when `apply` and `post_validate` cannot fail once
    /// `apply` has started mutating; the engine then skips the clone.
    fn needs_rollback(&self) -> bool {
        true
    }

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &PlayerState, _env: &EconomyEnv<'_>) -> Result<(), EconomyError> {
        Ok(())
    }
}
