//! Error types for the transition pipeline.

use crate::action::OperationKind;
use crate::error::{EconomyError, ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Error surfaced by [`EconomyEngine::execute`](super::EconomyEngine::execute).
///
/// The player state has already been restored when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} {inner}")]
pub struct ExecuteError {
    pub kind: OperationKind,
    pub inner: TransitionPhaseError<EconomyError>,
}

impl ExecuteError {
    pub fn new(kind: OperationKind, inner: TransitionPhaseError<EconomyError>) -> Self {
        Self { kind, inner }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.inner.phase
    }

    /// The domain error that caused the rejection.
    pub fn economy(&self) -> &EconomyError {
        &self.inner.error
    }

    pub fn into_economy(self) -> EconomyError {
        self.inner.error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.inner.error.severity()
    }

    fn context(&self) -> Option<&crate::error::ErrorContext> {
        self.inner.error.context()
    }

    fn error_code(&self) -> &'static str {
        self.inner.error.error_code()
    }
}
