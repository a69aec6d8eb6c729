//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected economy operations and worker coordination failures so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use clicker_core::{EconomyError, ExecuteError, ItemId, OperationKind};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected the operation; player state is unchanged.
    #[error(transparent)]
    Economy(#[from] ExecuteError),

    #[error("{kind} already in flight{}", item_suffix(.item))]
    OperationInFlight {
        kind: OperationKind,
        item: Option<ItemId>,
    },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// The domain error behind an engine rejection, if that is what this is.
    pub fn economy(&self) -> Option<&EconomyError> {
        match self {
            Self::Economy(error) => Some(error.economy()),
            _ => None,
        }
    }

    pub(crate) fn case_in_flight() -> Self {
        Self::OperationInFlight {
            kind: OperationKind::OpenCase,
            item: None,
        }
    }

    pub(crate) fn mutation_in_flight(item: ItemId) -> Self {
        Self::OperationInFlight {
            kind: OperationKind::Mutate,
            item: Some(item),
        }
    }

    pub(crate) fn reset_in_flight() -> Self {
        Self::OperationInFlight {
            kind: OperationKind::ResetProgress,
            item: None,
        }
    }
}

fn item_suffix(item: &Option<ItemId>) -> String {
    item.map(|id| format!(" for item {id}")).unwrap_or_default()
}
