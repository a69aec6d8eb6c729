//! Value types exchanged through [`RuntimeHandle`](super::RuntimeHandle).

use serde::{Deserialize, Serialize};

use clicker_core::{ItemId, OperationKind, PlayerView};

/// Admin-only operations, all gated on a redeemed promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminOp {
    GrantCurrency,
    GrantClickPower,
    GrantItem,
    ResetProgress,
}

impl AdminOp {
    pub fn kind(&self) -> OperationKind {
        match self {
            AdminOp::GrantCurrency => OperationKind::GrantCurrency,
            AdminOp::GrantClickPower => OperationKind::GrantClickPower,
            AdminOp::GrantItem => OperationKind::GrantItem,
            AdminOp::ResetProgress => OperationKind::ResetProgress,
        }
    }
}

/// Read-only view of a session returned by `query_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub username: String,
    /// The player's state without the game seed or nonce.
    pub state: PlayerView,
    pub total_cps: u64,
    /// True while a paid case is waiting for its reveal.
    pub case_pending: bool,
    /// Items with a paid mutation waiting for its coin flip.
    pub mutations_pending: Vec<ItemId>,
}
