//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the player state and executes every economy
//! operation; pending reveals are tracked alongside it.

mod pending;
mod session;

pub use session::{Command, SessionSetup, SessionWorker};
