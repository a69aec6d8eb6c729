//! Session runtime for the clicker economy.
//!
//! This crate wires the deterministic engine from `clicker-core` into a
//! per-player session: one worker task owns the player state, a topic-based
//! event bus fans notifications out to the UI, and a cloneable
//! [`RuntimeHandle`] turns every economy operation into an async call.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{AdminOp, Result, RuntimeError, RuntimeHandle, SessionSnapshot};
pub use events::{Event, EventBus, GuardEvent, LedgerEvent, LootEvent, PrivilegeEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
