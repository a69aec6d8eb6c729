//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to start and end a session.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use clicker_core::{EconomyConfig, PlayerState, RarityTable};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SessionSetup, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub economy: EconomyConfig,
    /// Delay between paying for a case or mutation and its reveal.
    /// Zero resolves inline.
    pub pending_delay: Duration,
    /// Passive-income period, rounded to the nearest whole second (at least
    /// one). Each tick credits `total_cps` per second it covers.
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed game seed for reproducible sessions; random when `None`.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_PENDING_DELAY: Duration = Duration::from_millis(2_000);
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            pending_delay: Self::DEFAULT_PENDING_DELAY,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// One player's running session.
///
/// Design: Runtime owns the worker task and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    username: String,
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this session
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Subscribe to session events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// End the session (logout).
    ///
    /// The player state is discarded once every outstanding handle is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!("Session for '{}' shut down", self.username);
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    username: Option<String>,
    table: Option<RarityTable>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            username: None,
            table: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Player name for the session (login). Required.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Rarity table to draw from. Defaults to [`RarityTable::default`].
    pub fn rarity_table(mut self, table: RarityTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Build the runtime and start the session worker.
    ///
    /// Fails with [`RuntimeError::EmptyUsername`] when no username, or only
    /// whitespace, was given.
    pub async fn build(self) -> Result<Runtime> {
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(RuntimeError::EmptyUsername)?
            .to_owned();

        let table = self.table.unwrap_or_default();
        if !table.is_balanced() {
            warn!(
                "Rarity weights sum to {} instead of 100; unmatched rolls fall back to '{}'",
                table.total_weight(),
                table.first().id
            );
        }

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            SessionSetup {
                username: username.clone(),
                state: PlayerState::with_seed(seed),
                table,
                economy: self.config.economy,
                pending_delay: self.config.pending_delay,
                tick_interval: self.config.tick_interval,
            },
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        info!("Session started for '{}'", username);

        Ok(Runtime {
            username,
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_username_is_rejected() {
        for name in ["", "   "] {
            let result = Runtime::builder().username(name).build().await;
            assert!(matches!(result, Err(RuntimeError::EmptyUsername)));
        }

        let result = Runtime::builder().build().await;
        assert!(matches!(result, Err(RuntimeError::EmptyUsername)));
    }

    #[tokio::test]
    async fn username_is_trimmed() {
        let runtime = Runtime::builder().username("  ada ").build().await.unwrap();

        assert_eq!(runtime.username(), "ada");
        let snapshot = runtime.handle().query_state().await.unwrap();
        assert_eq!(snapshot.username, "ada");
        assert_eq!(snapshot.state.click_power, 1);

        runtime.shutdown().await.unwrap();
    }
}
