//! Read-only inputs consumed by transitions.
//!
//! The rarity table, economy tuning and RNG never change during a session.
//! [`EconomyEnv`] bundles them so transitions can reach everything they need
//! without coupling to where the data came from.
mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use tables::{RarityTable, RarityTier, TableError, TierId};

use core::fmt;

use crate::config::EconomyConfig;
use crate::state::PlayerState;

/// Aggregates the read-only data required by the transition pipeline.
#[derive(Clone, Copy)]
pub struct EconomyEnv<'a> {
    table: &'a RarityTable,
    config: &'a EconomyConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> EconomyEnv<'a> {
    pub fn new(table: &'a RarityTable, config: &'a EconomyConfig, rng: &'a dyn RngOracle) -> Self {
        Self { table, config, rng }
    }

    pub fn table(&self) -> &'a RarityTable {
        self.table
    }

    pub fn config(&self) -> &'a EconomyConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    /// Seed for draw number `draw` of the current resolution on `stream`.
    pub fn seed_for(&self, state: &PlayerState, stream: u32, draw: u32) -> u64 {
        compute_seed(state.game_seed(), state.nonce, stream, draw)
    }
}

impl fmt::Debug for EconomyEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EconomyEnv")
            .field("tiers", &self.table.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
