//! Data-driven economy content and loaders.
//!
//! This crate houses the static economy data and provides loaders for it:
//! - Rarity table (data-driven via RON)
//! - Economy tuning (data-driven via TOML)
//!
//! Content is consumed by the runtime and never appears in player state.
//! Loaders deserialize straight into clicker-core types through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, EconomyConfigLoader, LoadResult, RarityTableLoader};

/// Bundled default rarity table, as shipped in `data/rarity.ron`.
pub const DEFAULT_RARITY_RON: &str = include_str!("../data/rarity.ron");

/// Bundled default economy tuning, as shipped in `data/economy.toml`.
pub const DEFAULT_ECONOMY_TOML: &str = include_str!("../data/economy.toml");
