//! Content loaders for reading economy data from files.
//!
//! Each loader has a `load(path)` entry point for files on disk and a
//! `parse(str)` entry point for in-memory content such as the bundled defaults.

pub mod economy;
pub mod factory;
pub mod rarity;

pub use economy::EconomyConfigLoader;
pub use factory::ContentFactory;
pub use rarity::{RarityCatalog, RarityTableLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
