//! Rarity table loader.

use std::path::Path;

use clicker_core::{RarityTable, RarityTier};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Rarity catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityCatalog {
    pub tiers: Vec<RarityTier>,
}

/// Loader for the rarity table from RON files.
pub struct RarityTableLoader;

impl RarityTableLoader {
    /// Load a rarity table from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a RarityCatalog
    ///
    /// # Returns
    ///
    /// Returns a validated RarityTable.
    pub fn load(path: &Path) -> LoadResult<RarityTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rarity table {}: {}", path.display(), e))
    }

    /// Parse and validate a rarity table from RON text.
    pub fn parse(content: &str) -> LoadResult<RarityTable> {
        let catalog: RarityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rarity table RON: {}", e))?;

        let table = RarityTable::new(catalog.tiers)?;
        Ok(table)
    }
}
