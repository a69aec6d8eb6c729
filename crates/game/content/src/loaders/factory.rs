//! Content factory for loading economy data from a directory.

use std::path::{Path, PathBuf};

use clicker_core::{EconomyConfig, RarityTable};

use crate::loaders::{EconomyConfigLoader, LoadResult, RarityTableLoader};

/// Content factory that loads all economy content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rarity.ron
/// └── economy.toml
/// ```
///
/// A missing file falls back to the bundled default; a present but invalid
/// file is an error.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    pub const RARITY_FILE: &'static str = "rarity.ron";
    pub const ECONOMY_FILE: &'static str = "economy.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Factory that only serves the bundled defaults.
    pub fn bundled() -> Self {
        Self { data_dir: None }
    }

    /// Load the rarity table from `rarity.ron`.
    pub fn load_rarity_table(&self) -> LoadResult<RarityTable> {
        match self.existing(Self::RARITY_FILE) {
            Some(path) => RarityTableLoader::load(&path),
            None => RarityTableLoader::parse(crate::DEFAULT_RARITY_RON),
        }
    }

    /// Load economy tuning from `economy.toml`.
    pub fn load_economy(&self) -> LoadResult<EconomyConfig> {
        match self.existing(Self::ECONOMY_FILE) {
            Some(path) => EconomyConfigLoader::load(&path),
            None => EconomyConfigLoader::parse(crate::DEFAULT_ECONOMY_TOML),
        }
    }

    /// Returns the data directory path, if one was configured.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(file))
            .filter(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert!(ContentFactory::bundled().data_dir().is_none());
    }

    #[test]
    fn empty_directory_serves_bundled_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_rarity_table().unwrap(), RarityTable::default());
        assert_eq!(factory.load_economy().unwrap(), EconomyConfig::default());
    }

    #[test]
    fn directory_files_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ContentFactory::ECONOMY_FILE), "upgrade_price = 75").unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::RARITY_FILE),
            r#"(tiers: [(id: "only", display_name: "Only", weight: 100.0, cps_min: 3, cps_max: 3)])"#,
        )
        .unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_economy().unwrap().upgrade_price, 75);
        assert_eq!(factory.load_rarity_table().unwrap().len(), 1);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ContentFactory::RARITY_FILE), "not ron").unwrap();

        assert!(ContentFactory::new(dir.path()).load_rarity_table().is_err());
    }
}
