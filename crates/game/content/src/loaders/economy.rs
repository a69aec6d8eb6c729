//! Economy tuning loader.

use std::path::Path;

use clicker_core::EconomyConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for economy tuning from TOML files.
pub struct EconomyConfigLoader;

impl EconomyConfigLoader {
    /// Load economy tuning from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EconomyConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EconomyConfig> {
        let config: EconomyConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse economy TOML: {}", e))?;

        if config.mutation_success_percent > 100 {
            anyhow::bail!(
                "mutation_success_percent must be within 0..=100, got {}",
                config.mutation_success_percent
            );
        }
        if config.promo_code.trim().is_empty() {
            anyhow::bail!("promo_code must not be empty");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tuning_matches_defaults() {
        let config = EconomyConfigLoader::parse(crate::DEFAULT_ECONOMY_TOML).unwrap();

        assert_eq!(config, EconomyConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("economy.toml");
        std::fs::write(&path, "case_price = 250\npromo_code = \"vip\"\n").unwrap();

        let config = EconomyConfigLoader::load(&path).unwrap();

        assert_eq!(config.case_price, 250);
        assert!(config.promo_matches("VIP"));
        assert_eq!(config.upgrade_price, EconomyConfig::DEFAULT_UPGRADE_PRICE);
    }

    #[test]
    fn rejects_out_of_range_chance() {
        let result = EconomyConfigLoader::parse("mutation_success_percent = 120");

        assert!(result.is_err());
    }
}
