//! Client configuration: command-line flags with environment fallbacks.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;

use clicker_core::EconomyConfig;
use clicker_runtime::RuntimeConfig;

/// Terminal client for the clicker economy.
///
/// Every flag can also be set through its environment variable, and a `.env`
/// file in the working directory is loaded first.
#[derive(Clone, Debug, Parser)]
#[command(name = "clicker", version)]
pub struct ClientConfig {
    /// Player name for this session
    #[arg(short, long, env = "CLICKER_USERNAME")]
    pub username: Option<String>,

    /// Directory holding `rarity.ron` and `economy.toml` overrides
    #[arg(long, env = "CLICKER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Delay in milliseconds before a case or mutation is revealed
    #[arg(long, env = "CLICKER_PENDING_MS", default_value_t = 2_000)]
    pub pending_ms: u64,

    /// Fixed game seed for a reproducible session
    #[arg(long, env = "CLICKER_SEED")]
    pub seed: Option<u64>,

    /// Directory for `client.log` (default: platform cache dir)
    #[arg(long, env = "CLICKER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Runtime settings for this client, with economy tuning from content.
    pub fn runtime_config(&self, economy: EconomyConfig) -> RuntimeConfig {
        RuntimeConfig {
            economy,
            pending_delay: Duration::from_millis(self.pending_ms),
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }

    /// Resolves the log directory, falling back to the platform cache dir.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }

        ProjectDirs::from("", "", "clicker")
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| std::env::temp_dir().join("clicker").join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ClientConfig::try_parse_from([
            "clicker",
            "--username",
            "ada",
            "--pending-ms",
            "0",
            "--seed",
            "42",
            "--log-dir",
            "/tmp/clicker-logs",
        ])
        .unwrap();

        assert_eq!(config.username.as_deref(), Some("ada"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/clicker-logs"));

        let runtime = config.runtime_config(EconomyConfig::default());
        assert_eq!(runtime.pending_delay, Duration::ZERO);
        assert_eq!(runtime.seed, Some(42));
        assert_eq!(runtime.tick_interval, RuntimeConfig::DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn rejects_non_numeric_delay() {
        let result = ClientConfig::try_parse_from(["clicker", "--pending-ms", "soon"]);
        assert!(result.is_err());
    }
}
