//! Shared fixtures for unit tests.

use crate::config::EconomyConfig;
use crate::env::{EconomyEnv, PcgRng, RarityTable, RngOracle};

/// Default table, default config and a pluggable RNG.
pub(crate) struct Fixture {
    pub table: RarityTable,
    pub config: EconomyConfig,
    pub rng: Box<dyn RngOracle>,
}

impl Fixture {
    pub fn with_rng(rng: impl RngOracle + 'static) -> Self {
        Self {
            table: RarityTable::default(),
            config: EconomyConfig::default(),
            rng: Box::new(rng),
        }
    }

    pub fn env(&self) -> EconomyEnv<'_> {
        EconomyEnv::new(&self.table, &self.config, self.rng.as_ref())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::with_rng(PcgRng)
    }
}

/// RNG that returns the same value for every seed.
///
/// `FixedRng(0)` forces the lowest roll (first tier, minimum cps, coin
/// success); `FixedRng(u32::MAX)` forces the highest.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}
