//! Rarity table: the ordered set of reward tiers.
//!
//! Order matters twice: the loot roll walks cumulative weights in configured
//! order, and mutation advances an item to the next tier in that order.

use core::fmt;

use arrayvec::ArrayVec;

use crate::config::EconomyConfig;

/// Stable identifier of a rarity tier (e.g. `"common"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TierId(String);

impl TierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named reward class with a draw weight and a cps reward range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityTier {
    pub id: TierId,
    pub display_name: String,
    /// Draw weight in percent, `(0, 100]`.
    pub weight: f64,
    pub cps_min: u64,
    pub cps_max: u64,
}

impl RarityTier {
    pub fn new(
        id: impl Into<TierId>,
        display_name: impl Into<String>,
        weight: f64,
        cps_min: u64,
        cps_max: u64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            weight,
            cps_min,
            cps_max,
        }
    }

    /// Draws a cps value inside `[cps_min, cps_max]` from a uniform `unit` in `[0, 1)`.
    ///
    /// `cps_min + floor(unit * (cps_max - cps_min + 1))`, clamped to the range.
    pub fn draw_cps(&self, unit: f64) -> u64 {
        let span = self.cps_max - self.cps_min + 1;
        let offset = (unit * span as f64).floor() as u64;
        self.cps_min
            .saturating_add(offset)
            .clamp(self.cps_min, self.cps_max)
    }

    /// Returns true if `cps` lies within this tier's reward range.
    pub fn contains_cps(&self, cps: u64) -> bool {
        (self.cps_min..=self.cps_max).contains(&cps)
    }
}

/// Structural problems detected while building a [`RarityTable`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("rarity table must contain at least one tier")]
    Empty,

    #[error("rarity table supports at most {max} tiers, got {count}")]
    TooManyTiers { count: usize, max: usize },

    #[error("duplicate tier id '{0}'")]
    DuplicateTier(TierId),

    #[error("tier '{tier}' has weight {weight}, expected a value in (0, 100]")]
    InvalidWeight { tier: TierId, weight: f64 },

    #[error("tier '{tier}' has cps_min {min} greater than cps_max {max}")]
    InvalidCpsRange { tier: TierId, min: u64, max: u64 },
}

/// Ordered, validated sequence of rarity tiers.
///
/// The table is never empty. Weights are *not* required to sum to 100; a roll
/// landing past the cumulative total falls back to the first tier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<RarityTier>", into = "Vec<RarityTier>")
)]
pub struct RarityTable {
    tiers: ArrayVec<RarityTier, { EconomyConfig::MAX_TIERS }>,
}

impl RarityTable {
    /// Maximum number of tiers a table may hold.
    pub const MAX_TIERS: usize = EconomyConfig::MAX_TIERS;

    /// Builds a table, validating structure (not the weight sum).
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] for an empty or oversized table, duplicate ids,
    /// weights outside `(0, 100]` or inverted cps ranges.
    pub fn new(tiers: impl IntoIterator<Item = RarityTier>) -> Result<Self, TableError> {
        let tiers: Vec<RarityTier> = tiers.into_iter().collect();
        if tiers.is_empty() {
            return Err(TableError::Empty);
        }
        if tiers.len() > EconomyConfig::MAX_TIERS {
            return Err(TableError::TooManyTiers {
                count: tiers.len(),
                max: EconomyConfig::MAX_TIERS,
            });
        }

        let mut validated = ArrayVec::new();
        for tier in tiers {
            if validated.iter().any(|t: &RarityTier| t.id == tier.id) {
                return Err(TableError::DuplicateTier(tier.id));
            }
            if !(tier.weight > 0.0 && tier.weight <= 100.0) {
                return Err(TableError::InvalidWeight {
                    tier: tier.id,
                    weight: tier.weight,
                });
            }
            if tier.cps_min > tier.cps_max {
                return Err(TableError::InvalidCpsRange {
                    tier: tier.id,
                    min: tier.cps_min,
                    max: tier.cps_max,
                });
            }
            validated.push(tier);
        }

        Ok(Self { tiers: validated })
    }

    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// First configured tier, the fallback for a roll that matches nothing.
    pub fn first(&self) -> &RarityTier {
        &self.tiers[0]
    }

    /// Last configured tier; mutation cannot advance past it.
    pub fn highest(&self) -> &RarityTier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, id: &TierId) -> Option<&RarityTier> {
        self.tiers.iter().find(|tier| &tier.id == id)
    }

    pub fn position(&self, id: &TierId) -> Option<usize> {
        self.tiers.iter().position(|tier| &tier.id == id)
    }

    /// Tier following `id` in configured order, or `None` at the top (or if unknown).
    pub fn next_tier(&self, id: &TierId) -> Option<&RarityTier> {
        self.position(id).and_then(|index| self.tiers.get(index + 1))
    }

    pub fn is_highest(&self, id: &TierId) -> bool {
        &self.highest().id == id
    }

    pub fn total_weight(&self) -> f64 {
        self.tiers.iter().map(|tier| tier.weight).sum()
    }

    /// Returns true if the weights sum to 100 (within floating-point noise).
    pub fn is_balanced(&self) -> bool {
        (self.total_weight() - 100.0).abs() < 1e-9
    }

    /// Selects the tier for a roll in `[0, 100)`.
    ///
    /// Walks tiers in configured order accumulating weights and returns the
    /// first tier with `roll <= cumulative`. Falls back to the first tier when
    /// the roll lands above the total weight.
    pub fn select(&self, roll: f64) -> &RarityTier {
        let mut cumulative = 0.0;
        for tier in &self.tiers {
            cumulative += tier.weight;
            if roll <= cumulative {
                return tier;
            }
        }
        self.first()
    }
}

impl Default for RarityTable {
    /// The launch table: nine tiers from common to admin.
    fn default() -> Self {
        let tiers = [
            RarityTier::new("common", "Common", 40.0, 1, 5),
            RarityTier::new("uncommon", "Uncommon", 25.0, 5, 15),
            RarityTier::new("rare", "Rare", 15.0, 15, 30),
            RarityTier::new("epic", "Epic", 10.0, 30, 60),
            RarityTier::new("legendary", "Legendary", 6.0, 60, 100),
            RarityTier::new("god", "God", 2.5, 100, 200),
            RarityTier::new("secret", "Secret", 1.0, 200, 350),
            RarityTier::new("limited", "Limited", 0.4, 350, 500),
            RarityTier::new("admin", "Admin", 0.1, 500, 1000),
        ];
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<RarityTier>> for RarityTable {
    type Error = TableError;

    fn try_from(tiers: Vec<RarityTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<RarityTable> for Vec<RarityTier> {
    fn from(table: RarityTable) -> Self {
        table.tiers.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(table: &RarityTable) -> Vec<&str> {
        table.tiers().iter().map(|tier| tier.id.as_str()).collect()
    }

    #[test]
    fn default_table_is_ordered_and_balanced() {
        let table = RarityTable::default();

        assert_eq!(
            ids(&table),
            [
                "common",
                "uncommon",
                "rare",
                "epic",
                "legendary",
                "god",
                "secret",
                "limited",
                "admin"
            ]
        );
        assert!(table.is_balanced());
        assert_eq!(table.first().id.as_str(), "common");
        assert_eq!(table.highest().id.as_str(), "admin");
    }

    #[test]
    fn select_walks_cumulative_weights() {
        let table = RarityTable::default();

        assert_eq!(table.select(0.0).id.as_str(), "common");
        assert_eq!(table.select(40.0).id.as_str(), "common");
        assert_eq!(table.select(40.01).id.as_str(), "uncommon");
        assert_eq!(table.select(65.0).id.as_str(), "uncommon");
        assert_eq!(table.select(89.5).id.as_str(), "epic");
        assert_eq!(table.select(99.95).id.as_str(), "admin");
    }

    #[test]
    fn select_falls_back_to_first_tier_on_miss() {
        let table = RarityTable::new([
            RarityTier::new("low", "Low", 30.0, 1, 2),
            RarityTier::new("high", "High", 20.0, 3, 4),
        ])
        .unwrap();

        assert!(!table.is_balanced());
        assert_eq!(table.select(49.9).id.as_str(), "high");
        assert_eq!(table.select(75.0).id.as_str(), "low");
    }

    #[test]
    fn next_tier_follows_configured_order() {
        let table = RarityTable::default();

        assert_eq!(
            table.next_tier(&TierId::from("god")).map(|t| t.id.as_str()),
            Some("secret")
        );
        assert!(table.next_tier(&TierId::from("admin")).is_none());
        assert!(table.next_tier(&TierId::from("missing")).is_none());
        assert!(table.is_highest(&TierId::from("admin")));
    }

    #[test]
    fn draw_cps_covers_range_edges() {
        let tier = RarityTier::new("rare", "Rare", 15.0, 15, 30);

        assert_eq!(tier.draw_cps(0.0), 15);
        assert_eq!(tier.draw_cps(0.999_999_9), 30);
        assert_eq!(tier.draw_cps(0.5), 23);

        let single = RarityTier::new("fixed", "Fixed", 1.0, 7, 7);
        assert_eq!(single.draw_cps(0.99), 7);
    }

    #[test]
    fn rejects_structural_errors() {
        assert_eq!(RarityTable::new([]), Err(TableError::Empty));

        let duplicate = RarityTable::new([
            RarityTier::new("a", "A", 50.0, 1, 1),
            RarityTier::new("a", "A again", 50.0, 1, 1),
        ]);
        assert_eq!(duplicate, Err(TableError::DuplicateTier(TierId::from("a"))));

        let zero_weight = RarityTable::new([RarityTier::new("a", "A", 0.0, 1, 1)]);
        assert!(matches!(zero_weight, Err(TableError::InvalidWeight { .. })));

        let nan_weight = RarityTable::new([RarityTier::new("a", "A", f64::NAN, 1, 1)]);
        assert!(matches!(nan_weight, Err(TableError::InvalidWeight { .. })));

        let inverted = RarityTable::new([RarityTier::new("a", "A", 10.0, 9, 3)]);
        assert!(matches!(inverted, Err(TableError::InvalidCpsRange { .. })));

        let oversized = RarityTable::new(
            (0..=EconomyConfig::MAX_TIERS)
                .map(|i| RarityTier::new(format!("t{i}").as_str(), "T", 1.0, 1, 1)),
        );
        assert!(matches!(oversized, Err(TableError::TooManyTiers { .. })));
    }
}
