/// Economy tuning constants and tunable parameters.
///
/// Prices and grant sizes are runtime-tunable (loaded from TOML by the content
/// crate); the associated constants are compile-time limits and defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    /// Cost of a single loot case.
    pub case_price: u64,
    /// Cost of one click-power upgrade.
    pub upgrade_price: u64,
    /// Cost of one mutation attempt.
    pub mutation_price: u64,
    /// Click power gained per purchased upgrade.
    pub click_power_step: u64,
    /// Clicks arriving faster than this interval count as a strike.
    pub min_click_interval_ms: u64,
    /// Chance (0-100) that a mutation advances the item one tier.
    pub mutation_success_percent: u32,
    /// Promo code that grants admin status (compared case-insensitively).
    pub promo_code: String,
    /// Currency added by the admin currency grant.
    pub admin_currency_grant: u64,
    /// Click power added by the admin click-power grant.
    pub admin_click_power_grant: u64,
}

impl EconomyConfig {
    // ===== compile-time constants =====
    /// Maximum number of rarity tiers a table may hold.
    pub const MAX_TIERS: usize = 16;
    /// Strike count at which the click guard bans the player.
    pub const BAN_STRIKE: u32 = 3;
    /// Strike count at which the click guard confiscates half the balance.
    pub const CONFISCATION_STRIKE: u32 = 2;
    /// Click power every session starts with (and returns to on reset).
    pub const STARTING_CLICK_POWER: u64 = 1;
    /// Highest serial used in generated display names.
    pub const MAX_SERIAL: u32 = 9999;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CASE_PRICE: u64 = 100;
    pub const DEFAULT_UPGRADE_PRICE: u64 = 50;
    pub const DEFAULT_MUTATION_PRICE: u64 = 500;
    pub const DEFAULT_CLICK_POWER_STEP: u64 = 1;
    pub const DEFAULT_MIN_CLICK_INTERVAL_MS: u64 = 10;
    pub const DEFAULT_MUTATION_SUCCESS_PERCENT: u32 = 50;
    pub const DEFAULT_PROMO_CODE: &'static str = "SETUP";
    pub const DEFAULT_ADMIN_CURRENCY_GRANT: u64 = 10_000;
    pub const DEFAULT_ADMIN_CLICK_POWER_GRANT: u64 = 10;

    pub fn new() -> Self {
        Self {
            case_price: Self::DEFAULT_CASE_PRICE,
            upgrade_price: Self::DEFAULT_UPGRADE_PRICE,
            mutation_price: Self::DEFAULT_MUTATION_PRICE,
            click_power_step: Self::DEFAULT_CLICK_POWER_STEP,
            min_click_interval_ms: Self::DEFAULT_MIN_CLICK_INTERVAL_MS,
            mutation_success_percent: Self::DEFAULT_MUTATION_SUCCESS_PERCENT,
            promo_code: Self::DEFAULT_PROMO_CODE.to_owned(),
            admin_currency_grant: Self::DEFAULT_ADMIN_CURRENCY_GRANT,
            admin_click_power_grant: Self::DEFAULT_ADMIN_CLICK_POWER_GRANT,
        }
    }

    /// Returns true if `code` is the admin promo code, ignoring ASCII case.
    pub fn promo_matches(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case(&self.promo_code)
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self::new()
    }
}
