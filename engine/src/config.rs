//! Immutable engine configuration, passed in at construction.

use anyhow::Context as _;
use parlor_types::constants::{FAUCET_AMOUNT, HILO_TIMEOUT_SECS, WELCOME_GRANT_AMOUNT};
use parlor_types::SlotSymbol;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slots paytable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsConfig {
    /// Three-of-a-kind multiplier per symbol, indexed by [`SlotSymbol`]:
    /// cherry, lemon, grape, bell, star, seven.
    pub triple_payout: [u64; 6],
    /// Any-pair multiplier (1 returns the stake, no profit).
    pub pair_payout: u64,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            triple_payout: [5, 6, 8, 12, 20, 30],
            pair_payout: 1,
        }
    }
}

impl SlotsConfig {
    pub fn triple_multiplier(&self, symbol: SlotSymbol) -> u64 {
        self.triple_payout[symbol as usize]
    }
}

/// Engine configuration. One immutable value per engine instance; tests
/// and deployments can load overrides from YAML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasinoConfig {
    /// One-time welcome grant on an account's first wagering game.
    pub welcome_grant: u64,
    /// Daily faucet amount.
    pub faucet_grant: u64,
    /// Hi-Lo session inactivity timeout in seconds.
    pub hilo_timeout_secs: u64,
    pub slots: SlotsConfig,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            welcome_grant: WELCOME_GRANT_AMOUNT,
            faucet_grant: FAUCET_AMOUNT,
            hilo_timeout_secs: HILO_TIMEOUT_SECS,
            slots: SlotsConfig::default(),
        }
    }
}

impl CasinoConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paytable() {
        let config = CasinoConfig::default();
        assert_eq!(config.slots.triple_multiplier(SlotSymbol::Cherry), 5);
        assert_eq!(config.slots.triple_multiplier(SlotSymbol::Seven), 30);
        assert_eq!(config.slots.pair_payout, 1);
        assert_eq!(config.welcome_grant, 2_000);
        assert_eq!(config.faucet_grant, 500);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config: CasinoConfig = serde_yaml::from_str("welcome_grant: 100\n").unwrap();
        assert_eq!(config.welcome_grant, 100);
        assert_eq!(config.faucet_grant, 500);
        assert_eq!(config.hilo_timeout_secs, 30);
    }
}
