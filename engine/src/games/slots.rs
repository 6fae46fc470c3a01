//! Slot machine: three independent reels over a fixed symbol set.
//!
//! Payout rule: three of a kind pays the per-symbol triple multiplier, any
//! pair returns the stake, no match pays nothing.

use super::GameRng;
use crate::config::SlotsConfig;
use parlor_types::SlotSymbol;

/// Draw three symbols independently and uniformly.
pub fn spin_reels(rng: &mut GameRng) -> [SlotSymbol; 3] {
    [rng.spin_symbol(), rng.spin_symbol(), rng.spin_symbol()]
}

/// Payout for a reel result (stake-inclusive).
pub fn payout_for(config: &SlotsConfig, symbols: &[SlotSymbol; 3], bet: u64) -> u64 {
    let [a, b, c] = *symbols;
    if a == b && b == c {
        return bet.saturating_mul(config.triple_multiplier(a));
    }
    if a == b || b == c || a == c {
        return bet.saturating_mul(config.pair_payout);
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use SlotSymbol::{Bell, Cherry, Lemon, Seven, Star};

    fn config() -> SlotsConfig {
        SlotsConfig::default()
    }

    #[test]
    fn test_triple_pays_symbol_multiplier() {
        assert_eq!(payout_for(&config(), &[Cherry, Cherry, Cherry], 10), 50);
        assert_eq!(payout_for(&config(), &[Seven, Seven, Seven], 10), 300);
        assert_eq!(payout_for(&config(), &[Star, Star, Star], 5), 100);
    }

    #[test]
    fn test_any_pair_returns_stake() {
        assert_eq!(payout_for(&config(), &[Cherry, Cherry, Lemon], 10), 10);
        assert_eq!(payout_for(&config(), &[Lemon, Cherry, Cherry], 10), 10);
        assert_eq!(payout_for(&config(), &[Cherry, Lemon, Cherry], 10), 10);
    }

    #[test]
    fn test_no_match_pays_nothing() {
        assert_eq!(payout_for(&config(), &[Cherry, Lemon, Bell], 10), 0);
    }

    #[test]
    fn test_reels_draw_from_symbol_set() {
        let mut rng = GameRng::from_seed([3u8; 32]);
        for _ in 0..100 {
            let symbols = spin_reels(&mut rng);
            for symbol in symbols {
                assert!(SlotSymbol::ALL.contains(&symbol));
            }
        }
    }
}
