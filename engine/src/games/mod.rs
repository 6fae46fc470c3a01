//! Game engines and their shared randomness source.

pub mod hilo;
pub mod roulette;
pub mod slots;

use parlor_types::cards::CARDS_PER_DECK;
use parlor_types::SlotSymbol;
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Randomness source for all games.
///
/// Production draws come from a ChaCha20 generator seeded with OS entropy;
/// tests and simulations construct it from a fixed seed for reproducible
/// runs.
pub struct GameRng {
    rng: ChaCha20Rng,
}

impl GameRng {
    /// Secure generator seeded from OS entropy.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Deterministic generator for tests and simulations.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Draw one card (0..=51), with replacement.
    pub fn draw_card(&mut self) -> u8 {
        self.rng.gen_range(0..CARDS_PER_DECK)
    }

    /// Spin the European wheel: uniform 0..=36.
    pub fn spin_wheel(&mut self) -> u8 {
        self.rng.gen_range(0u8..=36)
    }

    /// Draw one reel symbol, uniform over the symbol set.
    pub fn spin_symbol(&mut self) -> SlotSymbol {
        SlotSymbol::ALL[self.rng.gen_range(0..SlotSymbol::ALL.len())]
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}
