/// Guild id used for direct-message play (no guild scope).
pub const DIRECT_GUILD: u64 = 0;

/// One-time welcome grant credited on an account's first wagering game.
pub const WELCOME_GRANT_AMOUNT: u64 = 2_000;

/// Daily faucet amount.
pub const FAUCET_AMOUNT: u64 = 500;

/// Faucet resets at 00:00 UTC; claims are gated per UTC day.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Hi-Lo session inactivity timeout in seconds.
pub const HILO_TIMEOUT_SECS: u64 = 30;

/// Maximum length for ledger entry annotations.
pub const MAX_NOTE_LENGTH: usize = 128;

/// Maximum length for a roulette selection as typed by the player.
pub const MAX_SELECTION_LENGTH: usize = 64;
