//! Shared playing-card helpers.
//!
//! Cards are encoded as `0..=51`, where:
//! - suit = card / 13 (0..=3)
//! - rank = card % 13 (0..=12)
//!
//! Hi-Lo compares ranks with Ace high (14).

/// Total cards in a standard deck.
pub const CARDS_PER_DECK: u8 = 52;

/// Ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

const SUIT_SYMBOLS: [char; 4] = ['♠', '♥', '♦', '♣'];
const RANK_SYMBOLS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Returns true if `card` is within `0..CARDS_PER_DECK`.
pub fn is_valid_card(card: u8) -> bool {
    card < CARDS_PER_DECK
}

/// Returns the 0-based rank (0..=12), where 0 is Ace.
pub fn card_rank(card: u8) -> u8 {
    card % RANKS_PER_SUIT
}

/// Returns the rank for comparisons (2..=14), where Ace is high (14).
pub fn card_rank_ace_high(card: u8) -> u8 {
    let r = card_rank(card);
    if r == 0 {
        14
    } else {
        r + 1
    }
}

/// Returns the suit (0..=3).
pub fn card_suit(card: u8) -> u8 {
    card / RANKS_PER_SUIT
}

/// Formats a card for display, e.g. "A♠" or "10♦".
pub fn format_card(card: u8) -> String {
    if !is_valid_card(card) {
        return format!("?{card}");
    }
    format!(
        "{}{}",
        RANK_SYMBOLS[card_rank(card) as usize],
        SUIT_SYMBOLS[card_suit(card) as usize]
    )
}
