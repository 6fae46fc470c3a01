//! Structured command/outcome interface exposed to the command router.
//!
//! The router owns parsing of chat messages and all rendering; the engine
//! receives a [`Command`] and answers with an [`Outcome`] carrying amounts,
//! outcome tags, and the new balance.

use crate::account::AccountId;
use crate::rounds::{SlotSymbol, WheelColor};
use serde::{Deserialize, Serialize};

/// Hi-Lo guess direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Higher,
    Lower,
}

/// Administrative balance operation, each reducible to a signed delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminOp {
    /// Set the balance to an exact amount.
    Set(u64),
    /// Add to the balance.
    Add(u64),
    /// Subtract from the balance.
    Sub(u64),
}

/// A command routed to the casino engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Balance {
        account: AccountId,
    },
    Faucet {
        account: AccountId,
    },
    AdminAdjust {
        account: AccountId,
        op: AdminOp,
        note: Option<String>,
    },
    SlotsSpin {
        account: AccountId,
        bet: u64,
    },
    RouletteSpin {
        account: AccountId,
        bet: u64,
        selection: String,
    },
    HiLoStart {
        account: AccountId,
        session: u64,
        bet: u64,
    },
    HiLoGuess {
        account: AccountId,
        session: u64,
        guess: Guess,
    },
    HiLoCashOut {
        account: AccountId,
        session: u64,
    },
}

/// Faucet claim result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaucetOutcome {
    Claimed { amount: u64, new_balance: u64 },
    /// Already claimed this UTC day; `next_reset` is the next 00:00 UTC.
    AlreadyClaimed { balance: u64, next_reset: u64 },
}

/// Settled slots round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsOutcome {
    pub symbols: [SlotSymbol; 3],
    pub bet: u64,
    pub payout: u64,
    pub new_balance: u64,
    /// Welcome grant credited before this round (0 if none).
    pub welcome_granted: u64,
}

/// Settled roulette round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteOutcome {
    pub selection: String,
    pub number: u8,
    pub color: WheelColor,
    pub bet: u64,
    pub payout: u64,
    pub new_balance: u64,
    pub welcome_granted: u64,
}

/// Hi-Lo session outcome after a start, guess, cash-out, or timeout.
///
/// Terminal outcomes are idempotent: repeating an action against a
/// finished session returns the same terminal outcome again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiLoOutcome {
    /// Session opened; first card dealt, waiting for a guess.
    Dealt {
        session: u64,
        card: u8,
        balance: u64,
        welcome_granted: u64,
    },
    /// Correct guess: even money credited, session continues.
    Won {
        session: u64,
        previous: u8,
        drawn: u8,
        net: u64,
        balance: u64,
        rounds: u32,
    },
    /// Equal rank: bet refunded, session continues.
    Push {
        session: u64,
        previous: u8,
        drawn: u8,
        balance: u64,
        rounds: u32,
    },
    /// Wrong guess: bet lost, session finished.
    Lost {
        session: u64,
        previous: u8,
        drawn: u8,
        bet: u64,
        balance: u64,
    },
    /// Player banked the session.
    CashedOut {
        session: u64,
        rounds: u32,
        balance: u64,
    },
    /// Session expired after the inactivity window.
    TimedOut { session: u64, rounds: u32 },
    /// Balance no longer covers the bet; session finished without a charge.
    InsufficientFunds { session: u64, balance: u64 },
}

/// Structured result of any engine command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Balance { account: AccountId, balance: u64 },
    Faucet(FaucetOutcome),
    AdminAdjust { account: AccountId, new_balance: u64 },
    Slots(SlotsOutcome),
    Roulette(RouletteOutcome),
    HiLo(HiLoOutcome),
}
