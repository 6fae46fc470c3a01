//! Hi-Lo: a multi-round push-your-luck card game.
//!
//! One session per interactive exchange. Each guess is charged upfront
//! (pessimistic debit); a correct guess pays even money, an equal rank is
//! a push (stake refunded), a wrong guess ends the session. Cash-out is
//! offered once the first round has settled. Terminal sessions absorb
//! further actions as no-ops, replying with the recorded outcome.

use parlor_types::api::{Guess, HiLoOutcome};
use parlor_types::cards::card_rank_ace_high;
use parlor_types::AccountId;

/// Session state. `AwaitingGuess` is the only non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HiLoState {
    AwaitingGuess,
    Lost,
    CashedOut,
    TimedOut,
    InsufficientFunds,
}

impl HiLoState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HiLoState::AwaitingGuess)
    }
}

/// How one round resolved against the drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Push,
    Lose,
}

/// Resolve a guess: equal ranks push, otherwise the guess must match the
/// actual direction. Ranks compare Ace high.
pub fn resolve_guess(current: u8, drawn: u8, guess: Guess) -> RoundResult {
    let current = card_rank_ace_high(current);
    let drawn = card_rank_ace_high(drawn);
    if drawn == current {
        return RoundResult::Push;
    }
    let is_higher = drawn > current;
    let correct = match guess {
        Guess::Higher => is_higher,
        Guess::Lower => !is_higher,
    };
    if correct {
        RoundResult::Win
    } else {
        RoundResult::Lose
    }
}

/// One interactive Hi-Lo exchange, keyed by the interaction id.
#[derive(Clone, Debug)]
pub struct HiLoSession {
    pub id: u64,
    pub owner: AccountId,
    pub bet: u64,
    /// Current card (0..=51).
    pub current: u8,
    /// Settled rounds so far.
    pub rounds: u32,
    pub can_cash_out: bool,
    pub state: HiLoState,
    /// Unix seconds of the last action, for the inactivity timeout.
    pub last_action: u64,
    /// Recorded outcome of the terminal transition, replayed on repeats.
    terminal: Option<HiLoOutcome>,
}

impl HiLoSession {
    pub fn open(id: u64, owner: AccountId, bet: u64, first_card: u8, now: u64) -> Self {
        Self {
            id,
            owner,
            bet,
            current: first_card,
            rounds: 0,
            can_cash_out: false,
            state: HiLoState::AwaitingGuess,
            last_action: now,
            terminal: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The recorded terminal outcome, if the session has finished.
    pub fn terminal_outcome(&self) -> Option<&HiLoOutcome> {
        self.terminal.as_ref()
    }

    /// Continue after a win or push: the drawn card becomes current and
    /// cash-out unlocks.
    pub(crate) fn advance(&mut self, drawn: u8, now: u64) {
        self.current = drawn;
        self.rounds += 1;
        self.can_cash_out = true;
        self.last_action = now;
    }

    /// Transition to a terminal state, recording the outcome to replay.
    pub(crate) fn finish(&mut self, state: HiLoState, outcome: HiLoOutcome, now: u64) {
        debug_assert!(state.is_terminal());
        self.state = state;
        self.terminal = Some(outcome);
        self.last_action = now;
    }

    /// Finalize an idle session. Settled rounds stay settled; the balance
    /// is untouched.
    pub(crate) fn time_out(&mut self, now: u64) -> HiLoOutcome {
        let outcome = HiLoOutcome::TimedOut {
            session: self.id,
            rounds: self.rounds,
        };
        self.finish(HiLoState::TimedOut, outcome.clone(), now);
        outcome
    }
}
