use thiserror::Error;

/// Failure taxonomy for the casino engine.
///
/// Every monetary fault is recovered locally by aborting the transaction;
/// callers always observe either a fully applied balance change or an
/// unchanged balance plus one of these values.
#[derive(Debug, Error)]
pub enum CasinoError {
    /// The bet (or debit) exceeds the balance. Also raised by the adjust
    /// primitive itself when a delta would drive the balance negative;
    /// either way the transaction aborts with nothing written.
    #[error("insufficient chips: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },

    /// Bets must be positive.
    #[error("bet must be greater than zero")]
    InvalidBet,

    /// The roulette selection could not be parsed; no funds moved.
    #[error("unrecognized selection {0:?}")]
    InvalidSelection(String),

    /// No session with this id is active.
    #[error("no active session {0}")]
    SessionNotFound(u64),

    /// A session with this id already exists.
    #[error("session {0} already exists")]
    SessionExists(u64),

    /// The session belongs to another player; the action is rejected
    /// without touching the session.
    #[error("session {0} belongs to another player")]
    NotSessionOwner(u64),

    /// Cash-out is only offered once the first round has settled.
    #[error("cash out unlocks after the first settled round")]
    CashOutUnavailable,

    /// Transaction-layer failure; rolled back and non-fatal to the engine.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl From<anyhow::Error> for CasinoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err)
    }
}
