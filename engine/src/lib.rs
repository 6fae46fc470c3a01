//! Parlor engine: the chips ledger and wagering-game core.
//!
//! The engine is built around one primitive: an atomic balance adjustment
//! that upserts the account row and appends a ledger entry in the same
//! committed transaction, refusing any change that would drive a balance
//! negative. The three games (slots, roulette, Hi-Lo) and both grant
//! policies settle exclusively through it, so the append-only journal is
//! a complete audit trail of every chip that moves.
//!
//! ## Determinism requirements
//! - The engine never reads the wall clock; hosts pass `now` (unix
//!   seconds) into every entry point.
//! - All randomness flows through [`GameRng`]; tests construct it from a
//!   fixed seed.
//!
//! ## Typical wiring
//! ```rust,ignore
//! use parlor_engine::{service, Casino, CasinoConfig, Memory};
//!
//! let casino = Casino::new(Memory::new(), CasinoConfig::default());
//! let (mailbox, receiver) = service::mailbox(64);
//! // Hand `mailbox` clones to command handlers, then:
//! let engine_task = service::run(casino, receiver);
//! ```

pub mod balance;
pub mod config;
pub mod games;
pub mod grant;
pub mod query;
pub mod service;
pub mod sessions;

mod casino;
mod db;
mod store;


pub use casino::Casino;
pub use config::{CasinoConfig, SlotsConfig};
pub use db::{BalanceAdb, Database};
pub use games::hilo::{HiLoSession, HiLoState, RoundResult};
pub use games::roulette::{parse_selection, payout_units, wheel_color, Selection};
pub use games::GameRng;
pub use query::{LedgerFilter, RtpReport};
pub use sessions::SessionTable;
pub use store::Store;

#[cfg(any(test, feature = "mocks"))]
pub use store::Memory;
