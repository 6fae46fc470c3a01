//! Common types for the parlor chips ledger and casino games.
//!
//! Everything persisted by the engine (balance rows, ledger entries, round
//! audit records) lives here with a stable binary encoding, so reporting
//! tools can decode the journal without linking against the engine.

pub mod account;
pub mod api;
pub mod cards;
pub mod constants;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod rounds;

pub use account::{AccountBalance, AccountId};
pub use api::{AdminOp, Command, FaucetOutcome, Guess, HiLoOutcome, Outcome, RouletteOutcome, SlotsOutcome};
pub use error::CasinoError;
pub use journal::{Record, Value};
pub use ledger::{GameTag, LedgerEntry};
pub use rounds::{RouletteRound, SlotSymbol, SlotsRound, WheelColor};

use bytes::{Buf, BufMut};
use commonware_codec::{Error, ReadExt, Write};

/// Helper to write a string as length-prefixed UTF-8 bytes.
pub(crate) fn write_string(s: &str, writer: &mut impl BufMut) {
    let bytes = s.as_bytes();
    (bytes.len() as u32).write(writer);
    writer.put_slice(bytes);
}

/// Helper to read a string from length-prefixed UTF-8 bytes.
pub(crate) fn read_string(reader: &mut impl Buf, max_len: usize) -> Result<String, Error> {
    let len = u32::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("String", "too long"));
    }
    if reader.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = vec![0u8; len];
    reader.copy_to_slice(&mut bytes);
    String::from_utf8(bytes).map_err(|_| Error::Invalid("String", "invalid UTF-8"))
}

/// Helper to get encode size of a string.
pub(crate) fn string_encode_size(s: &str) -> usize {
    4 + s.len()
}
