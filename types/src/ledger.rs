use crate::account::AccountId;
use crate::{read_string, string_encode_size, write_string};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of a balance change, recorded on every ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum GameTag {
    Slots = 0,
    Roulette = 1,
    HiLo = 2,
    /// One-time first-play welcome grant.
    Welcome = 3,
    /// Daily faucet claim.
    Faucet = 4,
    /// Administrative adjustment.
    Admin = 5,
}

impl GameTag {
    /// Tags that count as wagering activity for the welcome grant check.
    pub const WAGERING: [GameTag; 3] = [GameTag::Slots, GameTag::Roulette, GameTag::HiLo];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameTag::Slots => "slots",
            GameTag::Roulette => "roulette",
            GameTag::HiLo => "hilo",
            GameTag::Welcome => "welcome",
            GameTag::Faucet => "faucet",
            GameTag::Admin => "admin",
        }
    }
}

impl fmt::Display for GameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Write for GameTag {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameTag {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Slots),
            1 => Ok(Self::Roulette),
            2 => Ok(Self::HiLo),
            3 => Ok(Self::Welcome),
            4 => Ok(Self::Faucet),
            5 => Ok(Self::Admin),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for GameTag {
    const SIZE: usize = 1;
}

/// One append-only ledger row: a signed balance change with the resulting
/// balance snapshot.
///
/// The running sum of deltas for an account always equals its balance row,
/// and the most recent entry's `balance_after` equals the row at the same
/// instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Journal location, assigned at append time.
    pub id: u64,
    pub account: AccountId,
    pub game: GameTag,
    pub delta: i64,
    pub balance_after: u64,
    /// Unix seconds.
    pub ts: u64,
    /// Free-text annotation ("bet", "payout", "daily faucet", ...).
    pub note: Option<String>,
}

impl Write for LedgerEntry {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.account.write(writer);
        self.game.write(writer);
        self.delta.write(writer);
        self.balance_after.write(writer);
        self.ts.write(writer);
        match &self.note {
            Some(note) => {
                true.write(writer);
                write_string(note, writer);
            }
            None => false.write(writer),
        }
    }
}

impl Read for LedgerEntry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            account: AccountId::read(reader)?,
            game: GameTag::read(reader)?,
            delta: i64::read(reader)?,
            balance_after: u64::read(reader)?,
            ts: u64::read(reader)?,
            note: if bool::read(reader)? {
                Some(read_string(reader, crate::constants::MAX_NOTE_LENGTH)?)
            } else {
                None
            },
        })
    }
}

impl EncodeSize for LedgerEntry {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.account.encode_size()
            + self.game.encode_size()
            + self.delta.encode_size()
            + self.balance_after.encode_size()
            + self.ts.encode_size()
            + 1
            + self.note.as_deref().map_or(0, string_encode_size)
    }
}
