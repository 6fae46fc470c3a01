use crate::ledger::LedgerEntry;
use crate::rounds::{RouletteRound, SlotsRound};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// Union of everything stored in the append-only journal.
///
/// The journal is the durability boundary for the ledger and both round
/// audit tables; the `Commit` variant is only used as commit metadata
/// (it records how many records the commit covers, for crash diagnosis).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Ledger(LedgerEntry),
    Slots(SlotsRound),
    Roulette(RouletteRound),
    Commit { entries: u64 },
}

impl Write for Record {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Ledger(entry) => {
                0u8.write(writer);
                entry.write(writer);
            }
            Self::Slots(round) => {
                1u8.write(writer);
                round.write(writer);
            }
            Self::Roulette(round) => {
                2u8.write(writer);
                round.write(writer);
            }
            Self::Commit { entries } => {
                3u8.write(writer);
                entries.write(writer);
            }
        }
    }
}

impl Read for Record {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Self::Ledger(LedgerEntry::read(reader)?)),
            1 => Ok(Self::Slots(SlotsRound::read(reader)?)),
            2 => Ok(Self::Roulette(RouletteRound::read(reader)?)),
            3 => Ok(Self::Commit {
                entries: u64::read(reader)?,
            }),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Record {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Ledger(entry) => entry.encode_size(),
            Self::Slots(round) => round.encode_size(),
            Self::Roulette(round) => round.encode_size(),
            Self::Commit { entries } => entries.encode_size(),
        }
    }
}

/// Balance-store value union: account rows plus commit metadata.
///
/// The commit metadata records the journal length the committed state
/// covers, which lets recovery replay any journal tail that was committed
/// ahead of the balance store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Balance(crate::account::AccountBalance),
    Commit { journal: u64 },
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Balance(row) => {
                0u8.write(writer);
                row.write(writer);
            }
            Self::Commit { journal } => {
                1u8.write(writer);
                journal.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Self::Balance(crate::account::AccountBalance::read(reader)?)),
            1 => Ok(Self::Commit {
                journal: u64::read(reader)?,
            }),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Balance(row) => row.encode_size(),
            Self::Commit { journal } => journal.encode_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountBalance, AccountId};
    use crate::ledger::GameTag;
    use commonware_codec::Encode;

    #[test]
    fn test_record_roundtrip() {
        let records = vec![
            Record::Ledger(LedgerEntry {
                id: 1,
                account: AccountId::new(1, 2),
                game: GameTag::Slots,
                delta: -10,
                balance_after: 90,
                ts: 100,
                note: Some("bet".to_string()),
            }),
            Record::Commit { entries: 42 },
        ];
        for record in records {
            let encoded = record.encode();
            let decoded = Record::read(&mut &encoded[..]).unwrap();
            assert_eq!(record, decoded);
        }
    }

    #[test]
    fn test_value_roundtrip() {
        let values = vec![
            Value::Balance(AccountBalance {
                balance: 1_000,
                last_updated: 5,
                last_faucet: None,
            }),
            Value::Commit { journal: 7 },
        ];
        for value in values {
            let encoded = value.encode();
            let decoded = Value::read(&mut &encoded[..]).unwrap();
            assert_eq!(value, decoded);
        }
    }
}
