use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account key: a member of a guild (guild id 0 denotes direct-message play).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId {
    pub guild: u64,
    pub user: u64,
}

impl AccountId {
    pub fn new(guild: u64, user: u64) -> Self {
        Self { guild, user }
    }

    /// Account for a user playing outside any guild.
    pub fn direct(user: u64) -> Self {
        Self {
            guild: super::constants::DIRECT_GUILD,
            user,
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.guild, self.user)
    }
}

impl Write for AccountId {
    fn write(&self, writer: &mut impl BufMut) {
        self.guild.write(writer);
        self.user.write(writer);
    }
}

impl Read for AccountId {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            guild: u64::read(reader)?,
            user: u64::read(reader)?,
        })
    }
}

impl FixedSize for AccountId {
    const SIZE: usize = 16;
}

/// Balance row for one account.
///
/// Created lazily on the first credit or debit and never deleted; the
/// balance itself is only ever mutated through the ledger's adjust
/// primitive, which keeps it non-negative by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub balance: u64,
    /// Unix seconds of the last mutation.
    pub last_updated: u64,
    /// Unix seconds of the last faucet claim, if any.
    pub last_faucet: Option<u64>,
}

impl Write for AccountBalance {
    fn write(&self, writer: &mut impl BufMut) {
        self.balance.write(writer);
        self.last_updated.write(writer);
        self.last_faucet.write(writer);
    }
}

impl Read for AccountBalance {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            balance: u64::read(reader)?,
            last_updated: u64::read(reader)?,
            last_faucet: Option::<u64>::read(reader)?,
        })
    }
}

impl EncodeSize for AccountBalance {
    fn encode_size(&self) -> usize {
        self.balance.encode_size() + self.last_updated.encode_size() + self.last_faucet.encode_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::Encode;

    #[test]
    fn test_account_id_roundtrip() {
        let id = AccountId::new(42, 1_234_567_890);
        let encoded = id.encode();
        let decoded = AccountId::read(&mut &encoded[..]).unwrap();
        assert_eq!(id, decoded);
    }

    #[test]
    fn test_balance_roundtrip() {
        let row = AccountBalance {
            balance: 2_500,
            last_updated: 1_700_000_000,
            last_faucet: Some(1_699_999_000),
        };
        let encoded = row.encode();
        let decoded = AccountBalance::read(&mut &encoded[..]).unwrap();
        assert_eq!(row, decoded);
    }

    #[test]
    fn test_direct_account_uses_zero_guild() {
        let id = AccountId::direct(7);
        assert_eq!(id.guild, 0);
        assert_eq!(id.user, 7);
    }
}
