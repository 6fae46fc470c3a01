use crate::account::AccountId;
use crate::{read_string, string_encode_size, write_string};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot machine reel symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum SlotSymbol {
    Cherry = 0,
    Lemon = 1,
    Grape = 2,
    Bell = 3,
    Star = 4,
    Seven = 5,
}

impl SlotSymbol {
    pub const ALL: [SlotSymbol; 6] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Grape,
        SlotSymbol::Bell,
        SlotSymbol::Star,
        SlotSymbol::Seven,
    ];

    /// Emoji used by the command router when rendering reels.
    pub fn glyph(&self) -> &'static str {
        match self {
            SlotSymbol::Cherry => "🍒",
            SlotSymbol::Lemon => "🍋",
            SlotSymbol::Grape => "🍇",
            SlotSymbol::Bell => "🔔",
            SlotSymbol::Star => "⭐",
            SlotSymbol::Seven => "7️⃣",
        }
    }
}

impl fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl Write for SlotSymbol {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for SlotSymbol {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Cherry),
            1 => Ok(Self::Lemon),
            2 => Ok(Self::Grape),
            3 => Ok(Self::Bell),
            4 => Ok(Self::Star),
            5 => Ok(Self::Seven),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for SlotSymbol {
    const SIZE: usize = 1;
}

/// Color of a roulette pocket. Zero is green; 1..=36 are red or black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum WheelColor {
    Green = 0,
    Red = 1,
    Black = 2,
}

impl WheelColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelColor::Green => "green",
            WheelColor::Red => "red",
            WheelColor::Black => "black",
        }
    }
}

impl fmt::Display for WheelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Write for WheelColor {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for WheelColor {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Green),
            1 => Ok(Self::Red),
            2 => Ok(Self::Black),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for WheelColor {
    const SIZE: usize = 1;
}

/// Audit record for one settled slots round. Written once, never read back
/// by the engine; reporting tools aggregate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsRound {
    pub id: u64,
    pub account: AccountId,
    pub bet: u64,
    pub payout: u64,
    pub symbols: [SlotSymbol; 3],
    pub ts: u64,
}

impl Write for SlotsRound {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.account.write(writer);
        self.bet.write(writer);
        self.payout.write(writer);
        for symbol in &self.symbols {
            symbol.write(writer);
        }
        self.ts.write(writer);
    }
}

impl Read for SlotsRound {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            account: AccountId::read(reader)?,
            bet: u64::read(reader)?,
            payout: u64::read(reader)?,
            symbols: [
                SlotSymbol::read(reader)?,
                SlotSymbol::read(reader)?,
                SlotSymbol::read(reader)?,
            ],
            ts: u64::read(reader)?,
        })
    }
}

impl EncodeSize for SlotsRound {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.account.encode_size()
            + self.bet.encode_size()
            + self.payout.encode_size()
            + 3 * SlotSymbol::SIZE
            + self.ts.encode_size()
    }
}

/// Audit record for one settled roulette round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteRound {
    pub id: u64,
    pub account: AccountId,
    pub bet: u64,
    pub payout: u64,
    /// Selection as typed by the player.
    pub selection: String,
    pub number: u8,
    pub color: WheelColor,
    pub ts: u64,
}

impl Write for RouletteRound {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.account.write(writer);
        self.bet.write(writer);
        self.payout.write(writer);
        write_string(&self.selection, writer);
        self.number.write(writer);
        self.color.write(writer);
        self.ts.write(writer);
    }
}

impl Read for RouletteRound {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            account: AccountId::read(reader)?,
            bet: u64::read(reader)?,
            payout: u64::read(reader)?,
            selection: read_string(reader, crate::constants::MAX_SELECTION_LENGTH)?,
            number: u8::read(reader)?,
            color: WheelColor::read(reader)?,
            ts: u64::read(reader)?,
        })
    }
}

impl EncodeSize for RouletteRound {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.account.encode_size()
            + self.bet.encode_size()
            + self.payout.encode_size()
            + string_encode_size(&self.selection)
            + self.number.encode_size()
            + self.color.encode_size()
            + self.ts.encode_size()
    }
}
