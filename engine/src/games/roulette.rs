//! European roulette: selection parsing, wheel color, and payout units.
//!
//! Payout units multiply the bet and include the returned stake:
//! straight 36, even-money bets (color/parity/range) 2, dozen/column 3.

use parlor_types::WheelColor;

/// Red numbers on a European wheel.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// A parsed roulette selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Single number 0..=36.
    Straight(u8),
    Red,
    Black,
    Even,
    Odd,
    /// 1..=18.
    Low,
    /// 19..=36.
    High,
    /// Dozen 1..=3 (1-12, 13-24, 25-36).
    Dozen(u8),
    /// Column 1..=3 (by `n mod 3`, with 3 for multiples of three).
    Column(u8),
}

/// Parse a player-typed selection. Returns `None` for anything the table
/// does not offer; no funds move on a parse failure.
pub fn parse_selection(text: &str) -> Option<Selection> {
    let s = text.trim().to_ascii_lowercase();
    if let Ok(number) = s.parse::<u8>() {
        return (number <= 36).then_some(Selection::Straight(number));
    }
    match s.as_str() {
        "red" | "r" => Some(Selection::Red),
        "black" | "b" => Some(Selection::Black),
        "even" | "ev" => Some(Selection::Even),
        "odd" | "od" => Some(Selection::Odd),
        "low" | "low18" | "1-18" | "1to18" => Some(Selection::Low),
        "high" | "hi" | "19-36" | "19to36" => Some(Selection::High),
        "1st12" | "first12" | "dozen1" | "1st dozen" | "first dozen" => Some(Selection::Dozen(1)),
        "2nd12" | "second12" | "dozen2" | "2nd dozen" | "second dozen" => Some(Selection::Dozen(2)),
        "3rd12" | "third12" | "dozen3" | "3rd dozen" | "third dozen" => Some(Selection::Dozen(3)),
        "1st" | "first" | "col1" | "column1" => Some(Selection::Column(1)),
        "2nd" | "second" | "col2" | "column2" => Some(Selection::Column(2)),
        "3rd" | "third" | "col3" | "column3" => Some(Selection::Column(3)),
        _ => None,
    }
}

/// Color of a pocket: zero is green, the rest follow the fixed red set.
pub fn wheel_color(number: u8) -> WheelColor {
    if number == 0 {
        WheelColor::Green
    } else if RED_NUMBERS.contains(&number) {
        WheelColor::Red
    } else {
        WheelColor::Black
    }
}

fn dozen_of(number: u8) -> Option<u8> {
    match number {
        1..=12 => Some(1),
        13..=24 => Some(2),
        25..=36 => Some(3),
        _ => None,
    }
}

fn column_of(number: u8) -> Option<u8> {
    if number == 0 || number > 36 {
        return None;
    }
    match number % 3 {
        0 => Some(3),
        r => Some(r),
    }
}

/// Stake-inclusive payout units for a selection against the drawn number.
pub fn payout_units(selection: Selection, number: u8) -> u64 {
    match selection {
        Selection::Straight(pick) => {
            if pick == number {
                36
            } else {
                0
            }
        }
        Selection::Red => {
            if wheel_color(number) == WheelColor::Red {
                2
            } else {
                0
            }
        }
        Selection::Black => {
            if wheel_color(number) == WheelColor::Black {
                2
            } else {
                0
            }
        }
        Selection::Even => {
            if number != 0 && number % 2 == 0 {
                2
            } else {
                0
            }
        }
        Selection::Odd => {
            if number % 2 == 1 {
                2
            } else {
                0
            }
        }
        Selection::Low => {
            if (1..=18).contains(&number) {
                2
            } else {
                0
            }
        }
        Selection::High => {
            if (19..=36).contains(&number) {
                2
            } else {
                0
            }
        }
        Selection::Dozen(pick) => {
            if dozen_of(number) == Some(pick) {
                3
            } else {
                0
            }
        }
        Selection::Column(pick) => {
            if column_of(number) == Some(pick) {
                3
            } else {
                0
            }
        }
    }
}
