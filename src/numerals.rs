//! Numeral formatters - Roman, bijective alphabetic and ordinal numbering.

use crate::model::NumberFormat;

const ROMAN_TABLE: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

const ORDINAL_WORDS: [&str; 20] = [
    "FIRST",
    "SECOND",
    "THIRD",
    "FOURTH",
    "FIFTH",
    "SIXTH",
    "SEVENTH",
    "EIGHTH",
    "NINTH",
    "TENTH",
    "ELEVENTH",
    "TWELFTH",
    "THIRTEENTH",
    "FOURTEENTH",
    "FIFTEENTH",
    "SIXTEENTH",
    "SEVENTEENTH",
    "EIGHTEENTH",
    "NINETEENTH",
    "TWENTIETH",
];

/// Formats a counter value according to a level's number format.
///
/// Bullets have no numeral; their glyph lives in the level text.
pub fn format_number(fmt: NumberFormat, val: u32) -> String {
    match fmt {
        NumberFormat::Decimal => val.to_string(),
        NumberFormat::UpperRoman => to_roman(val),
        NumberFormat::LowerRoman => to_roman(val).to_lowercase(),
        NumberFormat::UpperLetter => to_alpha(val, true),
        NumberFormat::LowerLetter => to_alpha(val, false),
        NumberFormat::Bullet => String::new(),
    }
}

/// Converts a number to an upper-case Roman numeral.
///
/// Zero has no Roman form and falls back to `"0"`.
pub fn to_roman(mut num: u32) -> String {
    if num == 0 {
        return num.to_string();
    }
    let mut result = String::new();
    for &(v, s) in ROMAN_TABLE {
        while num >= v {
            result.push_str(s);
            num -= v;
        }
    }
    result
}

/// Converts a number to bijective base-26 letters (1 -> A, 26 -> Z, 27 -> AA).
///
/// Zero has no letter form and falls back to `"0"`.
pub fn to_alpha(num: u32, upper: bool) -> String {
    if num == 0 {
        return num.to_string();
    }
    let base = if upper { b'A' } else { b'a' };
    let mut letters = Vec::new();
    let mut n = num;
    while n > 0 {
        n -= 1;
        letters.push(char::from(base + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Ordinal suffix for a number; 11-13 (and 111-113, ...) always take `TH`.
pub fn ordinal_suffix(num: u32) -> &'static str {
    if (11..=13).contains(&(num % 100)) {
        return "TH";
    }
    match num % 10 {
        1 => "ST",
        2 => "ND",
        3 => "RD",
        _ => "TH",
    }
}

/// Ordinal for a number: words up to twenty (`THIRTEENTH`), numeric beyond (`21ST`).
pub fn to_ordinal(num: u32) -> String {
    match num {
        1..=20 => ORDINAL_WORDS[(num - 1) as usize].to_string(),
        _ => format!("{}{}", num, ordinal_suffix(num)),
    }
}
