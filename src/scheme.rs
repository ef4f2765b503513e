//! Plain-text numbering schemes for export paths without native list support.
//!
//! Prefixes are stamped straight onto heading text as `"{prefix}\t{text}"`.

use log::warn;
use std::str::FromStr;

use crate::error::Error;
use crate::model::NumberFormat;
use crate::numerals::format_number;

/// Heading depth covered by the plain-text schemes.
pub const SCHEME_DEPTH: usize = 5;

/// Plain-text numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NumberingScheme {
    /// I. / A. / 1. / (a) / (i)
    Roman,
    /// 1. / a. / (1) / (a) / (i)
    #[default]
    Decimal,
    /// A. / 1. / a. / (1) / (a)
    Legal,
    /// Headings pass through unchanged.
    None,
}

#[derive(Debug, Clone, Copy)]
enum Wrap {
    Dot,
    Parens,
}

impl NumberingScheme {
    fn level_format(&self, idx: usize) -> Option<(NumberFormat, Wrap)> {
        use NumberFormat::*;
        let table: [(NumberFormat, Wrap); SCHEME_DEPTH] = match self {
            NumberingScheme::Roman => [
                (UpperRoman, Wrap::Dot),
                (UpperLetter, Wrap::Dot),
                (Decimal, Wrap::Dot),
                (LowerLetter, Wrap::Parens),
                (LowerRoman, Wrap::Parens),
            ],
            NumberingScheme::Decimal => [
                (Decimal, Wrap::Dot),
                (LowerLetter, Wrap::Dot),
                (Decimal, Wrap::Parens),
                (LowerLetter, Wrap::Parens),
                (LowerRoman, Wrap::Parens),
            ],
            NumberingScheme::Legal => [
                (UpperLetter, Wrap::Dot),
                (Decimal, Wrap::Dot),
                (LowerLetter, Wrap::Dot),
                (Decimal, Wrap::Parens),
                (LowerLetter, Wrap::Parens),
            ],
            NumberingScheme::None => return None,
        };
        table.get(idx).copied()
    }
}

impl FromStr for NumberingScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "roman" => Ok(NumberingScheme::Roman),
            "decimal" => Ok(NumberingScheme::Decimal),
            "legal" => Ok(NumberingScheme::Legal),
            "none" => Ok(NumberingScheme::None),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// A heading at a 1-based level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
}

impl Heading {
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Stamps scheme prefixes onto a sequence of headings.
#[derive(Debug, Clone, Default)]
pub struct HeadingNumberer {
    scheme: NumberingScheme,
    counters: [u32; SCHEME_DEPTH],
}

impl HeadingNumberer {
    pub fn new(scheme: NumberingScheme) -> Self {
        Self {
            scheme,
            counters: [0; SCHEME_DEPTH],
        }
    }

    pub fn scheme(&self) -> NumberingScheme {
        self.scheme
    }

    /// Current counter values, shallowest first.
    pub fn counters(&self) -> &[u32; SCHEME_DEPTH] {
        &self.counters
    }

    /// Advances the counters for a heading at `level` and returns its prefix.
    ///
    /// Returns `None` for the `None` scheme and for levels outside 1-5; the
    /// counters are left untouched in both cases.
    pub fn next_prefix(&mut self, level: usize) -> Option<String> {
        if self.scheme == NumberingScheme::None {
            return None;
        }
        if !(1..=SCHEME_DEPTH).contains(&level) {
            warn!(
                "Heading level {} is outside 1-{}; leaving it unnumbered",
                level, SCHEME_DEPTH
            );
            return None;
        }

        let idx = level - 1;
        self.counters[idx] += 1;
        for deeper in &mut self.counters[idx + 1..] {
            *deeper = 0;
        }

        let (fmt, wrap) = self.scheme.level_format(idx)?;
        let numeral = format_number(fmt, self.counters[idx]);
        Some(match wrap {
            Wrap::Dot => format!("{}.", numeral),
            Wrap::Parens => format!("({})", numeral),
        })
    }

    /// Prepends the next prefix to `text`, keeping a leading newline in front.
    pub fn number_heading(&mut self, level: usize, text: &str) -> String {
        let Some(prefix) = self.next_prefix(level) else {
            return text.to_string();
        };
        match text.strip_prefix('\n') {
            Some(rest) => format!("\n{}\t{}", prefix, rest),
            None => format!("{}\t{}", prefix, text),
        }
    }

    pub fn reset(&mut self) {
        self.counters = [0; SCHEME_DEPTH];
    }
}

/// Numbers every heading in order under `scheme`.
pub fn apply_scheme(scheme: NumberingScheme, headings: &[Heading]) -> Vec<String> {
    let mut numberer = HeadingNumberer::new(scheme);
    headings
        .iter()
        .map(|h| numberer.number_heading(h.level, &h.text))
        .collect()
}
