//! Six-line binary code (a hexagram).
//!
//! ```text
//! "100010"  →  position: 0 1 2 3 4 5
//!              line:     1 0 0 0 1 0
//!              bit:      5 4 3 2 1 0   →  0b100010
//! ```
//!
//! Position 0 is the first character of the literal. The upper trigram is
//! positions 0..=2, the lower trigram positions 3..=5, and the nuclear window
//! positions 1..=4.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of lines in a code.
pub const LINES: usize = 6;

const ALL_LINES: u8 = 0b11_1111;

/// A validated six-line binary code.
///
/// Lines are packed into the low six bits of a `u8`, most significant bit
/// first, so the textual form and the binary literal read the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(u8);

impl Code {
    /// Build a code from its bit mask. Bits above the sixth are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & ALL_LINES)
    }

    /// Parse a six-character string of `'0'` / `'1'`.
    pub fn parse(s: &str) -> Result<Self> {
        let got = s.chars().count();
        if got != LINES {
            return Err(Error::InvalidLength { expected: LINES, got });
        }

        let mut bits = 0u8;
        for (position, symbol) in s.chars().enumerate() {
            match symbol {
                '1' => bits |= line_mask(position),
                '0' => {}
                _ => return Err(Error::InvalidSymbol { position, symbol }),
            }
        }
        Ok(Self(bits))
    }

    /// The packed bit mask (`0..=63`).
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the line at `position` is solid (`'1'`), or `None` past the
    /// sixth line.
    pub fn line(self, position: usize) -> Option<bool> {
        (position < LINES).then(|| self.0 & line_mask(position) != 0)
    }

    /// All six lines in position order.
    pub fn lines(self) -> [bool; LINES] {
        std::array::from_fn(|position| self.0 & line_mask(position) != 0)
    }

    /// Positions 0..=2 as a 3-bit mask.
    pub const fn upper_trigram(self) -> u8 {
        self.0 >> 3
    }

    /// Positions 3..=5 as a 3-bit mask.
    pub const fn lower_trigram(self) -> u8 {
        self.0 & 0b111
    }

    /// Positions 1..=4 (the inner four lines) as a 4-bit mask.
    pub const fn nuclear(self) -> u8 {
        (self.0 >> 1) & 0b1111
    }
}

/// Bit for a line position; position 0 is the most significant of the six.
#[inline(always)]
pub(crate) const fn line_mask(position: usize) -> u8 {
    1 << (LINES - 1 - position)
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            f.write_str(if line { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}
