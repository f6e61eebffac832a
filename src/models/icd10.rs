//! Structured ICD-10 codes
//!
//! Codes in the mortality files are stored without the decimal point
//! (`X42`, `F141`, `Y870`). Configuration and documentation usually write
//! them with it (`F14.1`, `Y87.0`). Both forms parse to the same value.

use std::fmt;
use std::str::FromStr;

/// An ICD-10 code split into letter, two-digit category and optional subcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Icd10Code {
    /// Chapter letter, always uppercase
    pub letter: char,
    /// Numeric category (00-99)
    pub category: u8,
    /// Single subcode character following the category, if any
    pub subcode: Option<char>,
}

impl Icd10Code {
    #[must_use]
    pub const fn new(letter: char, category: u8, subcode: Option<char>) -> Self {
        Self {
            letter,
            category,
            subcode,
        }
    }

    /// Parse a raw code, returning `None` for anything malformed or empty
    ///
    /// Accepted: a letter, two digits, then optionally a `.` and a single
    /// alphanumeric subcode. Surrounding whitespace is ignored and lowercase
    /// input is normalized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.trim();
        let mut chars = code.chars();

        let letter = chars.next()?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return None;
        }

        let tens = chars.next()?.to_digit(10)?;
        let ones = chars.next()?.to_digit(10)?;
        let category = u8::try_from(tens * 10 + ones).ok()?;

        let rest = chars.as_str();
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        let mut rest_chars = rest.chars();
        let subcode = match (rest_chars.next(), rest_chars.next()) {
            (None, None) => None,
            (Some(c), None) if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase()),
            _ => return None,
        };

        // "X42." is not a code
        if subcode.is_none() && code.ends_with('.') {
            return None;
        }

        Some(Self {
            letter,
            category,
            subcode,
        })
    }
}

impl FromStr for Icd10Code {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not an ICD-10 code: {s:?}"))
    }
}

impl fmt::Display for Icd10Code {
    /// Dotted form: `F14.1`, or `X42` without a subcode
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subcode {
            Some(sub) => write!(f, "{}{:02}.{}", self.letter, self.category, sub),
            None => write!(f, "{}{:02}", self.letter, self.category),
        }
    }
}
