//! ICD-10 code rules
//!
//! A rule is either a category range within one letter (`X40-X44`, which
//! matches every subcode of X40 through X44) or a subcode range inside a
//! single category (`F11.1-F11.5`, which matches F111 through F115 and
//! nothing else, not even a bare F11). Rules have a textual form so rule
//! tables can live in configuration files.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MortReaderError;
use crate::models::icd10::Icd10Code;

/// One matching rule over structured ICD-10 codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CodeRule {
    /// Categories `first..=last` under `letter`, any subcode
    CategoryRange { letter: char, first: u8, last: u8 },
    /// Subcodes `first..=last` of one category; requires a subcode
    SubcodeRange {
        letter: char,
        category: u8,
        first: char,
        last: char,
    },
}

impl CodeRule {
    /// `X40-X44`
    #[must_use]
    pub const fn categories(letter: char, first: u8, last: u8) -> Self {
        Self::CategoryRange {
            letter,
            first,
            last,
        }
    }

    /// `X85`
    #[must_use]
    pub const fn category(letter: char, category: u8) -> Self {
        Self::categories(letter, category, category)
    }

    /// `F11.1-F11.5`
    #[must_use]
    pub const fn subcodes(letter: char, category: u8, first: char, last: char) -> Self {
        Self::SubcodeRange {
            letter,
            category,
            first,
            last,
        }
    }

    /// `D52.1`
    #[must_use]
    pub const fn subcode(letter: char, category: u8, subcode: char) -> Self {
        Self::subcodes(letter, category, subcode, subcode)
    }

    /// Check a parsed code against this rule
    #[must_use]
    pub fn matches(&self, code: &Icd10Code) -> bool {
        match *self {
            Self::CategoryRange {
                letter,
                first,
                last,
            } => code.letter == letter && (first..=last).contains(&code.category),
            Self::SubcodeRange {
                letter,
                category,
                first,
                last,
            } => {
                code.letter == letter
                    && code.category == category
                    && code.subcode.is_some_and(|sub| (first..=last).contains(&sub))
            }
        }
    }
}

impl fmt::Display for CodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CategoryRange {
                letter,
                first,
                last,
            } if first == last => write!(f, "{letter}{first:02}"),
            Self::CategoryRange {
                letter,
                first,
                last,
            } => write!(f, "{letter}{first:02}-{letter}{last:02}"),
            Self::SubcodeRange {
                letter,
                category,
                first,
                last,
            } if first == last => write!(f, "{letter}{category:02}.{first}"),
            Self::SubcodeRange {
                letter,
                category,
                first,
                last,
            } => write!(f, "{letter}{category:02}.{first}-{letter}{category:02}.{last}"),
        }
    }
}

impl FromStr for CodeRule {
    type Err = MortReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MortReaderError::InvalidCodeRule(s.to_string());

        let (low, high) = match s.split_once('-') {
            Some((low, high)) => (low, high),
            None => (s, s),
        };
        let low = Icd10Code::parse(low).ok_or_else(invalid)?;
        let high = Icd10Code::parse(high).ok_or_else(invalid)?;

        if low.letter != high.letter {
            return Err(invalid());
        }

        match (low.subcode, high.subcode) {
            (None, None) if low.category <= high.category => {
                Ok(Self::categories(low.letter, low.category, high.category))
            }
            (Some(first), Some(last)) if low.category == high.category && first <= last => {
                Ok(Self::subcodes(low.letter, low.category, first, last))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for CodeRule {
    type Error = MortReaderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CodeRule> for String {
    fn from(rule: CodeRule) -> Self {
        rule.to_string()
    }
}

/// An ordered list of rules; a code belongs to the set if any rule matches
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSet {
    rules: Vec<CodeRule>,
}

impl CodeSet {
    #[must_use]
    pub const fn new(rules: Vec<CodeRule>) -> Self {
        Self { rules }
    }

    /// Parse a list of textual rules
    pub fn parse<S: AsRef<str>>(rules: &[S]) -> crate::error::Result<Self> {
        rules
            .iter()
            .map(|rule| rule.as_ref().parse())
            .collect::<crate::error::Result<Vec<_>>>()
            .map(Self::new)
    }

    #[must_use]
    pub fn rules(&self) -> &[CodeRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check a parsed code
    #[must_use]
    pub fn contains(&self, code: &Icd10Code) -> bool {
        self.rules.iter().any(|rule| rule.matches(code))
    }

    /// Check a raw code string; malformed or empty codes never match
    #[must_use]
    pub fn contains_raw(&self, raw: &str) -> bool {
        Icd10Code::parse(raw).is_some_and(|code| self.contains(&code))
    }
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rules.iter().join(", "))
    }
}
