//! Decoded mortality records
//!
//! One `MortalityRecord` is produced per input line and dropped once it has
//! been classified and aggregated.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;


/// Upper bound on record-axis conditions in the public-use layout
pub const MAX_CONTRIBUTING_CAUSES: usize = 20;

/// Contributing-cause codes of a record, inline up to the common case
pub type ContributingCauses = SmallVec<[String; 8]>;

/// A reporting territory: postal code plus display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    /// Two-letter postal code as it appears in the data file
    pub code: String,
    /// Display name
    pub name: String,
}

impl Territory {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// The five US territories in reporting order
    #[must_use]
    pub fn us_territories() -> Vec<Self> {
        vec![
            Self::new("PR", "Puerto Rico"),
            Self::new("GU", "Guam"),
            Self::new("VI", "Virgin Islands"),
            Self::new("AS", "American Samoa"),
            Self::new("MP", "Northern Mariana Islands"),
        ]
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Resident status (position 20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidentStatus {
    /// Occurrence and residence in the same state and county
    Resident = 1,
    /// Same state, different county
    IntrastateNonresident = 2,
    /// Different states, both in the US
    InterstateNonresident = 3,
    /// Occurred in the US, residence outside the US
    ForeignResident = 4,
    /// Blank or unrecognized value
    Unknown = 0,
}

impl ResidentStatus {
    /// Convert the raw one-character field
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Resident,
            "2" => Self::IntrastateNonresident,
            "3" => Self::InterstateNonresident,
            "4" => Self::ForeignResident,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Resident => "Residents (same state/county)",
            Self::IntrastateNonresident => "Intrastate nonresidents (same state, different county)",
            Self::InterstateNonresident => "Interstate nonresidents (different state, both US)",
            Self::ForeignResident => "Foreign residents (occurred in US, lives abroad)",
            Self::Unknown => "Unknown/Missing",
        }
    }

    /// All statuses in report order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Resident,
            Self::IntrastateNonresident,
            Self::InterstateNonresident,
            Self::ForeignResident,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for ResidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Manner of death (position 107)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MannerOfDeath {
    Accident,
    Suicide,
    Homicide,
    PendingInvestigation,
    CouldNotDetermine,
    SelfInflicted,
    Natural,
    NotSpecified,
}

impl MannerOfDeath {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Accident,
            "2" => Self::Suicide,
            "3" => Self::Homicide,
            "4" => Self::PendingInvestigation,
            "5" => Self::CouldNotDetermine,
            "6" => Self::SelfInflicted,
            "7" => Self::Natural,
            _ => Self::NotSpecified,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Accident => "Accident",
            Self::Suicide => "Suicide",
            Self::Homicide => "Homicide",
            Self::PendingInvestigation => "Pending investigation",
            Self::CouldNotDetermine => "Could not determine",
            Self::SelfInflicted => "Self-Inflicted",
            Self::Natural => "Natural",
            Self::NotSpecified => "Not specified",
        }
    }
}

/// One decoded line of a mortality file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortalityRecord {
    /// State or territory of occurrence
    pub state_of_occurrence: String,
    /// State or territory of residence
    pub state_of_residence: String,
    /// Raw resident status code
    pub resident_status: String,
    /// Raw manner of death code
    pub manner_of_death: String,
    /// Underlying cause of death, empty when absent
    pub underlying_cause: String,
    /// Record-axis (contributing) conditions in file order
    pub contributing_causes: ContributingCauses,
}

impl MortalityRecord {
    #[must_use]
    pub fn resident_status(&self) -> ResidentStatus {
        ResidentStatus::from_code(&self.resident_status)
    }

    #[must_use]
    pub fn manner(&self) -> MannerOfDeath {
        MannerOfDeath::from_code(&self.manner_of_death)
    }

    #[must_use]
    pub fn is_foreign_resident(&self) -> bool {
        self.resident_status() == ResidentStatus::ForeignResident
    }
}
