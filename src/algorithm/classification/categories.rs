//! Death categories reported per territory

use std::fmt;

/// Statistical categories a death can be counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCategory {
    /// Every aggregated death
    Total,
    /// Drug-induced causes, including overdoses
    DrugRelated,
    /// Drug poisoning of any intent
    Overdose,
    /// Manner of death suicide or intentional self-harm codes
    Suicide,
}

impl DeathCategory {
    /// Column name used in CSV output
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Total => "total_deaths",
            Self::DrugRelated => "drug_related_deaths",
            Self::Overdose => "overdose_deaths",
            Self::Suicide => "suicide_deaths",
        }
    }

    /// Get the display name for this category
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Total => "Total Deaths",
            Self::DrugRelated => "Drug-Related Deaths",
            Self::Overdose => "Overdose Deaths",
            Self::Suicide => "Suicide Deaths",
        }
    }

    /// All categories in output column order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Total, Self::DrugRelated, Self::Overdose, Self::Suicide]
    }
}

impl fmt::Display for DeathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}
