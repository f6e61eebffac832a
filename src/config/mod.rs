//! Configuration for mortality file processing
//!
//! Defaults reproduce the territory methodology: state of occurrence, the
//! five US territories, foreign residents excluded, multiple causes counted.
//! Every field can be overridden from a JSON file; missing keys keep their
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::classification::ClassificationRules;
use crate::error::util::safe_read_to_string;
use crate::error::{MortReaderError, Result};
use crate::models::record::{MortalityRecord, Territory};
use crate::schema::layout::RecordLayout;

/// Which geography field assigns a record to a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerritoryBasis {
    /// Where the death occurred (CDC VSRR methodology)
    #[default]
    Occurrence,
    /// Where the decedent lived
    Residence,
}

impl TerritoryBasis {
    /// Territory code of a record under this basis
    #[must_use]
    pub fn territory_of(self, record: &MortalityRecord) -> &str {
        match self {
            Self::Occurrence => &record.state_of_occurrence,
            Self::Residence => &record.state_of_residence,
        }
    }
}

/// How territories without any records appear in output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTerritoryPolicy {
    /// A row with `N/A` in every counter
    #[default]
    NotAvailable,
    /// A row of zeros
    Zero,
    /// No row
    Omit,
}

/// Which records feed the resident-status breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidentStatusScope {
    /// Every record outside the configured territories, for comparison
    /// against national published totals
    #[default]
    National,
    /// Records in the configured territories
    Territories,
    /// Every decoded record
    All,
}

impl ResidentStatusScope {
    /// Whether a record counts, given whether its territory is configured
    #[must_use]
    pub const fn includes(self, in_territory: bool) -> bool {
        match self {
            Self::National => !in_territory,
            Self::Territories => in_territory,
            Self::All => true,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::National => "outside configured territories",
            Self::Territories => "configured territories",
            Self::All => "all records",
        }
    }
}

/// Configuration for a mortality scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortalityConfig {
    /// Territories to aggregate, in output order
    pub territories: Vec<Territory>,
    /// Geography used to assign records to territories
    pub territory_basis: TerritoryBasis,
    /// Drop resident status 4 before classification
    pub exclude_foreign_residents: bool,
    /// Examine contributing causes as well as the underlying cause
    pub use_multiple_causes: bool,
    /// Output treatment of territories with no records
    pub missing_territory: MissingTerritoryPolicy,
    /// Records tallied by resident status
    pub resident_status_scope: ResidentStatusScope,
    /// Code tables for the predicates
    pub rules: ClassificationRules,
    /// Fixed-width field offsets
    pub layout: RecordLayout,
    /// Show a progress spinner during the scan
    pub show_progress: bool,
    /// Malformed records logged at warn level before switching to debug
    pub max_logged_malformed: u64,
}

impl Default for MortalityConfig {
    fn default() -> Self {
        Self {
            territories: Territory::us_territories(),
            territory_basis: TerritoryBasis::Occurrence,
            exclude_foreign_residents: true,
            use_multiple_causes: true,
            missing_territory: MissingTerritoryPolicy::NotAvailable,
            resident_status_scope: ResidentStatusScope::National,
            rules: ClassificationRules::standard(),
            layout: RecordLayout::cdc_2023(),
            show_progress: false,
            max_logged_malformed: 10,
        }
    }
}

impl MortalityConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "mortality configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration before a scan starts
    pub fn validate(&self) -> Result<()> {
        if self.territories.is_empty() {
            return Err(MortReaderError::config("no territories configured"));
        }

        for (i, territory) in self.territories.iter().enumerate() {
            if territory.code.trim().is_empty() {
                return Err(MortReaderError::config(format!(
                    "territory {} has an empty code",
                    territory.name
                )));
            }
            if self.territories[..i].iter().any(|t| t.code == territory.code) {
                return Err(MortReaderError::config(format!(
                    "territory code {} is listed twice",
                    territory.code
                )));
            }
        }

        self.layout.validate()
    }

    /// Set the territories to aggregate
    #[must_use]
    pub fn with_territories(mut self, territories: Vec<Territory>) -> Self {
        self.territories = territories;
        self
    }

    /// Set the geography basis
    #[must_use]
    pub fn with_territory_basis(mut self, basis: TerritoryBasis) -> Self {
        self.territory_basis = basis;
        self
    }

    /// Keep or drop foreign residents
    #[must_use]
    pub fn with_foreign_residents_excluded(mut self, exclude: bool) -> Self {
        self.exclude_foreign_residents = exclude;
        self
    }

    /// Count contributing causes, or only the underlying cause
    #[must_use]
    pub fn with_multiple_causes(mut self, enabled: bool) -> Self {
        self.use_multiple_causes = enabled;
        self
    }

    /// Set the missing-territory output policy
    #[must_use]
    pub fn with_missing_territory(mut self, policy: MissingTerritoryPolicy) -> Self {
        self.missing_territory = policy;
        self
    }

    /// Choose which records the resident-status breakdown covers
    #[must_use]
    pub fn with_resident_status_scope(mut self, scope: ResidentStatusScope) -> Self {
        self.resident_status_scope = scope;
        self
    }

    /// Replace the classification rule tables
    #[must_use]
    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Enable or disable the progress spinner
    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}
