//! Per-territory aggregation of classified records
//!
//! Counters are created the first time a territory receives a record, so
//! "no counters" and "zero deaths" stay distinguishable until output.

pub mod report;
pub mod tally;

use rustc_hash::FxHashMap;

use crate::algorithm::classification::{Classification, DeathCategory};
use crate::models::record::{MannerOfDeath, Territory};
pub use report::{MortalityReport, RecordOutcome, ScanSummary};
pub use tally::{CodeTally, ResidentStatusBreakdown, StatusTally};

/// Running counters for one territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerritoryCounts {
    pub total_deaths: u64,
    pub drug_related_deaths: u64,
    pub overdose_deaths: u64,
    pub suicide_deaths: u64,
    /// Manner of death 1
    pub accidental_deaths: u64,
    /// Manner of death 3
    pub homicide_deaths: u64,
    /// Manner of death 7
    pub natural_deaths: u64,
}

impl TerritoryCounts {
    /// Count one record; each category at most once
    pub fn add(&mut self, classification: Classification, manner: MannerOfDeath) {
        for category in DeathCategory::all() {
            if classification.is(category) {
                *self.get_mut(category) += 1;
            }
        }

        match manner {
            MannerOfDeath::Accident => self.accidental_deaths += 1,
            MannerOfDeath::Homicide => self.homicide_deaths += 1,
            MannerOfDeath::Natural => self.natural_deaths += 1,
            _ => {}
        }
    }

    /// Counter for a reported category
    #[must_use]
    pub const fn get(&self, category: DeathCategory) -> u64 {
        match category {
            DeathCategory::Total => self.total_deaths,
            DeathCategory::DrugRelated => self.drug_related_deaths,
            DeathCategory::Overdose => self.overdose_deaths,
            DeathCategory::Suicide => self.suicide_deaths,
        }
    }

    fn get_mut(&mut self, category: DeathCategory) -> &mut u64 {
        match category {
            DeathCategory::Total => &mut self.total_deaths,
            DeathCategory::DrugRelated => &mut self.drug_related_deaths,
            DeathCategory::Overdose => &mut self.overdose_deaths,
            DeathCategory::Suicide => &mut self.suicide_deaths,
        }
    }

    /// Add another set of counters to this one
    pub fn merge(&mut self, other: &Self) {
        self.total_deaths += other.total_deaths;
        self.drug_related_deaths += other.drug_related_deaths;
        self.overdose_deaths += other.overdose_deaths;
        self.suicide_deaths += other.suicide_deaths;
        self.accidental_deaths += other.accidental_deaths;
        self.homicide_deaths += other.homicide_deaths;
        self.natural_deaths += other.natural_deaths;
    }
}

/// Territory code to counters, restricted to a configured territory list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryAccumulator {
    territories: Vec<Territory>,
    counts: FxHashMap<String, TerritoryCounts>,
    codes: FxHashMap<String, CodeTally>,
}

impl TerritoryAccumulator {
    /// Empty accumulator for the given territories, in output order
    #[must_use]
    pub fn new(territories: Vec<Territory>) -> Self {
        Self {
            territories,
            counts: FxHashMap::default(),
            codes: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    #[must_use]
    pub fn is_known(&self, code: &str) -> bool {
        self.territories.iter().any(|t| t.code == code)
    }

    /// Record one classified death
    ///
    /// Returns `false` without counting anything when the territory is not
    /// configured.
    pub fn record(
        &mut self,
        territory: &str,
        classification: Classification,
        manner: MannerOfDeath,
        underlying_cause: &str,
    ) -> bool {
        if !self.is_known(territory) {
            return false;
        }

        self.counts
            .entry(territory.to_string())
            .or_default()
            .add(classification, manner);

        let tally = self.codes.entry(territory.to_string()).or_default();
        if !underlying_cause.is_empty() {
            tally.add(underlying_cause);
        }

        true
    }

    /// Counters for a territory, `None` if it received no records
    #[must_use]
    pub fn counts(&self, territory: &str) -> Option<&TerritoryCounts> {
        self.counts.get(territory)
    }

    /// Underlying-cause tally for a territory
    #[must_use]
    pub fn code_tally(&self, territory: &str) -> Option<&CodeTally> {
        self.codes.get(territory)
    }

    /// Configured territories with their counters, in output order
    pub fn rows(&self) -> impl Iterator<Item = (&Territory, Option<&TerritoryCounts>)> {
        self.territories
            .iter()
            .map(|territory| (territory, self.counts.get(&territory.code)))
    }

    /// Sum over all territories
    #[must_use]
    pub fn totals(&self) -> TerritoryCounts {
        self.counts
            .values()
            .fold(TerritoryCounts::default(), |mut acc, counts| {
                acc.merge(counts);
                acc
            })
    }

    /// Fold another accumulator over the same territories into this one
    pub fn merge(&mut self, other: &Self) {
        for (code, counts) in &other.counts {
            if self.is_known(code) {
                self.counts.entry(code.clone()).or_default().merge(counts);
            }
        }
        for (code, tally) in &other.codes {
            if self.is_known(code) {
                self.codes.entry(code.clone()).or_default().merge(tally);
            }
        }
    }
}
