//! Scan results
//!
//! `MortalityReport` is the explicit accumulator threaded through a scan. It
//! holds no global state, so one report can absorb several input files and
//! independent reports can be built side by side.

use crate::algorithm::aggregate::TerritoryAccumulator;
use crate::algorithm::aggregate::tally::ResidentStatusBreakdown;
use crate::config::MortalityConfig;
use crate::models::record::MortalityRecord;

/// What happened to one decoded record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Counted for its territory
    Aggregated,
    /// Foreign resident, excluded from every counter
    ExcludedForeignResident,
    /// Territory not in the configured list
    OutsideTerritories,
}

/// Record counts for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Lines read
    pub records_scanned: u64,
    /// Lines that could not be decoded
    pub records_skipped: u64,
    /// Foreign residents left out of aggregation
    pub records_excluded: u64,
    /// Records for territories outside the configured list
    pub records_outside_territories: u64,
    /// Records counted in a territory
    pub records_aggregated: u64,
}

impl ScanSummary {
    /// Count a decoded record
    pub fn record_outcome(&mut self, outcome: RecordOutcome) {
        self.records_scanned += 1;
        match outcome {
            RecordOutcome::Aggregated => self.records_aggregated += 1,
            RecordOutcome::ExcludedForeignResident => self.records_excluded += 1,
            RecordOutcome::OutsideTerritories => self.records_outside_territories += 1,
        }
    }

    /// Count a line that failed to decode
    pub fn record_skipped(&mut self) {
        self.records_scanned += 1;
        self.records_skipped += 1;
    }

    pub fn merge(&mut self, other: &Self) {
        self.records_scanned += other.records_scanned;
        self.records_skipped += other.records_skipped;
        self.records_excluded += other.records_excluded;
        self.records_outside_territories += other.records_outside_territories;
        self.records_aggregated += other.records_aggregated;
    }
}

/// Everything a scan produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortalityReport {
    pub summary: ScanSummary,
    pub territories: TerritoryAccumulator,
    pub resident_status: ResidentStatusBreakdown,
}

impl MortalityReport {
    /// Empty report for the configured territories
    #[must_use]
    pub fn new(config: &MortalityConfig) -> Self {
        Self {
            summary: ScanSummary::default(),
            territories: TerritoryAccumulator::new(config.territories.clone()),
            resident_status: ResidentStatusBreakdown::default(),
        }
    }

    /// Filter, classify and count one record
    ///
    /// The resident-status breakdown sees every record its configured scope
    /// covers, before any filter. For the territory counters the territory
    /// check comes first, then the foreign-resident filter.
    pub fn ingest(&mut self, record: &MortalityRecord, config: &MortalityConfig) -> RecordOutcome {
        let territory = config.territory_basis.territory_of(record);
        let in_territory = self.territories.is_known(territory);
        let classification = config.rules.classify(record, config.use_multiple_causes);

        if config.resident_status_scope.includes(in_territory) {
            self.resident_status
                .add(record.resident_status(), classification.overdose);
        }

        let outcome = if !in_territory {
            RecordOutcome::OutsideTerritories
        } else if config.exclude_foreign_residents && record.is_foreign_resident() {
            RecordOutcome::ExcludedForeignResident
        } else {
            self.territories.record(
                territory,
                classification,
                record.manner(),
                &record.underlying_cause,
            );
            RecordOutcome::Aggregated
        };

        self.summary.record_outcome(outcome);
        outcome
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &Self) {
        self.summary.merge(&other.summary);
        self.territories.merge(&other.territories);
        self.resident_status.merge(&other.resident_status);
    }
}
