//! Auxiliary tallies collected alongside the territory counters

use rustc_hash::FxHashMap;

use crate::models::record::ResidentStatus;

/// Records per underlying-cause code within one territory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTally {
    counts: FxHashMap<String, u64>,
}

impl CodeTally {
    pub fn add(&mut self, code: &str) {
        *self.counts.entry(code.to_string()).or_default() += 1;
    }

    #[must_use]
    pub fn count(&self, code: &str) -> u64 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn merge(&mut self, other: &Self) {
        for (code, count) in &other.counts {
            *self.counts.entry(code.clone()).or_default() += count;
        }
    }

    /// Codes by descending count, ties broken by code
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Deaths and overdose deaths for one resident status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTally {
    pub total: u64,
    pub overdose: u64,
}

/// Totals by resident status, taken before the foreign-resident filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResidentStatusBreakdown {
    by_status: FxHashMap<ResidentStatus, StatusTally>,
}

impl ResidentStatusBreakdown {
    pub fn add(&mut self, status: ResidentStatus, overdose: bool) {
        let tally = self.by_status.entry(status).or_default();
        tally.total += 1;
        tally.overdose += u64::from(overdose);
    }

    #[must_use]
    pub fn get(&self, status: ResidentStatus) -> StatusTally {
        self.by_status.get(&status).copied().unwrap_or_default()
    }

    /// Sum over every status
    #[must_use]
    pub fn total(&self) -> StatusTally {
        self.by_status
            .values()
            .fold(StatusTally::default(), |acc, t| StatusTally {
                total: acc.total + t.total,
                overdose: acc.overdose + t.overdose,
            })
    }

    /// Sum over every status except `excluded`
    #[must_use]
    pub fn total_excluding(&self, excluded: ResidentStatus) -> StatusTally {
        let all = self.total();
        let skip = self.get(excluded);
        StatusTally {
            total: all.total - skip.total,
            overdose: all.overdose - skip.overdose,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        for (status, tally) in &other.by_status {
            let entry = self.by_status.entry(*status).or_default();
            entry.total += tally.total;
            entry.overdose += tally.overdose;
        }
    }
}
