//! CSV serialization of a finished report
//!
//! Files are written to a temporary file next to the destination and moved
//! into place only once fully written.

use serde::{Serialize, Serializer};
use std::io::{self, Write};
use std::path::Path;

use crate::algorithm::aggregate::{MortalityReport, TerritoryCounts};
use crate::algorithm::classification::{ClassificationRules, DeathCategory};
use crate::config::{MissingTerritoryPolicy, MortalityConfig};
use crate::error::util::ensure_directory;
use crate::error::{MortReaderError, Result};

/// Marker written for territories that reported no records
pub const NOT_AVAILABLE: &str = "N/A";

/// Summary column order; never changes
pub const SUMMARY_COLUMNS: [&str; 5] = [
    "territory",
    DeathCategory::Total.column_name(),
    DeathCategory::DrugRelated.column_name(),
    DeathCategory::Overdose.column_name(),
    DeathCategory::Suicide.column_name(),
];

/// ICD-10 detail column order
pub const CODE_COLUMNS: [&str; 6] = [
    "territory",
    "icd10_code",
    "count",
    "is_overdose",
    "is_drug_related",
    "is_suicide",
];

/// A counter cell: a number, or the not-available marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCell {
    Count(u64),
    NotAvailable,
}

impl Serialize for CountCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    territory: &'a str,
    total_deaths: CountCell,
    drug_related_deaths: CountCell,
    overdose_deaths: CountCell,
    suicide_deaths: CountCell,
}

impl<'a> SummaryRow<'a> {
    fn new(territory: &'a str, counts: Option<&TerritoryCounts>) -> Self {
        let cell = |category| {
            counts.map_or(CountCell::NotAvailable, |c| CountCell::Count(c.get(category)))
        };
        Self {
            territory,
            total_deaths: cell(DeathCategory::Total),
            drug_related_deaths: cell(DeathCategory::DrugRelated),
            overdose_deaths: cell(DeathCategory::Overdose),
            suicide_deaths: cell(DeathCategory::Suicide),
        }
    }
}

#[derive(Debug, Serialize)]
struct CodeRow<'a> {
    territory: &'a str,
    icd10_code: &'a str,
    count: u64,
    is_overdose: &'static str,
    is_drug_related: &'static str,
    is_suicide: &'static str,
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

/// Write the per-territory summary table
///
/// One row per configured territory in configured order; territories with no
/// records follow `policy`.
pub fn write_summary<W: Write>(
    report: &MortalityReport,
    policy: MissingTerritoryPolicy,
    writer: W,
) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(SUMMARY_COLUMNS)?;

    let zero = TerritoryCounts::default();
    for (territory, counts) in report.territories.rows() {
        let counts = match (counts, policy) {
            (Some(c), _) => Some(c),
            (None, MissingTerritoryPolicy::NotAvailable) => None,
            (None, MissingTerritoryPolicy::Zero) => Some(&zero),
            (None, MissingTerritoryPolicy::Omit) => continue,
        };
        wtr.serialize(SummaryRow::new(&territory.code, counts))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write underlying-cause counts with their classification flags
pub fn write_code_detail<W: Write>(
    report: &MortalityReport,
    rules: &ClassificationRules,
    writer: W,
) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(CODE_COLUMNS)?;

    for territory in report.territories.territories() {
        let Some(tally) = report.territories.code_tally(&territory.code) else {
            continue;
        };
        for (code, count) in tally.sorted() {
            wtr.serialize(CodeRow {
                territory: &territory.code,
                icd10_code: code,
                count,
                is_overdose: yes_no(rules.is_overdose_code(code)),
                is_drug_related: yes_no(rules.is_drug_related_code(code)),
                is_suicide: yes_no(rules.is_suicide_code(code)),
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write through a temporary file in the destination directory, then rename
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut io::BufWriter<&mut tempfile::NamedTempFile>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_directory(dir, "csv output")?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| MortReaderError::io(dir, e))?;
    {
        let mut buffered = io::BufWriter::new(&mut tmp);
        write(&mut buffered)?;
        buffered.flush().map_err(|e| MortReaderError::io(path, e))?;
    }
    tmp.persist(path)?;
    Ok(())
}

/// Write the summary CSV for a report to `path`
pub fn write_summary_csv(
    report: &MortalityReport,
    config: &MortalityConfig,
    path: &Path,
) -> Result<()> {
    write_atomically(path, |out| write_summary(report, config.missing_territory, out))?;
    log::info!("Summary saved to: {}", path.display());
    Ok(())
}

/// Write the ICD-10 detail CSV for a report to `path`
pub fn write_code_detail_csv(
    report: &MortalityReport,
    config: &MortalityConfig,
    path: &Path,
) -> Result<()> {
    write_atomically(path, |out| write_code_detail(report, &config.rules, out))?;
    log::info!("ICD-10 codes saved to: {}", path.display());
    Ok(())
}
