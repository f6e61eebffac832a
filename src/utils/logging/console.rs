//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use std::fmt::Write;

use crate::algorithm::aggregate::MortalityReport;
use crate::algorithm::classification::{ClassificationRules, DeathCategory};
use crate::config::MortalityConfig;
use crate::models::record::{MannerOfDeath, ResidentStatus};

const NAME_WIDTH: usize = 25;
const COLUMN_WIDTH: usize = 20;
const RULE_WIDTH: usize = NAME_WIDTH + 4 * (COLUMN_WIDTH + 1);

/// Drug-related codes listed per territory in the console report
pub const TOP_CODE_LIMIT: usize = 10;

/// Render the per-territory summary table, one column per death category
#[must_use]
pub fn format_summary_table(report: &MortalityReport) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<NAME_WIDTH$}", "Territory");
    for category in DeathCategory::all() {
        let _ = write!(out, " {category:>COLUMN_WIDTH$}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (territory, counts) in report.territories.rows() {
        let _ = write!(out, "{:<NAME_WIDTH$}", territory.name);
        for category in DeathCategory::all() {
            match counts {
                Some(c) => {
                    let _ = write!(out, " {:>COLUMN_WIDTH$}", c.get(category));
                }
                None => {
                    let _ = write!(out, " {:>COLUMN_WIDTH$}", "N/A");
                }
            }
        }
        let _ = writeln!(out);
    }

    out
}

/// Render the most frequent drug-related underlying causes of each territory
///
/// Codes count as drug-related when they fall in either the overdose or the
/// drug-induced set. Territories without such codes are left out.
#[must_use]
pub fn format_top_drug_codes(
    report: &MortalityReport,
    rules: &ClassificationRules,
    limit: usize,
) -> String {
    let mut out = String::new();

    for territory in report.territories.territories() {
        let Some(tally) = report.territories.code_tally(&territory.code) else {
            continue;
        };
        let top: Vec<_> = tally
            .sorted()
            .into_iter()
            .filter(|(code, _)| rules.is_drug_related_code(code) || rules.is_overdose_code(code))
            .take(limit)
            .collect();
        if top.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{territory}: top drug-related underlying causes");
        for (code, count) in top {
            let _ = writeln!(out, "  {code:<6} {count:>8}");
        }
    }

    out
}

/// Print scan totals, the manner-of-death breakdown and the summary table
pub fn print_scan_report(report: &MortalityReport, config: &MortalityConfig) {
    let banner = "=".repeat(RULE_WIDTH);
    let summary = &report.summary;

    println!("{banner}");
    println!("Records scanned:            {}", summary.records_scanned);
    println!("Records skipped:            {}", summary.records_skipped);
    println!("Foreign residents excluded: {}", summary.records_excluded);
    println!("Outside territories:        {}", summary.records_outside_territories);
    println!("Records aggregated:         {}", summary.records_aggregated);
    println!("{banner}");

    for (territory, counts) in report.territories.rows() {
        let Some(c) = counts else {
            println!("{territory}: No data found");
            continue;
        };
        println!("{territory}");
        for (manner, count) in [
            (MannerOfDeath::Accident, c.accidental_deaths),
            (MannerOfDeath::Homicide, c.homicide_deaths),
            (MannerOfDeath::Natural, c.natural_deaths),
        ] {
            println!("  {:<10} {count:>10}", manner.display_name());
        }
    }

    let top_codes = format_top_drug_codes(report, &config.rules, TOP_CODE_LIMIT);
    if !top_codes.is_empty() {
        println!("{banner}");
        print!("{top_codes}");
    }

    println!("{banner}");
    println!(
        "Deaths by resident status ({}):",
        config.resident_status_scope.description()
    );
    for status in ResidentStatus::all() {
        let tally = report.resident_status.get(status);
        println!(
            "  {:>8} total {:>8} overdose - {}",
            tally.total, tally.overdose, status
        );
    }

    println!("{banner}");
    print!("{}", format_summary_table(report));
}
