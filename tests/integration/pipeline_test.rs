//! End-to-end tests: fixture file in, CSV files out

use std::fs;
use std::path::Path;

use mort_reader::{
    MissingTerritoryPolicy, MortReaderError, MortalityConfig, MortalityReport, process_file,
    process_files, write_code_detail_csv, write_summary_csv,
};

use crate::utils::{RecordBuilder, file_content, fixtures_dir};

fn reference_path() -> std::path::PathBuf {
    fixtures_dir().join("reference_sample.txt")
}

fn write_outputs(
    report: &MortalityReport,
    config: &MortalityConfig,
    dir: &Path,
) -> (String, String) {
    let summary = dir.join("territory_mortality_summary_2023.csv");
    let codes = dir.join("territory_icd10_codes_2023.csv");
    write_summary_csv(report, config, &summary).unwrap();
    write_code_detail_csv(report, config, &codes).unwrap();
    (
        fs::read_to_string(summary).unwrap(),
        fs::read_to_string(codes).unwrap(),
    )
}

#[test]
fn test_reference_fixture_counts() {
    let config = MortalityConfig::default();
    let report = process_file(&reference_path(), &config).unwrap();

    let summary = report.summary;
    assert_eq!(summary.records_scanned, 13);
    assert_eq!(summary.records_skipped, 1);
    assert_eq!(summary.records_excluded, 2);
    assert_eq!(summary.records_outside_territories, 1);
    assert_eq!(summary.records_aggregated, 9);

    let totals = report.territories.totals();
    assert_eq!(totals.total_deaths, 9);
    assert_eq!(totals.drug_related_deaths, 4);
    assert_eq!(totals.overdose_deaths, 4);
    assert_eq!(totals.suicide_deaths, 2);
    assert_eq!(totals.homicide_deaths, 2);
}

#[test]
fn test_reference_fixture_with_foreign_residents() {
    let config = MortalityConfig::default().with_foreign_residents_excluded(false);
    let report = process_file(&reference_path(), &config).unwrap();

    let totals = report.territories.totals();
    assert_eq!(totals.total_deaths, 11);
    assert_eq!(totals.overdose_deaths, 5);
    assert_eq!(report.territories.counts("PR").unwrap().total_deaths, 5);
    assert_eq!(report.territories.counts("GU").unwrap().total_deaths, 3);
}

#[test]
fn test_reference_fixture_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = MortalityConfig::default();
    let report = process_file(&reference_path(), &config).unwrap();
    let (summary, codes) = write_outputs(&report, &config, dir.path());

    assert_eq!(
        summary,
        "territory,total_deaths,drug_related_deaths,overdose_deaths,suicide_deaths\n\
         PR,4,2,2,1\n\
         GU,2,1,1,1\n\
         VI,2,0,0,0\n\
         AS,N/A,N/A,N/A,N/A\n\
         MP,1,1,1,0\n"
    );

    let pr_rows: Vec<_> = codes.lines().filter(|l| l.starts_with("PR,")).collect();
    assert_eq!(
        pr_rows,
        [
            "PR,I219,1,No,No,No",
            "PR,X42,1,Yes,Yes,No",
            "PR,X70,1,No,No,Yes",
            "PR,Y12,1,Yes,Yes,No",
        ]
    );
    assert!(codes.contains("GU,X64,1,Yes,Yes,Yes\n"));
    assert!(!codes.contains("AS,"));
    assert!(!codes.contains("TX,"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let config = MortalityConfig::default();
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();

    let first = write_outputs(
        &process_file(&reference_path(), &config).unwrap(),
        &config,
        first_dir.path(),
    );
    let second = write_outputs(
        &process_file(&reference_path(), &config).unwrap(),
        &config,
        second_dir.path(),
    );
    assert_eq!(first, second);
}

#[test]
fn test_no_territory_records_gives_all_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mainland.txt");
    fs::write(
        &input,
        file_content(&[
            RecordBuilder::new("CA").underlying("X42"),
            RecordBuilder::new("NY").underlying("I219"),
        ]),
    )
    .unwrap();

    let config = MortalityConfig::default();
    let report = process_file(&input, &config).unwrap();
    let (summary, codes) = write_outputs(&report, &config, dir.path());

    let rows: Vec<_> = summary.lines().skip(1).collect();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.ends_with(",N/A,N/A,N/A,N/A")));
    assert_eq!(codes.lines().count(), 1);
}

#[test]
fn test_zero_policy_writes_zero_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = MortalityConfig::default().with_missing_territory(MissingTerritoryPolicy::Zero);
    let report = process_file(&reference_path(), &config).unwrap();
    let (summary, _) = write_outputs(&report, &config, dir.path());
    assert!(summary.contains("\nAS,0,0,0,0\n"));
}

#[test]
fn test_multiple_files_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let extra = dir.path().join("extra.txt");
    fs::write(
        &extra,
        file_content(&[RecordBuilder::new("AS").manner("1").underlying("X41")]),
    )
    .unwrap();

    let config = MortalityConfig::default();
    let report = process_files(&[reference_path(), extra], &config).unwrap();
    assert_eq!(report.summary.records_scanned, 14);
    assert_eq!(report.territories.counts("AS").unwrap().overdose_deaths, 1);
    assert_eq!(report.territories.counts("PR").unwrap().total_deaths, 4);
}

#[test]
fn test_missing_input_is_fatal_before_scan() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("VS23MORT.DPSMCPUB_r20241030");

    let result = process_files(&[reference_path(), missing], &MortalityConfig::default());
    assert!(matches!(result, Err(MortReaderError::Io { .. })));
}
