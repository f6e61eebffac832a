//! Tests for per-territory aggregation of scanned records

use mort_reader::algorithm::aggregate::RecordOutcome;
use mort_reader::{
    MortalityConfig, MortalityReport, ResidentStatus, ResidentStatusScope, TerritoryBasis,
    TerritoryCounts,
};

use crate::utils::{RecordBuilder, file_content, scan_str};

/// Five records with hand-computed expectations:
///
/// 1. PR resident accident, X42: total, overdose, drug-related
/// 2. PR resident natural, I21 with F141: total, drug-related
/// 3. PR foreign resident suicide, X64: excluded from every counter
/// 4. GU interstate suicide, X70: total, suicide
/// 5. CA resident, X42: not a territory
fn five_records() -> Vec<RecordBuilder> {
    vec![
        RecordBuilder::new("PR").manner("1").underlying("X42"),
        RecordBuilder::new("PR").underlying("I219").contributing(&["I469", "F141"]),
        RecordBuilder::new("PR")
            .resident_status("4")
            .residence("ZZ")
            .manner("2")
            .underlying("X64"),
        RecordBuilder::new("GU")
            .resident_status("3")
            .residence("VI")
            .manner("2")
            .underlying("X70"),
        RecordBuilder::new("CA").underlying("X42"),
    ]
}

#[test]
fn test_five_record_fixture_counts() {
    let report = scan_str(&file_content(&five_records()), &MortalityConfig::default()).unwrap();

    assert_eq!(
        *report.territories.counts("PR").unwrap(),
        TerritoryCounts {
            total_deaths: 2,
            drug_related_deaths: 2,
            overdose_deaths: 1,
            suicide_deaths: 0,
            accidental_deaths: 1,
            homicide_deaths: 0,
            natural_deaths: 1,
        }
    );

    let gu = report.territories.counts("GU").unwrap();
    assert_eq!(gu.total_deaths, 1);
    assert_eq!(gu.suicide_deaths, 1);
    assert_eq!(gu.drug_related_deaths, 0);
    assert_eq!(gu.overdose_deaths, 0);

    for code in ["VI", "AS", "MP", "CA"] {
        assert!(report.territories.counts(code).is_none(), "{code} should have no counters");
    }

    let summary = report.summary;
    assert_eq!(summary.records_scanned, 5);
    assert_eq!(summary.records_aggregated, 3);
    assert_eq!(summary.records_excluded, 1);
    assert_eq!(summary.records_outside_territories, 1);
    assert_eq!(summary.records_skipped, 0);
}

#[test]
fn test_foreign_resident_contributes_to_no_counter() {
    let config = MortalityConfig::default();
    let foreign = RecordBuilder::new("PR")
        .resident_status("4")
        .manner("2")
        .underlying("X42");
    let report = scan_str(&file_content(&[foreign.clone()]), &config).unwrap();

    assert!(report.territories.counts("PR").is_none());
    assert_eq!(report.territories.totals(), TerritoryCounts::default());
    assert_eq!(report.summary.records_excluded, 1);

    let included = config.with_foreign_residents_excluded(false);
    let report = scan_str(&file_content(&[foreign]), &included).unwrap();
    let pr = report.territories.counts("PR").unwrap();
    assert_eq!((pr.total_deaths, pr.overdose_deaths, pr.suicide_deaths), (1, 1, 1));
}

#[test]
fn test_territory_status_breakdown_includes_foreign_residents() {
    let config =
        MortalityConfig::default().with_resident_status_scope(ResidentStatusScope::Territories);
    let report = scan_str(&file_content(&five_records()), &config).unwrap();
    let breakdown = &report.resident_status;

    let residents = breakdown.get(ResidentStatus::Resident);
    assert_eq!((residents.total, residents.overdose), (2, 1));

    let foreign = breakdown.get(ResidentStatus::ForeignResident);
    assert_eq!((foreign.total, foreign.overdose), (1, 1));

    assert_eq!(breakdown.total().total, 4);
    let methodology = breakdown.total_excluding(ResidentStatus::ForeignResident);
    assert_eq!((methodology.total, methodology.overdose), (3, 1));
}

#[test]
fn test_national_status_breakdown_skips_territories() {
    let records = [
        RecordBuilder::new("CA").manner("1").underlying("X42"),
        RecordBuilder::new("NY")
            .resident_status("4")
            .residence("ZZ")
            .manner("1")
            .underlying("X42"),
        RecordBuilder::new("TX").resident_status("3").underlying("I219"),
        RecordBuilder::new("PR").manner("1").underlying("X42"),
    ];
    let report = scan_str(&file_content(&records), &MortalityConfig::default()).unwrap();
    let breakdown = &report.resident_status;

    assert_eq!(breakdown.total().total, 3);
    assert_eq!(breakdown.get(ResidentStatus::Resident).total, 1);
    assert_eq!(breakdown.get(ResidentStatus::ForeignResident).overdose, 1);
    let methodology = breakdown.total_excluding(ResidentStatus::ForeignResident);
    assert_eq!((methodology.total, methodology.overdose), (2, 1));

    // Territory counters are unaffected by the breakdown scope
    assert_eq!(report.territories.counts("PR").unwrap().overdose_deaths, 1);
    assert_eq!(report.summary.records_outside_territories, 3);

    let everything =
        MortalityConfig::default().with_resident_status_scope(ResidentStatusScope::All);
    let report = scan_str(&file_content(&records), &everything).unwrap();
    assert_eq!(report.resident_status.total().total, 4);
}

#[test]
fn test_residence_basis_reassigns_records() {
    let config = MortalityConfig::default().with_territory_basis(TerritoryBasis::Residence);
    let report = scan_str(&file_content(&five_records()), &config).unwrap();

    // Record 4 occurred in GU but the decedent lived in VI
    assert!(report.territories.counts("GU").is_none());
    assert_eq!(report.territories.counts("VI").unwrap().suicide_deaths, 1);
    assert_eq!(report.territories.counts("PR").unwrap().total_deaths, 2);
    // Record 3 lives in ZZ, so it is outside before the foreign filter applies
    assert_eq!(report.summary.records_excluded, 0);
    assert_eq!(report.summary.records_outside_territories, 2);
}

#[test]
fn test_ingest_outcomes() {
    let config = MortalityConfig::default();
    let layout = &config.layout;
    let mut report = MortalityReport::new(&config);

    let outcomes: Vec<_> = five_records()
        .iter()
        .map(|builder| {
            let record = layout.parse_record(builder.build().as_bytes()).unwrap();
            report.ingest(&record, &config)
        })
        .collect();

    assert_eq!(
        outcomes,
        [
            RecordOutcome::Aggregated,
            RecordOutcome::Aggregated,
            RecordOutcome::ExcludedForeignResident,
            RecordOutcome::Aggregated,
            RecordOutcome::OutsideTerritories,
        ]
    );
}

#[test]
fn test_reports_merge_across_files() {
    let config = MortalityConfig::default();
    let records = five_records();
    let (first, second) = records.split_at(2);

    let mut merged = scan_str(&file_content(first), &config).unwrap();
    merged.merge(&scan_str(&file_content(second), &config).unwrap());

    let whole = scan_str(&file_content(&records), &config).unwrap();
    assert_eq!(merged, whole);
}
