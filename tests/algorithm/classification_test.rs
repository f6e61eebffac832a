//! Tests for the multiple-cause classification predicates
//!
//! Covers the published examples for each category and checks that the
//! overdose set stays inside the drug-related set for random codes and rule
//! tables.

use mort_reader::algorithm::classification::standard_rules;
use mort_reader::{
    ClassificationRules, CodeRule, CodeSet, MortalityConfig, is_drug_related, is_overdose,
    is_suicide,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{RecordBuilder, file_content, scan_str};

const NONE: [&str; 0] = [];
const LETTERS: [char; 12] = ['D', 'E', 'F', 'G', 'I', 'J', 'K', 'L', 'M', 'R', 'X', 'Y'];

fn random_code(rng: &mut StdRng) -> String {
    let letter = LETTERS[rng.random_range(0..LETTERS.len())];
    let category: u8 = rng.random_range(0..100);
    if rng.random_bool(0.3) {
        format!("{letter}{category:02}")
    } else {
        format!("{letter}{category:02}{}", rng.random_range(0..10))
    }
}

#[test]
fn test_underlying_overdose_without_contributing() {
    assert!(is_overdose("X42", &NONE));
    assert!(is_drug_related("X42", &NONE));
    assert!(!is_suicide("1", "X42", &NONE));
}

#[test]
fn test_suicide_manner_without_codes() {
    assert!(is_suicide("2", "I21", &NONE));
    assert!(!is_overdose("I21", &NONE));
    assert!(!is_drug_related("I21", &NONE));
}

#[test]
fn test_contributing_cocaine_use_is_drug_related() {
    assert!(is_drug_related("I21", &["I469", "F141"]));
    assert!(!is_overdose("I21", &["I469", "F141"]));
}

#[test]
fn test_intentional_self_poisoning_is_both() {
    assert!(is_overdose("X64", &NONE));
    assert!(is_suicide("2", "X64", &NONE));
    assert!(is_suicide("7", "X64", &NONE));
}

#[test]
fn test_empty_and_malformed_codes_never_match() {
    assert!(!is_overdose("", &[""]));
    assert!(!is_drug_related("??", &["4X2", "X"]));
    assert!(!is_suicide("", "", &["  "]));
}

#[test]
fn test_overdose_implies_drug_related_random_codes() {
    let mut rng = StdRng::seed_from_u64(0x2023);
    let rules = standard_rules();

    for _ in 0..5_000 {
        let underlying = random_code(&mut rng);
        let count = rng.random_range(0..=20);
        let contributing: Vec<String> = (0..count).map(|_| random_code(&mut rng)).collect();

        if rules.is_overdose(&underlying, &contributing) {
            assert!(
                rules.is_drug_related(&underlying, &contributing),
                "{underlying} {contributing:?} is an overdose but not drug-related"
            );
        }
    }
}

#[test]
fn test_overdose_implies_drug_related_custom_rules() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let letter = LETTERS[rng.random_range(0..LETTERS.len())];
        let low: u8 = rng.random_range(0..90);
        let high = low + rng.random_range(0..10);
        let rules = ClassificationRules {
            overdose: CodeSet::new(vec![CodeRule::categories(letter, low, high)]),
            drug_induced: CodeSet::default(),
            ..ClassificationRules::standard()
        };

        for _ in 0..50 {
            let code = random_code(&mut rng);
            if rules.is_overdose_code(&code) {
                assert!(rules.is_drug_related_code(&code), "{code} under {}", rules.overdose);
            }
        }
    }
}

#[test]
fn test_multiple_cause_toggle() {
    let content = file_content(&[
        RecordBuilder::new("PR").underlying("I219").contributing(&["X420"]),
    ]);

    let multiple = scan_str(&content, &MortalityConfig::default()).unwrap();
    let pr = multiple.territories.counts("PR").unwrap();
    assert_eq!((pr.overdose_deaths, pr.drug_related_deaths), (1, 1));

    let underlying_only = MortalityConfig::default().with_multiple_causes(false);
    let single = scan_str(&content, &underlying_only).unwrap();
    let pr = single.territories.counts("PR").unwrap();
    assert_eq!((pr.total_deaths, pr.overdose_deaths, pr.drug_related_deaths), (1, 0, 0));
}

#[test]
fn test_rules_load_from_json() {
    let json = r#"{
        "overdose": ["X40-X44", "T40.1"],
        "drug_induced": ["F11.1-F11.5"],
        "suicide": ["X60-X84"],
        "suicide_manner_codes": ["2"]
    }"#;
    let rules: ClassificationRules = serde_json::from_str(json).unwrap();

    assert!(rules.is_overdose_code("T401"));
    assert!(!rules.is_overdose_code("T402"));
    assert!(rules.is_drug_related_code("T401"));
    assert!(rules.is_drug_related_code("F113"));
    assert!(!rules.is_drug_related_code("F141"));

    // A custom table drives the scan once installed in the config
    let config = MortalityConfig::default().with_rules(rules);
    let records = [
        RecordBuilder::new("PR").manner("1").underlying("T401"),
        RecordBuilder::new("PR").manner("1").underlying("X45"),
    ];
    let report = scan_str(&file_content(&records), &config).unwrap();
    let pr = report.territories.counts("PR").unwrap();
    assert_eq!((pr.total_deaths, pr.overdose_deaths, pr.drug_related_deaths), (2, 1, 1));
}
