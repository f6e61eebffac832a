//! Multiple-cause-of-death classification
//!
//! A record falls in a category if its underlying cause OR any of its
//! contributing (record-axis) causes matches the category's code set.
//! Category membership is boolean: a record with three overdose codes is
//! still one overdose death.
//!
//! The code tables are data (`ClassificationRules`), so methodology revisions
//! only change configuration. The free functions in this module use
//! [`ClassificationRules::standard`].

pub mod categories;
pub mod rules;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::LazyLock;

use crate::models::icd10::Icd10Code;
use crate::models::record::MortalityRecord;
pub use categories::DeathCategory;
pub use rules::{CodeRule, CodeSet};

/// Substances whose F1x.1-.5 and F1x.7-.9 subcategories are drug-induced
const SUBSTANCE_USE_CATEGORIES: [u8; 8] = [11, 12, 13, 14, 15, 16, 18, 19];

/// Code tables and manner codes used by the predicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    /// Drug poisoning of any intent
    pub overdose: CodeSet,
    /// Drug-induced causes beyond the overdose set
    pub drug_induced: CodeSet,
    /// Intentional self-harm codes
    pub suicide: CodeSet,
    /// Manner-of-death codes that mark a suicide on their own
    pub suicide_manner_codes: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ClassificationRules {
    /// NCHS multiple-cause definitions
    ///
    /// The drug-induced list follows the NVSR drug-induced cause table and
    /// leaves out the T36-T50 poisoning codes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            overdose: standard_overdose_codes(),
            drug_induced: standard_drug_induced_codes(),
            suicide: CodeSet::new(vec![
                CodeRule::categories('X', 60, 84),
                CodeRule::category('U', 3),
                CodeRule::subcode('Y', 87, '0'),
            ]),
            suicide_manner_codes: vec!["2".to_string()],
        }
    }

    /// Single code: drug poisoning
    #[must_use]
    pub fn is_overdose_code(&self, raw: &str) -> bool {
        self.overdose.contains_raw(raw)
    }

    /// Single code: overdose set or drug-induced set
    #[must_use]
    pub fn is_drug_related_code(&self, raw: &str) -> bool {
        Icd10Code::parse(raw).is_some_and(|code| self.drug_related(&code))
    }

    /// Single code: intentional self-harm
    #[must_use]
    pub fn is_suicide_code(&self, raw: &str) -> bool {
        self.suicide.contains_raw(raw)
    }

    /// Manner code alone marks a suicide
    #[must_use]
    pub fn is_suicide_manner(&self, manner: &str) -> bool {
        let manner = manner.trim();
        self.suicide_manner_codes.iter().any(|code| code == manner)
    }

    fn drug_related(&self, code: &Icd10Code) -> bool {
        self.overdose.contains(code) || self.drug_induced.contains(code)
    }

    /// True if the underlying or any contributing code is an overdose code
    #[must_use]
    pub fn is_overdose<S: AsRef<str>>(&self, underlying: &str, contributing: &[S]) -> bool {
        parse_codes(underlying, contributing)
            .iter()
            .any(|code| self.overdose.contains(code))
    }

    /// True if the underlying or any contributing code is drug-related
    #[must_use]
    pub fn is_drug_related<S: AsRef<str>>(&self, underlying: &str, contributing: &[S]) -> bool {
        parse_codes(underlying, contributing)
            .iter()
            .any(|code| self.drug_related(code))
    }

    /// True if the manner marks a suicide or any code is a self-harm code
    #[must_use]
    pub fn is_suicide<S: AsRef<str>>(
        &self,
        manner: &str,
        underlying: &str,
        contributing: &[S],
    ) -> bool {
        self.is_suicide_manner(manner)
            || parse_codes(underlying, contributing)
                .iter()
                .any(|code| self.suicide.contains(code))
    }

    /// Evaluate every category for one record
    ///
    /// With `use_multiple_causes` off only the underlying cause is examined.
    #[must_use]
    pub fn classify(&self, record: &MortalityRecord, use_multiple_causes: bool) -> Classification {
        let contributing: &[String] = if use_multiple_causes {
            record.contributing_causes.as_slice()
        } else {
            &[]
        };
        let codes = parse_codes(&record.underlying_cause, contributing);

        Classification {
            overdose: codes.iter().any(|code| self.overdose.contains(code)),
            drug_related: codes.iter().any(|code| self.drug_related(code)),
            suicide: self.is_suicide_manner(&record.manner_of_death)
                || codes.iter().any(|code| self.suicide.contains(code)),
        }
    }
}

/// Category membership of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub overdose: bool,
    pub drug_related: bool,
    pub suicide: bool,
}

impl Classification {
    /// Membership flag for a category; every record is in `Total`
    #[must_use]
    pub const fn is(&self, category: DeathCategory) -> bool {
        match category {
            DeathCategory::Total => true,
            DeathCategory::DrugRelated => self.drug_related,
            DeathCategory::Overdose => self.overdose,
            DeathCategory::Suicide => self.suicide,
        }
    }
}

/// Parse underlying and contributing codes, dropping malformed or empty ones
fn parse_codes<S: AsRef<str>>(underlying: &str, contributing: &[S]) -> SmallVec<[Icd10Code; 21]> {
    std::iter::once(underlying)
        .chain(contributing.iter().map(|code| code.as_ref()))
        .filter_map(Icd10Code::parse)
        .collect()
}

fn standard_overdose_codes() -> CodeSet {
    CodeSet::new(vec![
        CodeRule::categories('X', 40, 44),
        CodeRule::categories('X', 60, 64),
        CodeRule::category('X', 85),
        CodeRule::categories('Y', 10, 14),
    ])
}

fn standard_drug_induced_codes() -> CodeSet {
    let mut rules = vec![
        // Blood
        CodeRule::subcode('D', 52, '1'),
        CodeRule::subcode('D', 59, '0'),
        CodeRule::subcode('D', 59, '2'),
        CodeRule::subcode('D', 61, '1'),
        CodeRule::subcode('D', 64, '2'),
        // Endocrine
        CodeRule::subcode('E', 6, '4'),
        CodeRule::subcode('E', 23, '1'),
        CodeRule::subcode('E', 24, '2'),
        CodeRule::subcode('E', 27, '3'),
        CodeRule::subcode('E', 66, '1'),
    ];

    // Mental and behavioural disorders due to psychoactive substance use,
    // excluding acute intoxication (.0) and amnesic syndrome (.6)
    for category in SUBSTANCE_USE_CATEGORIES {
        rules.push(CodeRule::subcodes('F', category, '1', '5'));
        rules.push(CodeRule::subcodes('F', category, '7', '9'));
    }
    // Tobacco: harmful use and dependence (.1, .2) do not count
    rules.push(CodeRule::subcodes('F', 17, '3', '5'));
    rules.push(CodeRule::subcodes('F', 17, '7', '9'));

    rules.extend([
        // Nervous system
        CodeRule::subcode('G', 21, '1'),
        CodeRule::subcode('G', 24, '0'),
        CodeRule::subcode('G', 25, '1'),
        CodeRule::subcode('G', 25, '4'),
        CodeRule::subcode('G', 25, '6'),
        CodeRule::subcode('G', 44, '4'),
        CodeRule::subcode('G', 62, '0'),
        CodeRule::subcode('G', 72, '0'),
        // Circulatory
        CodeRule::subcode('I', 95, '2'),
        // Respiratory
        CodeRule::subcodes('J', 70, '2', '4'),
        // Digestive
        CodeRule::subcode('K', 85, '3'),
        // Skin
        CodeRule::subcode('L', 10, '5'),
        CodeRule::subcodes('L', 27, '0', '1'),
        // Musculoskeletal
        CodeRule::subcode('M', 10, '2'),
        CodeRule::subcode('M', 32, '0'),
        CodeRule::subcode('M', 80, '4'),
        CodeRule::subcode('M', 81, '4'),
        CodeRule::subcode('M', 83, '5'),
        CodeRule::subcode('M', 87, '1'),
        // Symptoms and abnormal findings
        CodeRule::subcode('R', 50, '2'),
        CodeRule::subcodes('R', 78, '1', '5'),
    ]);

    CodeSet::new(rules)
}

static STANDARD_RULES: LazyLock<ClassificationRules> =
    LazyLock::new(ClassificationRules::standard);

/// The standard rule set shared by the free predicate functions
#[must_use]
pub fn standard_rules() -> &'static ClassificationRules {
    &STANDARD_RULES
}

/// Overdose under the standard rules
#[must_use]
pub fn is_overdose<S: AsRef<str>>(underlying: &str, contributing: &[S]) -> bool {
    standard_rules().is_overdose(underlying, contributing)
}

/// Drug-related under the standard rules
#[must_use]
pub fn is_drug_related<S: AsRef<str>>(underlying: &str, contributing: &[S]) -> bool {
    standard_rules().is_drug_related(underlying, contributing)
}

/// Suicide under the standard rules
#[must_use]
pub fn is_suicide<S: AsRef<str>>(manner: &str, underlying: &str, contributing: &[S]) -> bool {
    standard_rules().is_suicide(manner, underlying, contributing)
}
