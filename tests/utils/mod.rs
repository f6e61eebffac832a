use std::path::PathBuf;

use mort_reader::{MortalityConfig, MortalityReport, Result, scan_reader};

/// Length of a full public-use record line
pub const RECORD_LENGTH: usize = 443;

/// Directory holding checked-in fixture files
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Builds one fixed-width record line in the 2023 layout
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    resident_status: String,
    occurrence: String,
    residence: String,
    manner: String,
    underlying: String,
    contributing: Vec<String>,
}

impl RecordBuilder {
    /// A resident natural death in `territory` with no conditions
    #[must_use]
    pub fn new(territory: &str) -> Self {
        Self {
            resident_status: "1".to_string(),
            occurrence: territory.to_string(),
            residence: territory.to_string(),
            manner: "7".to_string(),
            underlying: String::new(),
            contributing: Vec::new(),
        }
    }

    #[must_use]
    pub fn resident_status(mut self, code: &str) -> Self {
        self.resident_status = code.to_string();
        self
    }

    #[must_use]
    pub fn residence(mut self, territory: &str) -> Self {
        self.residence = territory.to_string();
        self
    }

    #[must_use]
    pub fn manner(mut self, code: &str) -> Self {
        self.manner = code.to_string();
        self
    }

    #[must_use]
    pub fn underlying(mut self, code: &str) -> Self {
        self.underlying = code.to_string();
        self
    }

    #[must_use]
    pub fn contributing(mut self, codes: &[&str]) -> Self {
        self.contributing = codes.iter().map(ToString::to_string).collect();
        self
    }

    /// Render the line without a terminator
    #[must_use]
    pub fn build(&self) -> String {
        let mut line = vec![b' '; RECORD_LENGTH];
        put(&mut line, 20, &self.resident_status);
        put(&mut line, 21, &self.occurrence);
        put(&mut line, 29, &self.residence);
        put(&mut line, 107, &self.manner);
        put(&mut line, 146, &self.underlying);
        if !self.contributing.is_empty() {
            put(&mut line, 341, &format!("{:>2}", self.contributing.len()));
        }
        for (i, code) in self.contributing.iter().enumerate() {
            put(&mut line, 344 + i * 5, code);
        }
        String::from_utf8(line).unwrap()
    }
}

/// Write `value` at a 1-based position
fn put(line: &mut [u8], position: usize, value: &str) {
    let start = position - 1;
    line[start..start + value.len()].copy_from_slice(value.as_bytes());
}

/// Join built records into newline-terminated file content
#[must_use]
pub fn file_content(records: &[RecordBuilder]) -> String {
    records.iter().map(|r| r.build() + "\n").collect()
}

/// Scan in-memory content with `config` into a fresh report
pub fn scan_str(content: &str, config: &MortalityConfig) -> Result<MortalityReport> {
    let mut report = MortalityReport::new(config);
    scan_reader(content.as_bytes(), config, &mut report)?;
    Ok(report)
}
