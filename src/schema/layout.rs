//! Fixed-width record layout and field decoding
//!
//! The public-use mortality files are fixed-width Latin-1 text. Every byte is
//! one character, so the documented character positions are byte offsets into
//! the raw line. Positions in the CDC documentation are 1-based; `FieldSpec`
//! stores 0-based starts.

use serde::{Deserialize, Serialize};

use crate::error::{MalformedReason, MalformedRecordError};
use crate::models::record::{ContributingCauses, MAX_CONTRIBUTING_CAUSES, MortalityRecord};

/// Name, offset and width of one fixed-width field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, used as the key in decoded output
    pub name: String,
    /// 0-based byte offset
    pub start: usize,
    /// Width in bytes
    pub length: usize,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, start: usize, length: usize) -> Self {
        Self {
            name: name.into(),
            start,
            length,
        }
    }

    /// Build from a 1-based documented position
    pub fn at_position(name: impl Into<String>, position: usize, length: usize) -> Self {
        Self::new(name, position.saturating_sub(1), length)
    }

    /// Offset one past the last byte of the field
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// Extract and trim this field, or `None` if the line is too short
    #[must_use]
    pub fn extract(&self, line: &[u8]) -> Option<String> {
        line.get(self.start..self.end()).map(latin1_trimmed)
    }
}

/// Decode a Latin-1 byte slice and trim surrounding whitespace
#[must_use]
pub fn latin1_trimmed(bytes: &[u8]) -> String {
    let decoded: String = bytes.iter().copied().map(char::from).collect();
    decoded.trim().to_string()
}

/// Fields extracted from one line, in table order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedFields {
    values: Vec<(String, String)>,
}

impl DecodedFields {
    /// Value of a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extract and trim every field in `table` from a raw line
///
/// Fails if the line is shorter than the furthest field end in the table.
pub fn decode_fields(
    line: &[u8],
    table: &[FieldSpec],
) -> std::result::Result<DecodedFields, MalformedRecordError> {
    let required = table.iter().map(FieldSpec::end).max().unwrap_or(0);
    if line.len() < required {
        return Err(MalformedRecordError::new(MalformedReason::TooShort {
            required,
            actual: line.len(),
        }));
    }

    let values = table
        .iter()
        .map(|spec| {
            let value = latin1_trimmed(&line[spec.start..spec.end()]);
            (spec.name.clone(), value)
        })
        .collect();

    Ok(DecodedFields { values })
}

/// Placement of the record-axis (contributing cause) conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributingLayout {
    /// Field holding the number of conditions present
    pub count: FieldSpec,
    /// 0-based offset of the first condition sub-field
    pub start: usize,
    /// Distance between consecutive sub-fields
    pub stride: usize,
    /// Width of the code inside each sub-field
    pub code_length: usize,
    /// Maximum number of sub-fields the layout reserves
    pub max_entries: usize,
}

impl ContributingLayout {
    /// Byte range of the `index`-th condition code
    #[must_use]
    pub const fn code_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = self.start + index * self.stride;
        start..start + self.code_length
    }

    /// Decode the declared conditions, dropping blank sub-fields
    ///
    /// A condition that starts inside the line but runs past its end is read
    /// up to the end. One that starts at or past the end is malformed.
    fn decode(
        &self,
        line: &[u8],
    ) -> std::result::Result<ContributingCauses, MalformedRecordError> {
        let raw_count = self.count.extract(line).unwrap_or_default();
        let declared = if raw_count.is_empty() {
            0
        } else {
            raw_count.parse::<usize>().map_err(|_| {
                MalformedRecordError::new(MalformedReason::InvalidAxisCount(raw_count.clone()))
            })?
        };
        let declared = declared.min(self.max_entries);

        let mut causes = ContributingCauses::new();
        for index in 0..declared {
            // Writers that strip trailing blanks can cut the last code short
            let range = self.code_range(index);
            if range.start >= line.len() {
                return Err(MalformedRecordError::new(
                    MalformedReason::TruncatedConditions {
                        declared,
                        actual: line.len(),
                    },
                ));
            }
            let bytes = &line[range.start..range.end.min(line.len())];
            let code = latin1_trimmed(bytes);
            if !code.is_empty() {
                causes.push(code);
            }
        }

        Ok(causes)
    }
}

pub const RESIDENT_STATUS: &str = "resident_status";
pub const STATE_OF_OCCURRENCE: &str = "state_of_occurrence";
pub const STATE_OF_RESIDENCE: &str = "state_of_residence";
pub const MANNER_OF_DEATH: &str = "manner_of_death";
pub const UNDERLYING_CAUSE: &str = "underlying_cause";
pub const RECORD_AXIS_COUNT: &str = "record_axis_count";

/// Complete field layout of a mortality record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub resident_status: FieldSpec,
    pub state_of_occurrence: FieldSpec,
    pub state_of_residence: FieldSpec,
    pub manner_of_death: FieldSpec,
    pub underlying_cause: FieldSpec,
    pub contributing: ContributingLayout,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::cdc_2023()
    }
}

impl RecordLayout {
    /// Multiple Cause of Death public-use layout, 2023 data year
    #[must_use]
    pub fn cdc_2023() -> Self {
        Self {
            resident_status: FieldSpec::at_position(RESIDENT_STATUS, 20, 1),
            state_of_occurrence: FieldSpec::at_position(STATE_OF_OCCURRENCE, 21, 2),
            state_of_residence: FieldSpec::at_position(STATE_OF_RESIDENCE, 29, 2),
            manner_of_death: FieldSpec::at_position(MANNER_OF_DEATH, 107, 1),
            underlying_cause: FieldSpec::at_position(UNDERLYING_CAUSE, 146, 4),
            contributing: ContributingLayout {
                count: FieldSpec::at_position(RECORD_AXIS_COUNT, 341, 2),
                start: 343,
                stride: 5,
                code_length: 4,
                max_entries: MAX_CONTRIBUTING_CAUSES,
            },
        }
    }

    /// The fixed fields every record must contain
    #[must_use]
    pub fn fixed_fields(&self) -> Vec<FieldSpec> {
        vec![
            self.resident_status.clone(),
            self.state_of_occurrence.clone(),
            self.state_of_residence.clone(),
            self.manner_of_death.clone(),
            self.underlying_cause.clone(),
            self.contributing.count.clone(),
        ]
    }

    /// Minimum line length accepted by `parse_record`
    #[must_use]
    pub fn required_length(&self) -> usize {
        self.fixed_fields()
            .iter()
            .map(FieldSpec::end)
            .max()
            .unwrap_or(0)
    }

    /// Check that the layout is usable before a scan starts
    pub fn validate(&self) -> crate::error::Result<()> {
        let c = &self.contributing;
        if c.code_length == 0 || c.stride < c.code_length {
            return Err(crate::error::MortReaderError::config(format!(
                "record-axis stride {} must be at least the code length {} (and non-zero)",
                c.stride, c.code_length
            )));
        }
        if c.max_entries > MAX_CONTRIBUTING_CAUSES {
            return Err(crate::error::MortReaderError::config(format!(
                "record-axis max_entries {} exceeds {MAX_CONTRIBUTING_CAUSES}",
                c.max_entries
            )));
        }
        if let Some(field) = self.fixed_fields().iter().find(|f| f.length == 0) {
            return Err(crate::error::MortReaderError::config(format!(
                "field {} has zero length",
                field.name
            )));
        }
        Ok(())
    }

    /// Decode one raw line (without its line terminator) into a record
    pub fn parse_record(
        &self,
        line: &[u8],
    ) -> std::result::Result<MortalityRecord, MalformedRecordError> {
        let fields = decode_fields(line, &self.fixed_fields())?;
        let field = |name: &str| fields.get(name).unwrap_or_default().to_string();

        Ok(MortalityRecord {
            state_of_occurrence: field(&self.state_of_occurrence.name),
            state_of_residence: field(&self.state_of_residence.name),
            resident_status: field(&self.resident_status.name),
            manner_of_death: field(&self.manner_of_death.name),
            underlying_cause: field(&self.underlying_cause.name),
            contributing_causes: self.contributing.decode(line)?,
        })
    }
}
