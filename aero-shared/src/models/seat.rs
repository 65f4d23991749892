use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns run from `A` to `Z`.
pub const MAX_COLUMNS: u8 = 26;

/// Seat identifier: a 1-based row number followed by a column letter, e.g. `12C`.
///
/// Labels read back from storage are taken as-is so that a hand-edited blob
/// never poisons the whole booking list; labels typed by a user go through
/// [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatLabel(String);

impl SeatLabel {
    /// Label for a 1-based `row` and a 0-based `col`.
    pub fn new(row: u32, col: u8) -> Result<Self, SeatLabelError> {
        if row == 0 {
            return Err(SeatLabelError::RowOutOfRange(row));
        }
        if col >= MAX_COLUMNS {
            return Err(SeatLabelError::ColumnOutOfRange(col));
        }
        Ok(Self(format!("{}{}", row, (b'A' + col) as char)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(row, column index)`. `None` for labels that do not follow
    /// the row+letter pattern.
    pub fn position(&self) -> Option<(u32, u8)> {
        let (idx, letter) = self.0.char_indices().last()?;
        let digits = &self.0[..idx];
        if !letter.is_ascii_uppercase() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: u32 = digits.parse().ok()?;
        (row > 0).then_some((row, letter as u8 - b'A'))
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SeatLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeatLabel {
    type Err = SeatLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || SeatLabelError::Malformed(s.to_string());

        let letter = trimmed.chars().last().ok_or_else(malformed)?;
        if !letter.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let digits = &trimmed[..trimmed.len() - 1];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let row: u32 = digits.parse().map_err(|_| malformed())?;

        SeatLabel::new(row, letter.to_ascii_uppercase() as u8 - b'A')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatLabelError {
    #[error("Seat label `{0}` is not a row number followed by a column letter")]
    Malformed(String),

    #[error("Seat row {0} is out of range, rows start at 1")]
    RowOutOfRange(u32),

    #[error("Seat column index {0} is out of range, at most {MAX_COLUMNS} columns")]
    ColumnOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_position() {
        assert_eq!(SeatLabel::new(1, 0).unwrap().as_str(), "1A");
        assert_eq!(SeatLabel::new(12, 5).unwrap().as_str(), "12F");
        assert!(SeatLabel::new(0, 0).is_err());
        assert!(SeatLabel::new(1, 26).is_err());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let label: SeatLabel = " 3f ".parse().unwrap();
        assert_eq!(label.as_str(), "3F");
        assert_eq!(label.position(), Some((3, 5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "A", "1", "A1", "1AA", "0A", "-1A", "1é"] {
            assert!(input.parse::<SeatLabel>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_lenient_deserialization() {
        let labels: Vec<SeatLabel> = serde_json::from_str(r#"["2C","window"]"#).unwrap();
        assert_eq!(labels[0].position(), Some((2, 2)));
        assert_eq!(labels[1].position(), None);
    }
}
