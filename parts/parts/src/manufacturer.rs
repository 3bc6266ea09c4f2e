use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::FormatError;

/// The manufacturer id issued when the database has no manufacturers yet.
///
/// The manufacturer with this id is the default manufacturer for new parts.
pub const FIRST_MANUFACTURER_ID: ManufacturerId = ManufacturerId(0);
pub const DEFAULT_MANUFACTURER_ID: ManufacturerId = FIRST_MANUFACTURER_ID;

/// Name used when the database has no manufacturer with [`DEFAULT_MANUFACTURER_ID`].
pub const MISSING_DEFAULT_MANUFACTURER_NAME: &str = "Default MFG Error";

const MARKER: char = 'M';
const MAX_ID: u32 = 9_999_999;

/// Internal identifier for a manufacturer, in the form `M` followed by 7 digits, e.g. `M0000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManufacturerId(u32);

impl ManufacturerId {
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl FromStr for ManufacturerId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(MARKER)
            .ok_or_else(|| FormatError::MissingMarker(s.to_string()))?;

        let invalid = || FormatError::InvalidSegment {
            value: s.to_string(),
            segment: digits.to_string(),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        digits
            .parse::<u32>()
            .ok()
            .filter(|number| *number <= MAX_ID)
            .map(ManufacturerId)
            .ok_or_else(invalid)
    }
}

impl Display for ManufacturerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:07}", MARKER, self.0)
    }
}

/// Computes the manufacturer id that follows `last_issued`, starting at [`FIRST_MANUFACTURER_ID`].
pub fn next_manufacturer_id(last_issued: Option<&str>) -> Result<ManufacturerId, FormatError> {
    let Some(last_issued) = last_issued else {
        return Ok(FIRST_MANUFACTURER_ID);
    };

    let last: ManufacturerId = last_issued.parse()?;

    last.0
        .checked_add(1)
        .filter(|number| *number <= MAX_ID)
        .map(ManufacturerId)
        .ok_or_else(|| FormatError::Overflow(last_issued.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub manufacturer_id: String,
}

impl Manufacturer {
    pub fn new(name: String, manufacturer_id: String) -> Self {
        Self {
            name,
            manufacturer_id,
        }
    }
}

/// Names of the manufacturers known to the database, in the order they were listed or added.
///
/// Only ever appended to, to match the repository after a manufacturer has been registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownManufacturers(Vec<String>);

impl KnownManufacturers {
    pub fn contains(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|known| known == name)
    }

    pub fn push(&mut self, name: String) {
        if !self.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KnownManufacturers {
    fn from(names: Vec<String>) -> Self {
        let mut known = Self::default();
        for name in names {
            known.push(name);
        }
        known
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn first_manufacturer_id() {
        assert_eq!(next_manufacturer_id(None).unwrap().to_string(), "M0000000");
    }

    #[rstest]
    #[case("M0000000", "M0000001")]
    #[case("M0000041", "M0000042")]
    #[case("M0000999", "M0001000")]
    #[case("M1234567", "M1234568")]
    #[case("M7", "M0000008")]
    fn next(#[case] last: &str, #[case] expected: &str) {
        let expected_number = last[1..].parse::<u32>().unwrap() + 1;

        let next = next_manufacturer_id(Some(last)).unwrap();

        assert_eq!(next.to_string(), expected);
        assert_eq!(next.to_string(), format!("M{:07}", expected_number));
    }

    #[rstest]
    #[case("0000001")]
    #[case("m0000001")]
    #[case("")]
    fn missing_marker(#[case] last: &str) {
        assert_eq!(
            next_manufacturer_id(Some(last)),
            Err(FormatError::MissingMarker(last.to_string()))
        );
    }

    #[rstest]
    #[case("M", "")]
    #[case("M00000X1", "00000X1")]
    #[case("M-000001", "-000001")]
    #[case("M10000000", "10000000")]
    fn invalid_segment(#[case] last: &str, #[case] segment: &str) {
        assert_eq!(next_manufacturer_id(Some(last)), Err(FormatError::InvalidSegment {
            value: last.to_string(),
            segment: segment.to_string(),
        }));
    }

    #[test]
    fn exhausted() {
        assert_eq!(
            next_manufacturer_id(Some("M9999999")),
            Err(FormatError::Overflow("M9999999".to_string()))
        );
    }

    #[test]
    fn round_trip_keeps_padding() {
        let id: ManufacturerId = "M0000041".parse().unwrap();

        assert_eq!(id.number(), 41);
        assert_eq!(id.to_string(), "M0000041");
    }

    #[test]
    fn known_manufacturers_are_append_only_and_unique() {
        let mut known = KnownManufacturers::from(vec!["Default".to_string(), "Yageo".to_string(), "Yageo".to_string()]);
        assert_eq!(known.len(), 2);

        known.push("Acme".to_string());
        known.push("Default".to_string());

        assert_eq!(known.names(), ["Default", "Yageo", "Acme"]);
        assert!(known.contains("Acme"));
        assert!(!known.contains("acme"));
    }
}
