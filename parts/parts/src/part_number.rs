use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::FormatError;

/// The part number issued when the database has no parts yet.
pub const FIRST_PART_NUMBER: PartNumber = PartNumber {
    prefix: 800_000,
    suffix: 101,
};

/// Suffix given to every newly allocated part number.
///
/// The suffix is reserved for numbering variants of a part, allocation never increments it.
pub const NEW_PART_NUMBER_SUFFIX: u16 = 101;

const MAX_PREFIX: u32 = 999_999;
const MAX_SUFFIX: u16 = 999;

/// A part number, in the form `NNNNNN-SSS`, e.g. `800123-101`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartNumber {
    prefix: u32,
    suffix: u16,
}

impl FromStr for PartNumber {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('-').collect();
        let [prefix, suffix] = segments.as_slice() else {
            return Err(FormatError::SeparatorCount {
                value: s.to_string(),
                count: segments.len() - 1,
            });
        };

        let prefix = parse_segment(s, prefix, MAX_PREFIX)?;
        let suffix = parse_segment(s, suffix, MAX_SUFFIX as u32)? as u16;

        Ok(Self {
            prefix,
            suffix,
        })
    }
}

fn parse_segment(value: &str, segment: &str, max: u32) -> Result<u32, FormatError> {
    let invalid = || FormatError::InvalidSegment {
        value: value.to_string(),
        segment: segment.to_string(),
    };

    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    segment
        .parse::<u32>()
        .ok()
        .filter(|number| *number <= max)
        .ok_or_else(invalid)
}

impl Display for PartNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06}-{:03}", self.prefix, self.suffix)
    }
}

/// Computes the part number that follows `last_issued`.
///
/// With nothing issued yet the result is [`FIRST_PART_NUMBER`] itself. Otherwise the prefix is incremented and the
/// suffix is reset to [`NEW_PART_NUMBER_SUFFIX`], whatever the previous suffix was.
pub fn next_part_number(last_issued: Option<&str>) -> Result<PartNumber, FormatError> {
    let Some(last_issued) = last_issued else {
        return Ok(FIRST_PART_NUMBER);
    };

    let last: PartNumber = last_issued.parse()?;

    let prefix = last
        .prefix
        .checked_add(1)
        .filter(|prefix| *prefix <= MAX_PREFIX)
        .ok_or_else(|| FormatError::Overflow(last_issued.to_string()))?;

    Ok(PartNumber {
        prefix,
        suffix: NEW_PART_NUMBER_SUFFIX,
    })
}
