use std::fmt::{Display, Formatter};

use crate::error::ValidationError;
use crate::manufacturer::KnownManufacturers;
use crate::part::NewPart;

pub const PART_NUMBER_LENGTH: usize = 10;
pub const DESCRIPTION_MIN_LENGTH: usize = 5;
pub const DESCRIPTION_MAX_LENGTH: usize = 50;
pub const MPN_MIN_LENGTH: usize = 3;
pub const MPN_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PartNumber,
    Description,
    ManufacturerPartNumber,
}

impl Field {
    fn bounds(&self) -> (usize, usize) {
        match self {
            Field::PartNumber => (PART_NUMBER_LENGTH, PART_NUMBER_LENGTH),
            Field::Description => (DESCRIPTION_MIN_LENGTH, DESCRIPTION_MAX_LENGTH),
            Field::ManufacturerPartNumber => (MPN_MIN_LENGTH, MPN_MAX_LENGTH),
        }
    }

    /// Lengths are in characters, not bytes.
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let (min, max) = self.bounds();
        let actual = value.chars().count();

        if actual < min || actual > max {
            return Err(ValidationError {
                field: *self,
                min,
                max,
                actual,
            });
        }
        Ok(())
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::PartNumber => f.write_str("part number"),
            Field::Description => f.write_str("description"),
            Field::ManufacturerPartNumber => f.write_str("manufacturer part number"),
        }
    }
}

pub fn valid_part_number(value: &str) -> bool {
    Field::PartNumber.check(value).is_ok()
}

pub fn valid_description(value: &str) -> bool {
    Field::Description.check(value).is_ok()
}

pub fn valid_manufacturer_part_number(value: &str) -> bool {
    Field::ManufacturerPartNumber
        .check(value)
        .is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManufacturerNameCheck {
    Known,
    /// The name is new, the user must confirm it before a manufacturer is created for it.
    ConfirmationRequired,
}

pub fn check_manufacturer_name(name: &str, known: &KnownManufacturers) -> ManufacturerNameCheck {
    match known.contains(name) {
        true => ManufacturerNameCheck::Known,
        false => ManufacturerNameCheck::ConfirmationRequired,
    }
}

/// Checks every field of a new part; the part number, description and mpn lengths, in that order, then the
/// manufacturer name.
///
/// The first length violation is returned.
pub fn validate_new_part(part: &NewPart, known: &KnownManufacturers) -> Result<ManufacturerNameCheck, ValidationError> {
    Field::PartNumber.check(&part.part_number)?;
    Field::Description.check(&part.description)?;
    Field::ManufacturerPartNumber.check(&part.mpn)?;

    Ok(check_manufacturer_name(&part.manufacturer, known))
}
