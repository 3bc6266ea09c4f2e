use regex::Regex;
use tracing::{info, warn};

use crate::error::{NotFoundError, PartsError};
use crate::manufacturer::{
    next_manufacturer_id, KnownManufacturers, ManufacturerId, DEFAULT_MANUFACTURER_ID,
    MISSING_DEFAULT_MANUFACTURER_NAME,
};
use crate::part::DEFAULT_MPN;
use crate::part_number::{next_part_number, PartNumber};
use crate::repository::PartsRepository;
use crate::validation::Field;

pub fn allocate_part_number(repository: &impl PartsRepository) -> Result<PartNumber, PartsError> {
    let last = repository.last_part_number()?;
    Ok(next_part_number(last.as_deref())?)
}

pub fn allocate_manufacturer_id(repository: &impl PartsRepository) -> Result<ManufacturerId, PartsError> {
    let last = repository.last_manufacturer_id()?;
    Ok(next_manufacturer_id(last.as_deref())?)
}

/// The name of the manufacturer with [`DEFAULT_MANUFACTURER_ID`], or [`MISSING_DEFAULT_MANUFACTURER_NAME`].
pub fn default_manufacturer_name(repository: &impl PartsRepository) -> Result<String, PartsError> {
    let default = repository.lookup_manufacturer_by_id(&DEFAULT_MANUFACTURER_ID.to_string())?;

    Ok(match default {
        Some(manufacturer) => manufacturer.name,
        None => {
            warn!("Default manufacturer missing. manufacturer_id: {}", DEFAULT_MANUFACTURER_ID);
            MISSING_DEFAULT_MANUFACTURER_NAME.to_string()
        }
    })
}

/// Values to pre-fill when adding a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPartDefaults {
    pub part_number: PartNumber,
    pub manufacturer: String,
    pub mpn: String,
    pub known_manufacturers: KnownManufacturers,
}

pub fn new_part_defaults(repository: &impl PartsRepository) -> Result<NewPartDefaults, PartsError> {
    Ok(NewPartDefaults {
        part_number: allocate_part_number(repository)?,
        manufacturer: default_manufacturer_name(repository)?,
        mpn: DEFAULT_MPN.to_string(),
        known_manufacturers: KnownManufacturers::from(repository.list_manufacturer_names()?),
    })
}

pub fn edit_description(
    repository: &mut impl PartsRepository,
    part_number: &str,
    description: &str,
) -> Result<(), PartsError> {
    Field::Description.check(description)?;

    let part = repository
        .lookup_part(part_number)?
        .ok_or_else(|| NotFoundError::Part(part_number.to_string()))?;

    repository.update_description(&part.part_number, description)?;
    info!(
        "Updated description. part_number: {}, old: '{}', new: '{}'",
        part.part_number, part.description, description
    );

    Ok(())
}

/// Replaces the manufacturer part number `mpn` with `new_mpn`, keeping its part and manufacturer.
pub fn edit_manufacturer_part_number(
    repository: &mut impl PartsRepository,
    mpn: &str,
    new_mpn: &str,
) -> Result<(), PartsError> {
    Field::ManufacturerPartNumber.check(new_mpn)?;

    let manufacturer_part = repository
        .lookup_manufacturer_part_by_mpn(mpn)?
        .ok_or_else(|| NotFoundError::ManufacturerPart(mpn.to_string()))?;

    repository.update_manufacturer_part_number(
        &manufacturer_part.part_number,
        &manufacturer_part.mpn,
        new_mpn,
        &manufacturer_part.manufacturer_id,
    )?;
    info!(
        "Updated manufacturer part number. part_number: {}, manufacturer_id: {}, old: '{}', new: '{}'",
        manufacturer_part.part_number, manufacturer_part.manufacturer_id, mpn, new_mpn
    );

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartListing {
    pub part_number: String,
    pub description: String,
    /// Never empty, parts without manufacturer parts get a single default entry.
    pub manufacturer_parts: Vec<ManufacturerPartListing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerPartListing {
    pub manufacturer: String,
    pub mpn: String,
}

/// Lists parts ordered by part number, with the name of each manufacturer resolved.
///
/// When a filter is given, only parts whose part number or description matches it are listed.
pub fn list_parts(repository: &impl PartsRepository, filter: Option<&Regex>) -> Result<Vec<PartListing>, PartsError> {
    let default_manufacturer = default_manufacturer_name(repository)?;

    let mut listings = vec![];

    for part in repository.list_parts()? {
        if let Some(filter) = filter {
            if !(filter.is_match(&part.part_number) || filter.is_match(&part.description)) {
                continue;
            }
        }

        let mut manufacturer_parts = vec![];
        for manufacturer_part in repository.manufacturer_parts_for(&part.part_number)? {
            let manufacturer = match repository.lookup_manufacturer_by_id(&manufacturer_part.manufacturer_id)? {
                Some(manufacturer) => manufacturer.name,
                None => {
                    warn!(
                        "Unknown manufacturer for part. part_number: {}, manufacturer_id: {}",
                        part.part_number, manufacturer_part.manufacturer_id
                    );
                    manufacturer_part.manufacturer_id
                }
            };

            manufacturer_parts.push(ManufacturerPartListing {
                manufacturer,
                mpn: manufacturer_part.mpn,
            });
        }

        if manufacturer_parts.is_empty() {
            manufacturer_parts.push(ManufacturerPartListing {
                manufacturer: default_manufacturer.clone(),
                mpn: DEFAULT_MPN.to_string(),
            });
        }

        listings.push(PartListing {
            part_number: part.part_number,
            description: part.description,
            manufacturer_parts,
        });
    }

    Ok(listings)
}
