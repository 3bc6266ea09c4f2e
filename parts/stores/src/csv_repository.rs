use std::fmt::Debug;
use std::fs;
use std::path::Path;

use anyhow::{Context, Error};
use csv::QuoteStyle;
use itertools::Itertools;
use parts::error::RepositoryError;
use parts::manufacturer::{Manufacturer, DEFAULT_MANUFACTURER_ID};
use parts::part::{ManufacturerPart, Part};
use parts::repository::PartsRepository;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, trace, warn, Level};
use util::source::Source;

use crate::csv::{
    ManufacturerPartRecord, ManufacturerRecord, PartRecord, MANUFACTURERS_FILE_NAME, MANUFACTURER_PARTS_FILE_NAME,
    MANUFACTURER_PART_HEADERS, PARTS_FILE_NAME, PART_HEADERS,
};

pub const DEFAULT_MANUFACTURER_NAME: &str = "Default";

pub type PartsSource = Source;

/// A parts repository kept as three CSV files in a directory.
///
/// Nothing is cached, every read loads the files and every write loads, modifies and stores a file.
#[derive(Debug, Clone)]
pub struct CsvPartsRepository {
    source: PartsSource,
}

impl CsvPartsRepository {
    pub fn new(source: PartsSource) -> Self {
        Self {
            source,
        }
    }

    fn parts(&self) -> Result<Vec<PartRecord>, RepositoryError> {
        Ok(load_records(&self.source.join(PARTS_FILE_NAME), "part")?)
    }

    fn manufacturers(&self) -> Result<Vec<ManufacturerRecord>, RepositoryError> {
        Ok(load_records(&self.source.join(MANUFACTURERS_FILE_NAME), "manufacturer")?)
    }

    fn manufacturer_parts(&self) -> Result<Vec<ManufacturerPartRecord>, RepositoryError> {
        Ok(load_records(
            &self.source.join(MANUFACTURER_PARTS_FILE_NAME),
            "manufacturer part",
        )?)
    }
}

/// Creates the directory and any missing files.
///
/// A newly created manufacturers file is seeded with the default manufacturer.
pub fn ensure_store(source: &PartsSource) -> anyhow::Result<()> {
    let path = source.path();
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| format!("Creating store directory. path: {}", path.display()))?;
        info!("Created store directory. source: '{}'", source);
    }

    for (file_name, headers) in [
        (PARTS_FILE_NAME, PART_HEADERS.as_slice()),
        (MANUFACTURER_PARTS_FILE_NAME, MANUFACTURER_PART_HEADERS.as_slice()),
    ] {
        let file_path = source.join(file_name);
        if !file_path.exists() {
            store_headers(&file_path, headers)?;
            info!("Created store file. file: '{}'", file_path.display());
        }
    }

    let manufacturers_path = source.join(MANUFACTURERS_FILE_NAME);
    if !manufacturers_path.exists() {
        store_records(&manufacturers_path, &[ManufacturerRecord {
            name: DEFAULT_MANUFACTURER_NAME.to_string(),
            manufacturer_id: DEFAULT_MANUFACTURER_ID.to_string(),
        }])?;
        info!(
            "Created store file with default manufacturer. file: '{}'",
            manufacturers_path.display()
        );
    }

    Ok(())
}

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_records<T>(path: &Path, kind: &str) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned + Debug,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Error reading {} records. file: {}", kind, path.display()))?;

    let mut records: Vec<T> = vec![];

    for result in csv_reader.deserialize() {
        let record: T = result.with_context(|| format!("Deserializing {} record", kind))?;

        trace!("{:?}", record);

        records.push(record);
    }
    Ok(records)
}

pub fn store_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("Error writing records. file: {}", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes a file containing only the header row.
pub fn store_headers(path: &Path, headers: &[&str]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("Error writing headers. file: {}", path.display()))?;

    writer.write_record(headers)?;
    writer.flush()?;

    Ok(())
}

/// Loads the records in `path`, applies `f` and stores the records again, unless `f` fails.
pub fn perform_store_operation<T, F, R>(path: &Path, kind: &str, f: F) -> Result<R, RepositoryError>
where
    T: DeserializeOwned + Serialize + Debug,
    F: FnOnce(&mut Vec<T>) -> Result<R, RepositoryError>,
{
    let mut records = load_records(path, kind)?;

    let result = f(&mut records)?;

    store_records(path, &records).with_context(|| format!("Unable to store {} records", kind))?;

    Ok(result)
}

impl PartsRepository for CsvPartsRepository {
    fn last_part_number(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .parts()?
            .into_iter()
            .map(|record| record.part_number)
            .max())
    }

    fn last_manufacturer_id(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .manufacturers()?
            .into_iter()
            .map(|record| record.manufacturer_id)
            .max())
    }

    fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        Ok(self
            .manufacturers()?
            .iter()
            .map(ManufacturerRecord::build_manufacturer)
            .collect())
    }

    fn lookup_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, RepositoryError> {
        Ok(self
            .manufacturers()?
            .iter()
            .find(|record| record.name == name)
            .map(ManufacturerRecord::build_manufacturer))
    }

    fn lookup_manufacturer_by_id(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, RepositoryError> {
        Ok(self
            .manufacturers()?
            .iter()
            .find(|record| record.manufacturer_id == manufacturer_id)
            .map(ManufacturerRecord::build_manufacturer))
    }

    fn list_parts(&self) -> Result<Vec<Part>, RepositoryError> {
        Ok(self
            .parts()?
            .iter()
            .map(PartRecord::build_part)
            .sorted()
            .collect())
    }

    fn lookup_part(&self, part_number: &str) -> Result<Option<Part>, RepositoryError> {
        Ok(self
            .parts()?
            .iter()
            .find(|record| record.part_number == part_number)
            .map(PartRecord::build_part))
    }

    fn lookup_manufacturer_part_by_mpn(&self, mpn: &str) -> Result<Option<ManufacturerPart>, RepositoryError> {
        Ok(self
            .manufacturer_parts()?
            .iter()
            .find(|record| record.mpn == mpn)
            .map(ManufacturerPartRecord::build_manufacturer_part))
    }

    fn manufacturer_parts_for(&self, part_number: &str) -> Result<Vec<ManufacturerPart>, RepositoryError> {
        Ok(self
            .manufacturer_parts()?
            .iter()
            .filter(|record| record.part_number == part_number)
            .map(ManufacturerPartRecord::build_manufacturer_part)
            .collect())
    }

    fn add_part(
        &mut self,
        part_number: &str,
        description: &str,
        manufacturer_id: &str,
        mpn: &str,
    ) -> Result<(), RepositoryError> {
        let parts_path = self.source.join(PARTS_FILE_NAME);
        let manufacturer_parts_path = self
            .source
            .join(MANUFACTURER_PARTS_FILE_NAME);

        // both files are loaded before either is written
        let mut parts: Vec<PartRecord> = load_records(&parts_path, "part")?;
        let mut manufacturer_parts: Vec<ManufacturerPartRecord> =
            load_records(&manufacturer_parts_path, "manufacturer part")?;

        if parts
            .iter()
            .any(|record| record.part_number == part_number)
        {
            return Err(RepositoryError::Duplicate {
                kind: "part",
                value: part_number.to_string(),
            });
        }

        let previous_parts = parts.clone();
        parts.push(PartRecord {
            part_number: part_number.to_string(),
            description: description.to_string(),
        });
        manufacturer_parts.push(ManufacturerPartRecord {
            part_number: part_number.to_string(),
            manufacturer_id: manufacturer_id.to_string(),
            mpn: mpn.to_string(),
        });

        store_records(&parts_path, &parts).context("Unable to store part records")?;

        if let Err(error) = store_records(&manufacturer_parts_path, &manufacturer_parts) {
            let restored = match previous_parts.is_empty() {
                true => store_headers(&parts_path, &PART_HEADERS),
                false => store_records(&parts_path, &previous_parts),
            };
            if let Err(restore_error) = restored {
                warn!(
                    "Unable to restore part records. file: {}, cause: {:#}",
                    parts_path.display(),
                    restore_error
                );
            }
            return Err(error
                .context("Unable to store manufacturer part records")
                .into());
        }

        trace!("Stored part. part_number: {}", part_number);

        Ok(())
    }

    fn add_manufacturer(&mut self, name: &str, manufacturer_id: &str) -> Result<(), RepositoryError> {
        perform_store_operation(
            &self.source.join(MANUFACTURERS_FILE_NAME),
            "manufacturer",
            |records: &mut Vec<ManufacturerRecord>| {
                if records
                    .iter()
                    .any(|record| record.name == name)
                {
                    return Err(RepositoryError::Duplicate {
                        kind: "manufacturer name",
                        value: name.to_string(),
                    });
                }
                if records
                    .iter()
                    .any(|record| record.manufacturer_id == manufacturer_id)
                {
                    return Err(RepositoryError::Duplicate {
                        kind: "manufacturer id",
                        value: manufacturer_id.to_string(),
                    });
                }

                records.push(ManufacturerRecord {
                    name: name.to_string(),
                    manufacturer_id: manufacturer_id.to_string(),
                });
                Ok(())
            },
        )
    }

    fn update_description(&mut self, part_number: &str, description: &str) -> Result<(), RepositoryError> {
        perform_store_operation(
            &self.source.join(PARTS_FILE_NAME),
            "part",
            |records: &mut Vec<PartRecord>| {
                let record = records
                    .iter_mut()
                    .find(|record| record.part_number == part_number)
                    .ok_or_else(|| RepositoryError::Missing {
                        kind: "part",
                        value: part_number.to_string(),
                    })?;

                record.description = description.to_string();
                Ok(())
            },
        )
    }

    fn update_manufacturer_part_number(
        &mut self,
        part_number: &str,
        old_mpn: &str,
        new_mpn: &str,
        manufacturer_id: &str,
    ) -> Result<(), RepositoryError> {
        perform_store_operation(
            &self
                .source
                .join(MANUFACTURER_PARTS_FILE_NAME),
            "manufacturer part",
            |records: &mut Vec<ManufacturerPartRecord>| {
                let record = records
                    .iter_mut()
                    .find(|record| {
                        record.part_number == part_number
                            && record.mpn == old_mpn
                            && record.manufacturer_id == manufacturer_id
                    })
                    .ok_or_else(|| RepositoryError::Missing {
                        kind: "manufacturer part",
                        value: old_mpn.to_string(),
                    })?;

                record.mpn = new_mpn.to_string();
                Ok(())
            },
        )
    }
}
