use std::path::Path;

use crate::csv::{
    ManufacturerPartRecord, ManufacturerRecord, PartRecord, MANUFACTURERS_FILE_NAME, MANUFACTURER_PARTS_FILE_NAME,
    PARTS_FILE_NAME,
};
use crate::csv_repository::{store_records, PartsSource};

/// Writes a store directory with the given content.
#[derive(Default)]
pub struct StoreBuilder {
    parts: Vec<PartRecord>,
    manufacturers: Vec<ManufacturerRecord>,
    manufacturer_parts: Vec<ManufacturerPartRecord>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_manufacturer(mut self, name: &str, manufacturer_id: &str) -> Self {
        self.manufacturers
            .push(ManufacturerRecord {
                name: name.to_string(),
                manufacturer_id: manufacturer_id.to_string(),
            });
        self
    }

    pub fn with_part(mut self, part_number: &str, description: &str, manufacturer_id: &str, mpn: &str) -> Self {
        self.parts.push(PartRecord {
            part_number: part_number.to_string(),
            description: description.to_string(),
        });
        self.manufacturer_parts
            .push(ManufacturerPartRecord {
                part_number: part_number.to_string(),
                manufacturer_id: manufacturer_id.to_string(),
                mpn: mpn.to_string(),
            });
        self
    }

    /// Writes the files into `directory`, which must exist.
    pub fn build(self, directory: &Path) -> Result<PartsSource, anyhow::Error> {
        let source = PartsSource::from_path(directory);

        store_records(&source.join(PARTS_FILE_NAME), &self.parts)?;
        store_records(&source.join(MANUFACTURERS_FILE_NAME), &self.manufacturers)?;
        store_records(&source.join(MANUFACTURER_PARTS_FILE_NAME), &self.manufacturer_parts)?;

        Ok(source)
    }
}
