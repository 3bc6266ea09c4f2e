use crate::error::RepositoryError;
use crate::manufacturer::Manufacturer;
use crate::part::{ManufacturerPart, Part};
use crate::repository::PartsRepository;

/// A successful write, recorded in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryWrite {
    AddPart {
        part_number: String,
        description: String,
        manufacturer_id: String,
        mpn: String,
    },
    AddManufacturer {
        name: String,
        manufacturer_id: String,
    },
    UpdateDescription {
        part_number: String,
        description: String,
    },
    UpdateManufacturerPartNumber {
        part_number: String,
        old_mpn: String,
        new_mpn: String,
        manufacturer_id: String,
    },
}

/// Repository held entirely in memory, recording every write.
///
/// Data given to the `with_*` builder methods is not recorded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPartsRepository {
    parts: Vec<Part>,
    manufacturers: Vec<Manufacturer>,
    manufacturer_parts: Vec<ManufacturerPart>,
    writes: Vec<RepositoryWrite>,
}

impl InMemoryPartsRepository {
    pub fn with_manufacturer(mut self, name: &str, manufacturer_id: &str) -> Self {
        self.manufacturers
            .push(Manufacturer::new(name.to_string(), manufacturer_id.to_string()));
        self
    }

    pub fn with_part(mut self, part_number: &str, description: &str, manufacturer_id: &str, mpn: &str) -> Self {
        self.insert_part(part_number, description, manufacturer_id, mpn);
        self
    }

    /// A part with no manufacturer parts.
    pub fn with_bare_part(mut self, part_number: &str, description: &str) -> Self {
        self.parts
            .push(Part::new(part_number.to_string(), description.to_string()));
        self
    }

    pub fn writes(&self) -> &[RepositoryWrite] {
        &self.writes
    }

    fn insert_part(&mut self, part_number: &str, description: &str, manufacturer_id: &str, mpn: &str) {
        self.parts
            .push(Part::new(part_number.to_string(), description.to_string()));
        self.manufacturer_parts
            .push(ManufacturerPart::new(
                part_number.to_string(),
                manufacturer_id.to_string(),
                mpn.to_string(),
            ));
    }
}

impl PartsRepository for InMemoryPartsRepository {
    fn last_part_number(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .parts
            .iter()
            .map(|part| part.part_number.clone())
            .max())
    }

    fn last_manufacturer_id(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .manufacturers
            .iter()
            .map(|manufacturer| manufacturer.manufacturer_id.clone())
            .max())
    }

    fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        Ok(self.manufacturers.clone())
    }

    fn lookup_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, RepositoryError> {
        Ok(self
            .manufacturers
            .iter()
            .find(|manufacturer| manufacturer.name == name)
            .cloned())
    }

    fn lookup_manufacturer_by_id(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, RepositoryError> {
        Ok(self
            .manufacturers
            .iter()
            .find(|manufacturer| manufacturer.manufacturer_id == manufacturer_id)
            .cloned())
    }

    fn list_parts(&self) -> Result<Vec<Part>, RepositoryError> {
        let mut parts = self.parts.clone();
        parts.sort();
        Ok(parts)
    }

    fn lookup_part(&self, part_number: &str) -> Result<Option<Part>, RepositoryError> {
        Ok(self
            .parts
            .iter()
            .find(|part| part.part_number == part_number)
            .cloned())
    }

    fn lookup_manufacturer_part_by_mpn(&self, mpn: &str) -> Result<Option<ManufacturerPart>, RepositoryError> {
        Ok(self
            .manufacturer_parts
            .iter()
            .find(|manufacturer_part| manufacturer_part.mpn == mpn)
            .cloned())
    }

    fn manufacturer_parts_for(&self, part_number: &str) -> Result<Vec<ManufacturerPart>, RepositoryError> {
        Ok(self
            .manufacturer_parts
            .iter()
            .filter(|manufacturer_part| manufacturer_part.part_number == part_number)
            .cloned()
            .collect())
    }

    fn add_part(
        &mut self,
        part_number: &str,
        description: &str,
        manufacturer_id: &str,
        mpn: &str,
    ) -> Result<(), RepositoryError> {
        if self.lookup_part(part_number)?.is_some() {
            return Err(RepositoryError::Duplicate {
                kind: "part",
                value: part_number.to_string(),
            });
        }

        self.insert_part(part_number, description, manufacturer_id, mpn);
        self.writes.push(RepositoryWrite::AddPart {
            part_number: part_number.to_string(),
            description: description.to_string(),
            manufacturer_id: manufacturer_id.to_string(),
            mpn: mpn.to_string(),
        });
        Ok(())
    }

    fn add_manufacturer(&mut self, name: &str, manufacturer_id: &str) -> Result<(), RepositoryError> {
        if self.lookup_manufacturer_by_name(name)?.is_some() {
            return Err(RepositoryError::Duplicate {
                kind: "manufacturer name",
                value: name.to_string(),
            });
        }
        if self
            .lookup_manufacturer_by_id(manufacturer_id)?
            .is_some()
        {
            return Err(RepositoryError::Duplicate {
                kind: "manufacturer id",
                value: manufacturer_id.to_string(),
            });
        }

        self.manufacturers
            .push(Manufacturer::new(name.to_string(), manufacturer_id.to_string()));
        self.writes.push(RepositoryWrite::AddManufacturer {
            name: name.to_string(),
            manufacturer_id: manufacturer_id.to_string(),
        });
        Ok(())
    }

    fn update_description(&mut self, part_number: &str, description: &str) -> Result<(), RepositoryError> {
        let part = self
            .parts
            .iter_mut()
            .find(|part| part.part_number == part_number)
            .ok_or_else(|| RepositoryError::Missing {
                kind: "part",
                value: part_number.to_string(),
            })?;

        part.description = description.to_string();
        self.writes.push(RepositoryWrite::UpdateDescription {
            part_number: part_number.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    fn update_manufacturer_part_number(
        &mut self,
        part_number: &str,
        old_mpn: &str,
        new_mpn: &str,
        manufacturer_id: &str,
    ) -> Result<(), RepositoryError> {
        let manufacturer_part = self
            .manufacturer_parts
            .iter_mut()
            .find(|manufacturer_part| {
                manufacturer_part.part_number == part_number
                    && manufacturer_part.mpn == old_mpn
                    && manufacturer_part.manufacturer_id == manufacturer_id
            })
            .ok_or_else(|| RepositoryError::Missing {
                kind: "manufacturer part",
                value: old_mpn.to_string(),
            })?;

        manufacturer_part.mpn = new_mpn.to_string();
        self.writes
            .push(RepositoryWrite::UpdateManufacturerPartNumber {
                part_number: part_number.to_string(),
                old_mpn: old_mpn.to_string(),
                new_mpn: new_mpn.to_string(),
                manufacturer_id: manufacturer_id.to_string(),
            });
        Ok(())
    }
}
