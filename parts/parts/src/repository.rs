use crate::error::RepositoryError;
use crate::manufacturer::Manufacturer;
use crate::part::{ManufacturerPart, Part};

/// Storage for parts and manufacturers.
///
/// Identifiers are passed and returned exactly as stored, parsing them is left to the caller.
///
/// Implementations:
/// * `stores::csv_repository::CsvPartsRepository`, a directory of CSV files.
/// * `parts::memory::InMemoryPartsRepository`, for tests, behind the `testing` feature.
pub trait PartsRepository {
    /// The greatest part number issued so far.
    fn last_part_number(&self) -> Result<Option<String>, RepositoryError>;

    /// The greatest manufacturer id issued so far.
    fn last_manufacturer_id(&self) -> Result<Option<String>, RepositoryError>;

    fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError>;

    fn list_manufacturer_names(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .list_manufacturers()?
            .into_iter()
            .map(|manufacturer| manufacturer.name)
            .collect())
    }

    fn lookup_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, RepositoryError>;

    fn lookup_manufacturer_by_id(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, RepositoryError>;

    /// All parts, ordered by part number.
    fn list_parts(&self) -> Result<Vec<Part>, RepositoryError>;

    fn lookup_part(&self, part_number: &str) -> Result<Option<Part>, RepositoryError>;

    fn lookup_manufacturer_part_by_mpn(&self, mpn: &str) -> Result<Option<ManufacturerPart>, RepositoryError>;

    fn manufacturer_parts_for(&self, part_number: &str) -> Result<Vec<ManufacturerPart>, RepositoryError>;

    /// Adds a part and its manufacturer part.
    ///
    /// Fails with [`RepositoryError::Duplicate`] if the part number is already in use.
    fn add_part(
        &mut self,
        part_number: &str,
        description: &str,
        manufacturer_id: &str,
        mpn: &str,
    ) -> Result<(), RepositoryError>;

    /// Fails with [`RepositoryError::Duplicate`] if the name or id is already in use.
    fn add_manufacturer(&mut self, name: &str, manufacturer_id: &str) -> Result<(), RepositoryError>;

    fn update_description(&mut self, part_number: &str, description: &str) -> Result<(), RepositoryError>;

    fn update_manufacturer_part_number(
        &mut self,
        part_number: &str,
        old_mpn: &str,
        new_mpn: &str,
        manufacturer_id: &str,
    ) -> Result<(), RepositoryError>;
}
