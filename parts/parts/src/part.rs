/// Manufacturer part number shown, and pre-filled for new parts, when there is none.
pub const DEFAULT_MPN: &str = "N/A";

#[derive(Debug, Clone)]
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Part {
    pub part_number: String,
    pub description: String,
}

impl Part {
    pub fn new(part_number: String, description: String) -> Self {
        Self {
            part_number,
            description,
        }
    }
}

/// Links a part to a manufacturer and the manufacturer's own part number.
///
/// A part can have any number of these.
#[derive(Debug, Clone)]
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ManufacturerPart {
    pub part_number: String,
    pub manufacturer_id: String,
    pub mpn: String,
}

impl ManufacturerPart {
    pub fn new(part_number: String, manufacturer_id: String, mpn: String) -> Self {
        Self {
            part_number,
            manufacturer_id,
            mpn,
        }
    }
}

/// User-entered fields for a part that is yet to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPart {
    pub part_number: String,
    pub description: String,
    pub manufacturer: String,
    pub mpn: String,
}

impl NewPart {
    pub fn new(
        part_number: impl Into<String>,
        description: impl Into<String>,
        manufacturer: impl Into<String>,
        mpn: impl Into<String>,
    ) -> Self {
        Self {
            part_number: part_number.into(),
            description: description.into(),
            manufacturer: manufacturer.into(),
            mpn: mpn.into(),
        }
    }
}
