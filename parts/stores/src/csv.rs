use parts::manufacturer::Manufacturer;
use parts::part::{ManufacturerPart, Part};

pub const PARTS_FILE_NAME: &str = "parts.csv";
pub const MANUFACTURERS_FILE_NAME: &str = "manufacturers.csv";
pub const MANUFACTURER_PARTS_FILE_NAME: &str = "manufacturer_parts.csv";

pub const PART_HEADERS: [&str; 2] = ["PartNumber", "Description"];
pub const MANUFACTURER_PART_HEADERS: [&str; 3] = ["PartNumber", "ManufacturerId", "Mpn"];

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartRecord {
    pub part_number: String,
    pub description: String,
}

impl PartRecord {
    pub fn build_part(&self) -> Part {
        Part::new(self.part_number.clone(), self.description.clone())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManufacturerRecord {
    pub name: String,
    pub manufacturer_id: String,
}

impl ManufacturerRecord {
    pub fn build_manufacturer(&self) -> Manufacturer {
        Manufacturer::new(self.name.clone(), self.manufacturer_id.clone())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManufacturerPartRecord {
    pub part_number: String,
    pub manufacturer_id: String,
    pub mpn: String,
}

impl ManufacturerPartRecord {
    pub fn build_manufacturer_part(&self) -> ManufacturerPart {
        ManufacturerPart::new(self.part_number.clone(), self.manufacturer_id.clone(), self.mpn.clone())
    }
}
