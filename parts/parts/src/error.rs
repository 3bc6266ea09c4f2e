use thiserror::Error;

use crate::validation::Field;
use crate::workflow::WorkflowStateKind;

/// A malformed part number or manufacturer id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Expected exactly one '-' separator. value: '{value}', separators: {count}")]
    SeparatorCount { value: String, count: usize },

    #[error("Non-numeric segment. value: '{value}', segment: '{segment}'")]
    InvalidSegment { value: String, segment: String },

    #[error("Missing 'M' marker. value: '{0}'")]
    MissingMarker(String),

    #[error("Numbering exhausted, no more values can be allocated. last: '{0}'")]
    Overflow(String),
}

/// A field length outside its bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}, length must be between {min} and {max} characters. length: {actual}")]
pub struct ValidationError {
    pub field: Field,
    pub min: usize,
    pub max: usize,
    pub actual: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Manufacturer not found. name: '{0}'")]
    Manufacturer(String),

    #[error("Part not found. part_number: '{0}'")]
    Part(String),

    #[error("Manufacturer part not found. mpn: '{0}'")]
    ManufacturerPart(String),
}

/// Raised by a repository when it rejects an operation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Duplicate {kind}. value: '{value}'")]
    Duplicate { kind: &'static str, value: String },

    #[error("No such {kind}. value: '{value}'")]
    Missing { kind: &'static str, value: String },

    #[error("Storage error. cause: {0:#}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum PartsError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Operation not allowed in the current state. expected: {expected}, actual: {actual}")]
    InvalidState {
        expected: WorkflowStateKind,
        actual: WorkflowStateKind,
    },
}
