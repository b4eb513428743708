//! Error types for loading and querying the meteorite table.

use std::path::PathBuf;

use thiserror::Error;

use super::model::Field;

/// Any failure while turning a source file into a [`MeteoriteTable`].
///
/// [`MeteoriteTable`]: super::model::MeteoriteTable
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// The header row does not describe a usable table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required column '{}' ({field}) is missing from the header", .field.source_label())]
    MissingColumn { field: Field },

    #[error("columns {first} and {second} both map to '{field}'")]
    DuplicateColumn {
        field: Field,
        first: usize,
        second: usize,
    },
}

/// A retained row carries text that is not a valid number for its field.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row {row}: '{value}' is not a valid {field}")]
pub struct DataError {
    /// 1-based data row (the header is not counted).
    pub row: usize,
    pub field: Field,
    pub value: String,
}

/// Filter parameters outside their domain.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidParams {
    #[error("minimum mass must be a finite value >= 0, got {0}")]
    MassMin(f64),

    #[error("year range is inverted: {min} > {max}")]
    YearRange { min: i32, max: i32 },

    #[error("top-N must be at least 1")]
    TopN,
}
