//! Apache Parquet file reader
//!
//! This module provides support for reading Parquet columnar format files.
//! Currently a placeholder - Parquet support is planned for a future release.

use crate::reader::{DataReader, ReaderError};
use crate::schema::DataSchema;

/// Parquet file reader (placeholder implementation)
pub struct ParquetReader {
    _path: String,
}

impl ParquetReader {
    /// Create a new Parquet reader for the given file path
    pub fn new(path: impl Into<String>) -> Result<Self, ReaderError> {
        Err(ReaderError::UnsupportedFormat(
            "Parquet support is not yet implemented".to_string(),
        ))
    }
}

impl DataReader for ParquetReader {
    fn schema(&self) -> Result<DataSchema, ReaderError> {
        Err(ReaderError::UnsupportedFormat(
            "Parquet support is not yet implemented".to_string(),
        ))
    }

    fn read_column(&self, _name: &str) -> Result<Vec<f64>, ReaderError> {
        Err(ReaderError::UnsupportedFormat(
            "Parquet support is not yet implemented".to_string(),
        ))
    }
}
