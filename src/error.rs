//! Error types for the level converter

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No {0} found")]
    MissingField(&'static str),

    #[error("Malformed {field} at byte {offset}: {reason}")]
    MalformedField {
        field: &'static str,
        offset: usize,
        reason: String,
    },

    #[error("Grid has {rows} rows but size is {size}")]
    RowCountMismatch { size: usize, rows: usize },

    #[error("Row {row} has {cells} cells but size is {size}")]
    RowLengthMismatch {
        size: usize,
        row: usize,
        cells: usize,
    },

    #[error("Letter \"{letter}\" at row {row}, column {col} has no entry in regionColors")]
    UnmappedLetter {
        letter: String,
        row: usize,
        col: usize,
    },

    #[error("Invalid puzzle data at token {token}: {reason}")]
    InvalidOutput { token: usize, reason: String },

    #[error("Output verification failed: wrote {expected} levels, read back {found}")]
    VerificationFailed { expected: usize, found: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LevelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = LevelError::MissingField("regionColors");
        assert_eq!(err.to_string(), "No regionColors found");
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = LevelError::DirectoryNotFound(PathBuf::from("nowhere/levels"));
        assert_eq!(err.to_string(), "Directory not found: nowhere/levels");
    }
}
