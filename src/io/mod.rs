//! Reading and writing precomputed RSD tables.

mod json;

pub use json::{read_report, read_table, write_report, write_table};

use crate::errors::ValidationError;

/// Generic I/O and format-conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),
}
