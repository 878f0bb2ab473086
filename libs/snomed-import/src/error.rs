//! Error types for the SNOMED import

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Import errors. All of them abort the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: expected at least {expected} tab-separated fields, found {found}")]
    MissingFields {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid composite code id '{0}': expected <type>|<code>|<version>")]
    InvalidCompositeId(String),

    #[error("Code API error: {0}")]
    Api(#[from] snomed_code_client::Error),
}
