use std::io;
use thiserror::Error;

use svcanon_core::errors::RecordParseError;

/// Error type for reading variant files.
#[derive(Error, Debug)]
pub enum VcfError {
    /// IO error occurred while reading the input.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// One data line could not be parsed. The rest of the file is still readable.
    #[error("Malformed record at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordParseError,
    },
}

impl VcfError {
    /// Whether reading can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VcfError::Record { .. })
    }
}

/// Result type alias for svcanon-io read operations.
pub type Result<T> = std::result::Result<T, VcfError>;
