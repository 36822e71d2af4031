//! Error types for dictionary reading.

use thiserror::Error;

/// Error type for dictionary operations.
#[derive(Debug, Error)]
pub enum DictError {
    /// The dictionary could not be read or is not well-formed CIF.
    #[error("dictionary parse error: {0}")]
    Parse(#[from] mmcifdb_cif::ParseError),
}
