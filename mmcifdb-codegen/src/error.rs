//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Dictionary reading error.
    #[error("dictionary error: {0}")]
    Dict(#[from] mmcifdb_dict::DictError),

    /// IO error while writing generated code.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Unknown printer name.
    #[error("unknown printer '{name}', expected 'orm' or 'core'")]
    UnknownPrinter {
        /// Name given.
        name: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
