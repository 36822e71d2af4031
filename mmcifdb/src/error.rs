//! Error types for configuration and pipeline runs.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two mutually exclusive options were given.
    #[error("{first} and {second} cannot be used together")]
    Conflict {
        /// First option.
        first: &'static str,
        /// Second option.
        second: &'static str,
    },

    /// No category was requested.
    #[error("no categories requested")]
    NoCategories,

    /// The dictionary path does not name a file.
    #[error("dictionary not found: {}", path.display())]
    DictionaryNotFound {
        /// Dictionary path.
        path: PathBuf,
    },

    /// A category or item list file could not be read.
    #[error("failed to read list file {}: {source}", path.display())]
    ListFile {
        /// List file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a conflict error for two options.
    #[must_use]
    pub const fn conflict(first: &'static str, second: &'static str) -> Self {
        Self::Conflict { first, second }
    }
}

/// Error type for a generation run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dictionary reading error.
    #[error(transparent)]
    Dict(#[from] mmcifdb_dict::DictError),

    /// Code generation error.
    #[error(transparent)]
    Codegen(#[from] mmcifdb_codegen::CodegenError),

    /// The output file could not be written.
    #[error("failed to write output file {}: {source}", path.display())]
    Output {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: mmcifdb_codegen::CodegenError,
    },
}
