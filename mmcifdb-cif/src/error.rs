//! Error types for CIF parsing.

use thiserror::Error;

/// Error type for CIF document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `;` text field was opened but never closed.
    #[error("unterminated text field starting at line {line}")]
    UnterminatedTextField {
        /// Line where the text field starts.
        line: usize,
    },

    /// A quoted string was opened but never closed.
    #[error("unterminated quoted string at line {line}")]
    UnterminatedQuote {
        /// Line where the quoted string starts.
        line: usize,
    },

    /// A token appeared where the grammar does not allow it.
    #[error("unexpected {token} at line {line}: {context}")]
    UnexpectedToken {
        /// Description of the offending token.
        token: String,
        /// Line of the offending token.
        line: usize,
        /// What the parser was doing.
        context: String,
    },

    /// A tag was not followed by a value.
    #[error("tag '{tag}' at line {line} has no value")]
    MissingValue {
        /// Tag name.
        tag: String,
        /// Line of the tag.
        line: usize,
    },

    /// Loop values do not fill a whole number of rows.
    #[error("loop at line {line} has {values} values for {tags} tags")]
    LoopMismatch {
        /// Line of the `loop_` keyword.
        line: usize,
        /// Number of tags in the loop header.
        tags: usize,
        /// Number of values read.
        values: usize,
    },

    /// Reserved word that this parser does not support.
    #[error("unsupported reserved word '{word}' at line {line}")]
    Unsupported {
        /// The reserved word.
        word: String,
        /// Line of the word.
        line: usize,
    },

    /// Save frame still open at the end of a block.
    #[error("save frame '{name}' is not terminated")]
    UnterminatedFrame {
        /// Frame name.
        name: String,
    },

    /// The document does not contain exactly one data block.
    #[error("expected exactly one data block, found {found}")]
    BlockCount {
        /// Number of data blocks found.
        found: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(
        token: impl Into<String>,
        line: usize,
        context: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            token: token.into(),
            line,
            context: context.into(),
        }
    }
}

/// Result type alias for CIF parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
