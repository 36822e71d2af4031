//! # mmcifdb CIF
//!
//! CIF 1.1 / STAR document parser.
//!
//! This crate provides:
//! - A tokenizer for CIF syntax (quoted strings, text fields, comments)
//! - A document model of data blocks, save frames, pairs and loops
//! - Case-insensitive tag lookup used by the dictionary reader
//!
//! Dictionaries in DDL2 format (such as the PDBx/mmCIF dictionary) keep every
//! category and item definition in its own save frame, so frames are first
//! class citizens of the model.

pub mod document;
pub mod error;
pub mod lexer;
pub mod parser;

pub use document::{Block, Document, Entry, Frame, Loop, Pair, TagLookup, Value};
pub use error::{ParseError, Result};
pub use parser::{parse, parse_file};
