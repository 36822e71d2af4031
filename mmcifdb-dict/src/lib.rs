//! # mmcifdb Dict
//!
//! DDL2 dictionary reader.
//!
//! This crate provides:
//! - Category and item definitions extracted from dictionary save frames
//! - Resolution of grouped items defined in shared `_item.name` loops
//! - Item-level include/exclude filtering
//! - Value clean-up for quoted and text-field values

pub mod error;
pub mod filter;
pub mod model;
pub mod reader;

pub use error::DictError;
pub use filter::ItemFilter;
pub use model::{Category, Item, category_of, local_name};
pub use reader::{DictReader, read_categories, strip_value};
