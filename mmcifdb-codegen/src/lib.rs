//! # mmcifdb Codegen
//!
//! SQLAlchemy model generation from dictionary categories.
//!
//! This crate provides:
//! - Type code mapping to Python and SQLAlchemy column types
//! - Category to table mapping with unmapped-type reporting
//! - Declarative ORM and imperative Core printers

pub mod error;
pub mod model;
pub mod printer;
pub mod schema_map;
pub mod types;

pub use error::CodegenError;
pub use model::{Column, Table};
pub use printer::{CorePrinter, OrmPrinter, Printer, PrinterKind};
pub use schema_map::{Mapping, RenderSummary, SchemaMap, SkippedItem};
pub use types::{MappedType, TypeKind, map_type};

use mmcifdb_dict::DictReader;

/// Generates Python source from dictionary text.
///
/// # Arguments
/// * `dictionary` - DDL2 dictionary content
/// * `categories` - Category ids to generate tables for
/// * `kind` - Output style
/// * `include_imports` - Whether to emit import statements
///
/// # Returns
/// Generated Python code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or rendering fails.
pub fn generate_from_str<S: AsRef<str>>(
    dictionary: &str,
    categories: &[S],
    kind: PrinterKind,
    include_imports: bool,
) -> Result<String, CodegenError> {
    let reader = DictReader::parse(dictionary)?;
    generate(&reader, categories, kind, include_imports)
}

/// Generates Python source from a dictionary file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or rendering fails.
pub fn generate_from_file<S: AsRef<str>>(
    path: &std::path::Path,
    categories: &[S],
    kind: PrinterKind,
    include_imports: bool,
) -> Result<String, CodegenError> {
    let reader = DictReader::from_path(path)?;
    generate(&reader, categories, kind, include_imports)
}

fn generate<S: AsRef<str>>(
    reader: &DictReader,
    categories: &[S],
    kind: PrinterKind,
    include_imports: bool,
) -> Result<String, CodegenError> {
    let mut schema = SchemaMap::new();
    schema.add_categories(reader.get_categories(categories, None));

    let mut printer = kind.create(include_imports);
    let mut buffer = Vec::new();
    schema.render(printer.as_mut(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CodegenError::generation(e.to_string()))
}
