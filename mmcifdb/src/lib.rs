//! # mmcifdb
//!
//! Generate SQLAlchemy database models from mmCIF/PDBx dictionary categories.
//!
//! The dictionary is a DDL2 CIF document whose save frames define categories
//! (tables) and items (columns). The requested categories are extracted,
//! their item type codes mapped to SQLAlchemy column types, and the result
//! printed as declarative ORM classes or imperative Core tables.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mmcifdb::{GenerateConfig, PrinterKind};
//!
//! let config = GenerateConfig::new("mmcif_pdbx_v50.dic")
//!     .with_categories(["chem_comp", "chem_comp_atom"])
//!     .with_printer(PrinterKind::Core)
//!     .with_output("models.py");
//!
//! let report = mmcifdb::run(&config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`cif`] - CIF document parsing
//! - [`dict`] - Category and item extraction from a dictionary
//! - [`codegen`] - Type mapping and Python printers

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

/// CIF document parsing.
pub mod cif {
    pub use mmcifdb_cif::*;
}

/// Dictionary reading.
pub mod dict {
    pub use mmcifdb_dict::*;
}

/// Code generation from dictionary categories.
pub mod codegen {
    pub use mmcifdb_codegen::*;
}

// Re-export commonly used items at the crate root
pub use config::{CategorySource, FilterSource, GenerateConfig, read_name_list};
pub use error::{ConfigError, ToolError};
pub use pipeline::{RunReport, missing_categories, run, run_with_writer};

pub use mmcifdb_codegen::{Printer, PrinterKind, SchemaMap, SkippedItem};
pub use mmcifdb_dict::{Category, DictReader, Item, ItemFilter};
