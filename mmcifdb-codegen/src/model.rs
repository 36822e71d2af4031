//! Table and column descriptors handed to printers.

use crate::types::MappedType;

/// Column descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Python type annotation.
    pub host_type: String,
    /// SQLAlchemy column type.
    pub descriptor: String,
    /// Primary key marker.
    pub index: bool,
    /// Nullable flag.
    pub nullable: bool,
    /// Default value literal, unquoted.
    pub default: Option<String>,
}

impl Column {
    /// Creates a non-key, non-nullable column without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, mapped: MappedType) -> Self {
        Self {
            name: name.into(),
            host_type: mapped.host_type.to_string(),
            descriptor: mapped.descriptor,
            index: false,
            nullable: false,
            default: None,
        }
    }

    /// Returns true if the column holds Python strings.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.host_type == "str"
    }
}

/// Table descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Returns the primary key columns.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.index)
    }
}
