//! SQLAlchemy source printers.
//!
//! Two output styles are supported: declarative ORM classes
//! ([`OrmPrinter`]) and imperative Core `Table` objects ([`CorePrinter`]).

pub mod declarative;
pub mod imperative;

pub use declarative::OrmPrinter;
pub use imperative::CorePrinter;

use crate::error::CodegenError;
use crate::model::{Column, Table};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Renders tables as Python source.
pub trait Printer {
    /// Queues a table for rendering.
    fn add_table(&mut self, table: Table);

    /// Returns the queued tables in insertion order.
    fn tables(&self) -> &[Table];

    /// Writes imports, the preamble and every queued table to `out`.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if writing fails.
    fn render(&self, out: &mut dyn Write) -> Result<(), CodegenError>;

    /// Renders into a string.
    ///
    /// # Errors
    /// Returns `CodegenError` if rendering fails.
    fn render_to_string(&self) -> Result<String, CodegenError> {
        let mut buffer = Vec::new();
        self.render(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| CodegenError::generation(e.to_string()))
    }
}

/// Printer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrinterKind {
    /// Declarative ORM classes.
    #[default]
    Orm,
    /// Imperative Core tables.
    Core,
}

impl PrinterKind {
    /// Creates a printer of this kind.
    #[must_use]
    pub fn create(self, include_imports: bool) -> Box<dyn Printer> {
        match self {
            Self::Orm => Box::new(OrmPrinter::new(include_imports)),
            Self::Core => Box::new(CorePrinter::new(include_imports)),
        }
    }
}

impl FromStr for PrinterKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orm" => Ok(Self::Orm),
            "core" => Ok(Self::Core),
            _ => Err(CodegenError::UnknownPrinter {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PrinterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orm => f.write_str("orm"),
            Self::Core => f.write_str("core"),
        }
    }
}

/// Converts a snake_case table name to a class name.
///
/// Each underscore-separated part is capitalized and the rest of the part
/// lowercased, so `pdbx_PDB_obs_spr` becomes `PdbxPdbObsSpr`.
#[must_use]
pub fn to_class_name(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = !c.is_ascii_alphabetic();
        } else {
            result.push(c.to_ascii_lowercase());
            capitalize_next = !c.is_ascii_alphabetic();
        }
    }

    result
}

/// Formats a column default as a Python literal.
///
/// Numeric columns get a bare number when the value parses, everything else
/// a single-quoted string.
///
/// Strings are quoted once (`default='x'`), never as a quoted repr inside
/// double quotes (`default="'x'"`).
#[must_use]
pub fn python_literal(column: &Column, value: &str) -> String {
    let numeric = match column.host_type.as_str() {
        "int" => value.parse::<i64>().is_ok(),
        "float" => value.parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    };
    if numeric {
        return value.to_string();
    }

    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            _ => literal.push(c),
        }
    }
    literal.push('\'');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeKind, map_type};

    fn column(code: &str) -> Column {
        Column::new("col", map_type(code).expect("mapped type"))
    }

    #[test]
    fn test_to_class_name() {
        assert_eq!(to_class_name("chem_comp"), "ChemComp");
        assert_eq!(to_class_name("atom_site"), "AtomSite");
        assert_eq!(to_class_name("pdbx_PDB_obs_spr"), "PdbxPdbObsSpr");
        assert_eq!(to_class_name("entity"), "Entity");
        assert_eq!(to_class_name("struct_ncs_dom_lim"), "StructNcsDomLim");
        assert_eq!(to_class_name("em_3d_fitting"), "Em3DFitting");
    }

    #[test]
    fn test_python_literal_numbers() {
        assert_eq!(python_literal(&column("int"), "0"), "0");
        assert_eq!(python_literal(&column("float"), "1.5"), "1.5");
        assert_eq!(python_literal(&column("int"), "abc"), "'abc'");
        assert_eq!(python_literal(&column("float"), "inf"), "'inf'");
    }

    #[test]
    fn test_python_literal_strings() {
        assert_eq!(python_literal(&column("code"), "no"), "'no'");
        assert_eq!(python_literal(&column("code"), "1"), "'1'");
        assert_eq!(python_literal(&column("text"), "it's"), "'it\\'s'");
        assert_eq!(python_literal(&column("text"), "a\\b\nc"), "'a\\\\b\\nc'");
    }

    #[test]
    fn test_printer_kind_from_str() {
        assert_eq!("orm".parse::<PrinterKind>().expect("orm"), PrinterKind::Orm);
        assert_eq!("CORE".parse::<PrinterKind>().expect("core"), PrinterKind::Core);
        assert!(matches!(
            "sql".parse::<PrinterKind>(),
            Err(CodegenError::UnknownPrinter { .. })
        ));
        assert_eq!(PrinterKind::default(), PrinterKind::Orm);
        assert_eq!(PrinterKind::Core.to_string(), "core");
    }

    #[test]
    fn test_printer_kind_create() {
        let mut printer = PrinterKind::Core.create(false);
        let mut table = Table::new("entity");
        table
            .columns
            .push(Column::new("id", TypeKind::VarChar(10).into()));
        printer.add_table(table);

        assert_eq!(printer.tables().len(), 1);
        let output = printer.render_to_string().expect("Failed to render");
        assert!(output.starts_with("metadata_obj = MetaData()"));
    }
}
