//! Imperative Core table printer.

use super::{Printer, python_literal};
use crate::error::CodegenError;
use crate::model::{Column, Table};
use std::io::Write;

const IMPORTS: &[&str] = &[
    "from sqlalchemy import MetaData, Table, Column, Integer, String, Float, Date, DateTime, Boolean",
];

const PREAMBLE: &[&str] = &["metadata_obj = MetaData()"];

/// Printer for SQLAlchemy Core `Table` definitions.
#[derive(Debug, Clone, Default)]
pub struct CorePrinter {
    include_imports: bool,
    tables: Vec<Table>,
}

impl CorePrinter {
    /// Creates a new Core printer.
    #[must_use]
    pub fn new(include_imports: bool) -> Self {
        Self {
            include_imports,
            tables: Vec::new(),
        }
    }

    fn column_text(column: &Column) -> String {
        let mut params = Vec::new();
        if column.index {
            params.push("primary_key=True".to_string());
        }
        if column.nullable {
            params.push("nullable=True".to_string());
        }
        if let Some(default) = &column.default {
            params.push(format!("default={}", python_literal(column, default)));
        }

        if params.is_empty() {
            format!("Column(\"{}\", {})", column.name, column.descriptor)
        } else {
            format!(
                "Column(\"{}\", {}, {})",
                column.name,
                column.descriptor,
                params.join(", ")
            )
        }
    }

    fn table_text(table: &Table) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} = Table(\"{}\",\n", table.name, table.name));
        output.push_str("    metadata_obj,\n");

        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|column| format!("    {}", Self::column_text(column)))
            .collect();
        if !columns.is_empty() {
            output.push_str(&columns.join(",\n"));
            output.push('\n');
        }
        output.push(')');

        output
    }
}

impl Printer for CorePrinter {
    fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn render(&self, out: &mut dyn Write) -> Result<(), CodegenError> {
        if self.include_imports {
            for line in IMPORTS {
                writeln!(out, "{line}")?;
            }
            out.write_all(b"\n\n")?;
        }

        for line in PREAMBLE {
            writeln!(out, "{line}")?;
        }
        out.write_all(b"\n\n")?;

        for table in &self.tables {
            tracing::debug!("Rendering table for {}", table.name);
            out.write_all(Self::table_text(table).as_bytes())?;
            out.write_all(b"\n\n")?;
        }

        out.flush()?;
        Ok(())
    }
}
