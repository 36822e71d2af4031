//! Declarative ORM class printer.

use super::{Printer, python_literal, to_class_name};
use crate::error::CodegenError;
use crate::model::{Column, Table};
use std::io::Write;

const IMPORTS: &[&str] = &[
    "import datetime",
    "from typing import List",
    "from typing import Optional",
    "from sqlalchemy import ForeignKey",
    "from sqlalchemy import String",
    "from sqlalchemy.orm import DeclarativeBase",
    "from sqlalchemy.orm import Mapped",
    "from sqlalchemy.orm import mapped_column",
    "from sqlalchemy.orm import relationship",
];

const PREAMBLE: &[&str] = &["class Base(DeclarativeBase):", "    pass"];

/// Printer for SQLAlchemy declarative classes.
#[derive(Debug, Clone, Default)]
pub struct OrmPrinter {
    include_imports: bool,
    tables: Vec<Table>,
}

impl OrmPrinter {
    /// Creates a new ORM printer.
    #[must_use]
    pub fn new(include_imports: bool) -> Self {
        Self {
            include_imports,
            tables: Vec::new(),
        }
    }

    /// Generates one mapped attribute line.
    fn column_text(column: &Column) -> String {
        let mut params = Vec::new();
        if column.index {
            params.push("primary_key=True".to_string());
        }
        if column.is_string() {
            params.push(format!("type_={}", column.descriptor));
        }
        if let Some(default) = &column.default {
            params.push(format!("default={}", python_literal(column, default)));
        }

        let annotation = if column.nullable {
            format!("Mapped[Optional[{}]]", column.host_type)
        } else {
            format!("Mapped[{}]", column.host_type)
        };

        format!(
            "{}: {} = mapped_column({})",
            column.name,
            annotation,
            params.join(", ")
        )
    }

    /// Generates a class block for a table.
    fn table_text(table: &Table) -> String {
        let mut output = String::new();

        output.push_str(&format!("class {}(Base):\n", to_class_name(&table.name)));
        output.push_str(&format!("    __tablename__ = '{}'\n\n", table.name));

        for column in &table.columns {
            output.push_str(&format!("    {}\n", Self::column_text(column)));
        }

        output
    }
}

impl Printer for OrmPrinter {
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
            tracing::debug!("Rendering class for {}", table.name);
            out.write_all(Self::table_text(table).as_bytes())?;
            out.write_all(b"\n\n")?;
        }

        out.flush()?;
        Ok(())
    }
}
