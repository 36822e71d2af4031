//! Category to table mapping.

use crate::error::CodegenError;
use crate::model::{Column, Table};
use crate::printer::Printer;
use crate::types::map_type;
use mmcifdb_dict::{Category, Item};
use std::fmt;
use std::io::Write;

/// Item left out of a table because its type code is not mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Owning category.
    pub category: String,
    /// Local item name.
    pub item: String,
    /// Type code that could not be mapped, if any.
    pub type_code: Option<String>,
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_code {
            Some(code) => write!(f, "{}.{} (unknown type '{}')", self.category, self.item, code),
            None => write!(f, "{}.{} (no type)", self.category, self.item),
        }
    }
}

/// Result of mapping categories to tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    /// One table per category, in category order.
    pub tables: Vec<Table>,
    /// Items without a mapped type.
    pub skipped: Vec<SkippedItem>,
}

/// Summary of a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Names of the rendered tables, in output order.
    pub tables: Vec<String>,
    /// Items left out of their tables.
    pub skipped: Vec<SkippedItem>,
}

/// Maps dictionary categories to table descriptors.
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    categories: Vec<Category>,
}

impl SchemaMap {
    /// Creates an empty schema map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends categories to the map.
    pub fn add_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        self.categories.extend(categories);
    }

    /// Returns the accumulated categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Maps every category to a table.
    ///
    /// Items with an unknown or missing type code are skipped with a warning;
    /// their table is still produced.
    #[must_use]
    pub fn map(&self) -> Mapping {
        let mut mapping = Mapping::default();

        for category in &self.categories {
            let mut table = Table::new(&category.id);
            for item in category.items() {
                match item_column(item) {
                    Some(column) => table.columns.push(column),
                    None => {
                        tracing::warn!(
                            "Unknown type for {}.{}: {}",
                            category.id,
                            item.name,
                            item.type_code.as_deref().unwrap_or("<none>")
                        );
                        mapping.skipped.push(SkippedItem {
                            category: category.id.clone(),
                            item: item.name.clone(),
                            type_code: item.type_code.clone(),
                        });
                    }
                }
            }
            mapping.tables.push(table);
        }

        mapping
    }

    /// Returns the mapped tables.
    #[must_use]
    pub fn tables(&self) -> Vec<Table> {
        self.map().tables
    }

    /// Maps every category, hands the tables to `printer` and renders to `out`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the printer fails to write.
    pub fn render(
        &self,
        printer: &mut dyn Printer,
        out: &mut dyn Write,
    ) -> Result<RenderSummary, CodegenError> {
        let Mapping { tables, skipped } = self.map();
        let names = tables.iter().map(|t| t.name.clone()).collect();

        for table in tables {
            printer.add_table(table);
        }
        printer.render(out)?;

        tracing::info!(
            "Rendered {} table(s), skipped {} item(s)",
            printer.tables().len(),
            skipped.len()
        );

        Ok(RenderSummary {
            tables: names,
            skipped,
        })
    }
}

/// Builds the column for an item, or `None` if its type is not mapped.
fn item_column(item: &Item) -> Option<Column> {
    let mapped = map_type(item.type_code.as_deref()?)?;

    let mut column = Column::new(&item.name, mapped);
    column.index = item.is_index();
    column.nullable = item.mandatory_code;
    column.default = item.default_value.clone();
    Some(column)
}
