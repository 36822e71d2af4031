//! Generation pipeline.
//!
//! Reads the dictionary, extracts the requested categories, maps them to
//! tables and renders them to standard output or a file.

use crate::config::GenerateConfig;
use crate::error::ToolError;
use mmcifdb_codegen::{CodegenError, Printer, RenderSummary, SchemaMap, SkippedItem};
use mmcifdb_dict::{Category, DictReader};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rendered table names, in output order.
    pub tables: Vec<String>,
    /// Requested categories not found in the dictionary.
    pub missing: Vec<String>,
    /// Items left out because their type is not mapped.
    pub skipped: Vec<SkippedItem>,
}

impl RunReport {
    /// Returns true if every requested category and item was rendered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.skipped.is_empty()
    }
}

/// Runs a generation pass, writing to the configured output.
///
/// # Errors
/// Returns `ToolError` on invalid configuration, an unreadable dictionary or
/// a failed write. A failed output file is removed.
pub fn run(config: &GenerateConfig) -> Result<RunReport, ToolError> {
    match &config.output {
        Some(path) => run_to_file(config, path),
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            run_with_writer(config, &mut out)
        }
    }
}

/// Runs a generation pass, writing to `out`.
///
/// The configured output path is ignored.
///
/// # Errors
/// Returns `ToolError` on invalid configuration, an unreadable dictionary or
/// a failed write.
pub fn run_with_writer(
    config: &GenerateConfig,
    out: &mut dyn Write,
) -> Result<RunReport, ToolError> {
    let (schema, missing, mut printer) = prepare(config)?;
    let summary = schema.render(printer.as_mut(), out)?;
    Ok(report(summary, missing))
}

fn run_to_file(config: &GenerateConfig, path: &Path) -> Result<RunReport, ToolError> {
    let (schema, missing, mut printer) = prepare(config)?;

    tracing::info!("Writing {} output to {}", config.printer, path.display());
    let file = File::create(path).map_err(|e| ToolError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let mut writer = BufWriter::new(file);

    let result = schema
        .render(printer.as_mut(), &mut writer)
        .and_then(|summary| {
            writer.flush().map_err(CodegenError::from)?;
            Ok(summary)
        });

    match result {
        Ok(summary) => Ok(report(summary, missing)),
        Err(source) => {
            drop(writer);
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!("Failed to remove partial output {}: {}", path.display(), e);
            }
            Err(ToolError::Output {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Validates the configuration and reads the requested categories.
fn prepare(
    config: &GenerateConfig,
) -> Result<(SchemaMap, Vec<String>, Box<dyn Printer>), ToolError> {
    config.validate()?;
    let requested = config.load_categories()?;
    let filter = config.load_filter()?;

    tracing::info!("Processing categories: {}", requested.join(", "));
    let reader = DictReader::from_path(&config.dictionary)?;
    let categories = reader.get_categories(&requested, filter.as_ref());
    let missing = missing_categories(&requested, &categories);

    let mut schema = SchemaMap::new();
    schema.add_categories(categories);

    Ok((schema, missing, config.printer.create(config.include_imports)))
}

/// Returns the requested ids without a matching category, in request order.
#[must_use]
pub fn missing_categories(requested: &[String], found: &[Category]) -> Vec<String> {
    let found: HashSet<&str> = found.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();

    requested
        .iter()
        .filter(|id| !found.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

fn report(summary: RenderSummary, missing: Vec<String>) -> RunReport {
    RunReport {
        tables: summary.tables,
        missing,
        skipped: summary.skipped,
    }
}
