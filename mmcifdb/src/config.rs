//! Generation run configuration.
//!
//! A [`GenerateConfig`] holds the options of one run exactly as given, so
//! conflicting options can be reported by [`GenerateConfig::validate`] before
//! the dictionary is opened.

use crate::error::ConfigError;
use mmcifdb_codegen::PrinterKind;
use mmcifdb_dict::ItemFilter;
use std::path::{Path, PathBuf};

/// Where the requested category ids come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource<'a> {
    /// Ids given directly.
    List(&'a [String]),
    /// List file with one id per line.
    File(&'a Path),
}

/// Item filter list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource<'a> {
    /// Keep only the listed items of their categories.
    Include(&'a Path),
    /// Drop the listed items.
    Exclude(&'a Path),
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Dictionary file.
    pub dictionary: PathBuf,
    /// Category ids given directly.
    pub categories: Vec<String>,
    /// Category list file.
    pub categories_file: Option<PathBuf>,
    /// Include-items list file.
    pub include_items: Option<PathBuf>,
    /// Exclude-items list file.
    pub exclude_items: Option<PathBuf>,
    /// Output style.
    pub printer: PrinterKind,
    /// Whether to emit import statements.
    pub include_imports: bool,
    /// Output file, standard output when `None`.
    pub output: Option<PathBuf>,
}

impl GenerateConfig {
    /// Creates a configuration for a dictionary with ORM output and imports.
    #[must_use]
    pub fn new(dictionary: impl Into<PathBuf>) -> Self {
        Self {
            dictionary: dictionary.into(),
            categories: Vec::new(),
            categories_file: None,
            include_items: None,
            exclude_items: None,
            printer: PrinterKind::default(),
            include_imports: true,
            output: None,
        }
    }

    /// Sets the requested category ids.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the category list file.
    #[must_use]
    pub fn with_categories_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.categories_file = Some(path.into());
        self
    }

    /// Sets the include-items list file.
    #[must_use]
    pub fn with_include_items(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_items = Some(path.into());
        self
    }

    /// Sets the exclude-items list file.
    #[must_use]
    pub fn with_exclude_items(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude_items = Some(path.into());
        self
    }

    /// Sets the output style.
    #[must_use]
    pub fn with_printer(mut self, printer: PrinterKind) -> Self {
        self.printer = printer;
        self
    }

    /// Sets whether import statements are emitted.
    #[must_use]
    pub fn with_imports(mut self, include_imports: bool) -> Self {
        self.include_imports = include_imports;
        self
    }

    /// Sets the output file.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Checks option conflicts and the dictionary path.
    ///
    /// # Errors
    /// Returns `ConfigError` if exclusive options are combined, no category is
    /// requested, or the dictionary is not a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.category_source()?;
        self.filter_source()?;
        if !self.dictionary.is_file() {
            return Err(ConfigError::DictionaryNotFound {
                path: self.dictionary.clone(),
            });
        }
        Ok(())
    }

    /// Resolves where the category ids come from.
    ///
    /// # Errors
    /// Returns `ConfigError` if both or neither source is set.
    pub fn category_source(&self) -> Result<CategorySource<'_>, ConfigError> {
        match (self.categories.is_empty(), &self.categories_file) {
            (false, Some(_)) => Err(ConfigError::conflict("categories", "--categories-file")),
            (false, None) => Ok(CategorySource::List(&self.categories)),
            (true, Some(path)) => Ok(CategorySource::File(path)),
            (true, None) => Err(ConfigError::NoCategories),
        }
    }

    /// Resolves the item filter file, if any.
    ///
    /// # Errors
    /// Returns `ConfigError` if both include and exclude files are set.
    pub fn filter_source(&self) -> Result<Option<FilterSource<'_>>, ConfigError> {
        match (&self.include_items, &self.exclude_items) {
            (Some(_), Some(_)) => Err(ConfigError::conflict("--include-items", "--exclude-items")),
            (Some(path), None) => Ok(Some(FilterSource::Include(path))),
            (None, Some(path)) => Ok(Some(FilterSource::Exclude(path))),
            (None, None) => Ok(None),
        }
    }

    /// Returns the requested category ids, reading the list file if needed.
    ///
    /// # Errors
    /// Returns `ConfigError` if the list file cannot be read or is empty.
    pub fn load_categories(&self) -> Result<Vec<String>, ConfigError> {
        let categories = match self.category_source()? {
            CategorySource::List(list) => list.to_vec(),
            CategorySource::File(path) => read_name_list(path)?,
        };
        if categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        Ok(categories)
    }

    /// Builds the item filter from the configured list file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the list file cannot be read.
    pub fn load_filter(&self) -> Result<Option<ItemFilter>, ConfigError> {
        let filter = match self.filter_source()? {
            Some(FilterSource::Include(path)) => Some(ItemFilter::include(read_name_list(path)?)),
            Some(FilterSource::Exclude(path)) => Some(ItemFilter::exclude(read_name_list(path)?)),
            None => None,
        };
        Ok(filter)
    }
}

/// Reads a list file with one name per line.
///
/// Blank lines and lines starting with `#` are ignored; surrounding
/// whitespace is trimmed.
///
/// # Errors
/// Returns `ConfigError::ListFile` if the file cannot be read.
pub fn read_name_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ListFile {
        path: path.to_path_buf(),
        source,
    })?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    tracing::debug!("Read {} name(s) from {}", names.len(), path.display());
    Ok(names)
}
