use clap::Parser;
use mmcifdb::{GenerateConfig, PrinterKind};
use std::path::PathBuf;

/// mmcif-db-tool - SQLAlchemy models from mmCIF dictionary categories
#[derive(Parser, Debug)]
#[command(name = "mmcif-db-tool")]
#[command(version)]
#[command(about = "Generate SQLAlchemy models from mmCIF/PDBx dictionary categories", long_about = None)]
pub struct Cli {
    /// Path to the mmCIF/PDBx dictionary (e.g. mmcif_pdbx_v50.dic)
    pub dictionary: PathBuf,

    /// Categories to generate tables for
    #[arg(conflicts_with = "categories_file")]
    pub categories: Vec<String>,

    /// File listing categories, one per line
    #[arg(long = "categories-file")]
    pub categories_file: Option<PathBuf>,

    /// Output style: orm (declarative classes) or core (Table objects)
    #[arg(long = "printer", default_value = "orm")]
    pub printer: PrinterKind,

    /// File listing the only items to keep (e.g. chem_comp.id), one per line
    #[arg(long = "include-items", conflicts_with = "exclude_items")]
    pub include_items: Option<PathBuf>,

    /// File listing items to drop, one per line
    #[arg(long = "exclude-items")]
    pub exclude_items: Option<PathBuf>,

    /// Write generated code to this file instead of standard output
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Do not emit import statements
    #[arg(long = "no-imports")]
    pub no_imports: bool,

    /// Log discovery details to standard error
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Converts the parsed arguments into a run configuration.
    pub fn into_config(self) -> GenerateConfig {
        GenerateConfig {
            dictionary: self.dictionary,
            categories: self.categories,
            categories_file: self.categories_file,
            include_items: self.include_items,
            exclude_items: self.exclude_items,
            printer: self.printer,
            include_imports: !self.no_imports,
            output: self.output_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_categories() {
        let cli = Cli::try_parse_from(["mmcif-db-tool", "pdbx.dic", "chem_comp", "atom_site"])
            .expect("Failed to parse arguments");
        let config = cli.into_config();

        assert_eq!(config.dictionary, PathBuf::from("pdbx.dic"));
        assert_eq!(config.categories, vec!["chem_comp", "atom_site"]);
        assert_eq!(config.printer, PrinterKind::Orm);
        assert!(config.include_imports);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "mmcif-db-tool",
            "pdbx.dic",
            "--categories-file",
            "cats.txt",
            "--printer",
            "core",
            "--exclude-items",
            "exclude.txt",
            "--output-file",
            "models.py",
            "--no-imports",
            "-v",
        ])
        .expect("Failed to parse arguments");
        assert!(cli.verbose);

        let config = cli.into_config();
        assert_eq!(config.categories_file, Some(PathBuf::from("cats.txt")));
        assert_eq!(config.printer, PrinterKind::Core);
        assert_eq!(config.exclude_items, Some(PathBuf::from("exclude.txt")));
        assert_eq!(config.output, Some(PathBuf::from("models.py")));
        assert!(!config.include_imports);
    }

    #[test]
    fn test_conflicting_arguments() {
        let both_filters = Cli::try_parse_from([
            "mmcif-db-tool",
            "pdbx.dic",
            "chem_comp",
            "--include-items",
            "a.txt",
            "--exclude-items",
            "b.txt",
        ]);
        assert!(both_filters.is_err());

        let both_sources = Cli::try_parse_from([
            "mmcif-db-tool",
            "pdbx.dic",
            "chem_comp",
            "--categories-file",
            "cats.txt",
        ]);
        assert!(both_sources.is_err());
    }

    #[test]
    fn test_unknown_printer() {
        let result = Cli::try_parse_from(["mmcif-db-tool", "pdbx.dic", "x", "--printer", "sql"]);
        assert!(result.is_err());
    }
}
