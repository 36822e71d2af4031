//! `mmcif-db-tool` command-line entry point.

mod args;

use anyhow::Result;
use args::Cli;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    mmcifdb::logging::init_tracing(cli.verbose)?;

    let config = cli.into_config();
    let report = mmcifdb::run(&config)?;

    tracing::info!(
        "Generated {} table(s); {} category id(s) missing, {} item(s) skipped",
        report.tables.len(),
        report.missing.len(),
        report.skipped.len()
    );
    Ok(())
}
