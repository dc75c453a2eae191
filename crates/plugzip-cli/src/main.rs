//! plugzip - packages a WordPress plugin and its build output into a ZIP
//! archive ready for upload.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();

    commands::pack::execute(&*formatter, show_progress).inspect_err(|e| formatter.format_error(e))
}
