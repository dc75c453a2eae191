//! CLI argument parsing using clap.
//!
//! Packaging takes no arguments: inputs and output are fixed. The flags only
//! change how results are displayed.

use clap::Parser;

#[derive(Parser)]
#[command(name = "plugzip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show a summary after packing and debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output the result in JSON format
    #[arg(short, long)]
    pub json: bool,
}
