//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use plugzip_core::PackReport;
use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;
use std::io::{self};

/// Collects entry names while packing and prints one document at the end.
#[derive(Default)]
pub struct JsonFormatter {
    entries: RefCell<Vec<String>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput {
    output_path: String,
    entries_added: usize,
    bytes_read: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    entries: Vec<String>,
}

impl PackOutput {
    fn new(report: &PackReport, entries: Vec<String>) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            entries_added: report.entries_added,
            bytes_read: report.bytes_read,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            entries,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_entry_added(&self, archive_name: &str) {
        self.entries.borrow_mut().push(archive_name.to_string());
    }

    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        let entries = self.entries.take();
        let output = JsonOutput::success("pack", PackOutput::new(report, entries));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("pack", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
