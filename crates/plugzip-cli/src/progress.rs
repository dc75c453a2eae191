//! Progress reporting for the pack command.

use crate::output::OutputFormatter;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use plugzip_core::PackReport;
use plugzip_core::ProgressCallback;
use std::fmt::Write;
use std::time::Duration;

/// Bridges core progress events to the terminal.
///
/// Entry announcements go through the formatter. When stderr is a TTY a
/// spinner shows the running entry count and bytes read; otherwise the bar
/// is hidden and only the formatter output remains.
pub struct CliProgress<'a> {
    bar: ProgressBar,
    formatter: &'a dyn OutputFormatter,
    bytes_written: u64,
}

impl<'a> CliProgress<'a> {
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter, show_bar: bool) -> Self {
        let bar = if show_bar {
            let bar = ProgressBar::new_spinner();
            // "Packing ⠋ 12 files (1.4 MB)"
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{msg} {spinner:.cyan} {pos} files ({bytes})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
                        write!(w, "{}", humanize_bytes(state.len().unwrap_or(0))).unwrap_or(());
                    }),
            );
            bar.set_message("Packing");
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            formatter,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress<'_> {
    fn on_entry_start(&mut self, archive_name: &str, _index: usize) {
        let formatter = self.formatter;
        self.bar
            .suspend(|| formatter.format_entry_added(archive_name));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        // The spinner has no total; its length slot carries the byte count.
        self.bar.set_length(self.bytes_written);
    }

    fn on_entry_complete(&mut self, _archive_name: &str) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self, report: &PackReport) {
        tracing::debug!(
            entries = report.entries_added,
            bytes = self.bytes_written,
            "packing finished"
        );
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
