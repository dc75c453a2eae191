//! Packaging reports and progress callbacks.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed packaging run.
///
/// # Examples
///
/// ```
/// use plugzip_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.entries_added = 3;
/// report.bytes_read = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Archive that was written.
    pub output_path: PathBuf,

    /// Number of entries written, the top-level file included.
    pub entries_added: usize,

    /// Total uncompressed bytes read from the inputs.
    pub bytes_read: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl PackReport {
    /// Creates an empty report for the given output.
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Ratio of uncompressed input to archive size.
    ///
    /// Returns `0.0` when nothing has been written yet.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }

    /// Space saved by compression, in percent of the input.
    ///
    /// Can be negative for tiny inputs, where ZIP headers outweigh the data.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_compressed as f64 / self.bytes_read as f64) * 100.0
    }
}

/// Callback trait for observing a packaging run entry by entry.
///
/// The total number of entries is not known up front because the directory
/// is walked lazily, so entries are identified by a running 1-based index.
///
/// # Examples
///
/// ```
/// use plugzip_core::PackReport;
/// use plugzip_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, archive_name: &str, _index: usize) {
///         println!("Adding {archive_name}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _archive_name: &str) {}
///
///     fn on_complete(&mut self, report: &PackReport) {
///         println!("{} entries", report.entries_added);
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry's bytes are written.
    fn on_entry_start(&mut self, archive_name: &str, index: usize);

    /// Called for each chunk copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once an entry has been fully written.
    fn on_entry_complete(&mut self, archive_name: &str);

    /// Called once after the archive has been finalized.
    fn on_complete(&mut self, report: &PackReport);
}

/// Progress callback that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _archive_name: &str, _index: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _archive_name: &str) {}

    fn on_complete(&mut self, _report: &PackReport) {}
}
