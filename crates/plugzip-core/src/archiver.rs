//! ZIP archive packaging.
//!
//! Writes the top-level file and every regular file of the source directory
//! into one archive, deflating each entry. Entries are streamed straight from
//! the directory walk into the writer.

use crate::ArchiveTask;
use crate::PackError;
use crate::Result;
use crate::naming;
use crate::report::NoopProgress;
use crate::report::PackReport;
use crate::report::ProgressCallback;
use crate::walker::DirWalker;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Packages the task's inputs into its output archive.
///
/// # Examples
///
/// ```no_run
/// use plugzip_core::ArchiveTask;
/// use plugzip_core::create_archive;
///
/// let report = create_archive(&ArchiveTask::default())?;
/// println!("Added {} entries", report.entries_added);
/// # Ok::<(), plugzip_core::PackError>(())
/// ```
///
/// # Errors
///
/// - [`PackError::MissingInputFile`] if the top-level file is missing or
///   unreadable. Nothing is written in that case.
/// - [`PackError::MissingInputDirectory`] if the source directory is missing
///   or cannot be listed. Nothing is written in that case either.
/// - [`PackError::UnreadableEntry`] if a walked file cannot be read.
/// - [`PackError::InvalidEntryName`] if a walked path cannot be named.
/// - [`PackError::DuplicateEntryName`] if two inputs resolve to the same
///   archive name.
/// - [`PackError::WriteFailure`] if the archive cannot be created, written or
///   finalized.
///
/// Errors raised after the output has been created leave a finalized but
/// incomplete archive behind.
pub fn create_archive(task: &ArchiveTask) -> Result<PackReport> {
    create_archive_with_progress(task, &mut NoopProgress)
}

/// Packages the task's inputs, reporting each entry to `progress`.
///
/// `on_entry_start` receives the archive name of every entry in the order
/// the entries are written, starting with the top-level file.
///
/// # Examples
///
/// ```no_run
/// use plugzip_core::ArchiveTask;
/// use plugzip_core::PackReport;
/// use plugzip_core::ProgressCallback;
/// use plugzip_core::create_archive_with_progress;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, archive_name: &str, _index: usize) {
///         println!("Adding {archive_name}");
///     }
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///     fn on_entry_complete(&mut self, _archive_name: &str) {}
///     fn on_complete(&mut self, _report: &PackReport) {}
/// }
///
/// create_archive_with_progress(&ArchiveTask::default(), &mut Printer)?;
/// # Ok::<(), plugzip_core::PackError>(())
/// ```
///
/// # Errors
///
/// Same as [`create_archive`].
pub fn create_archive_with_progress(
    task: &ArchiveTask,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();

    let source_file = task.resolved_source_file();
    let source_dir = task.resolved_source_directory();
    let output = task.resolved_output_path();
    let base = task.naming_base();

    // Both inputs are checked before the output is touched.
    let root_name = naming::root_file_name(&source_file)?;
    let mut root = open_source_file(&source_file)?;
    let walker = DirWalker::new(&source_dir, &base);
    let entries = walker.walk()?;

    tracing::info!(
        output = %output.display(),
        file = %source_file.display(),
        directory = %source_dir.display(),
        "packing archive"
    );

    let file = File::create(&output).map_err(|e| PackError::write_failure(&output, e))?;
    let options = SimpleFileOptions::default()
        .compression_method(task.compression_method.as_zip())
        .last_modified_time(zip::DateTime::default());
    let mut writer = ArchiveWriter::new(file, output.clone(), options);
    let mut report = PackReport::new(&output);
    let mut written: HashMap<String, PathBuf> = HashMap::new();
    written.insert(root_name.clone(), source_file.clone());

    writer.add_entry(&root_name, &mut root, progress, &mut report, |source| {
        PackError::MissingInputFile {
            path: source_file.clone(),
            source,
        }
    })?;

    for entry in entries {
        let entry = entry?;

        if entry.source_path == output {
            tracing::debug!(path = %output.display(), "skipping the archive being written");
            continue;
        }

        // Separator normalization can fold distinct paths onto one name.
        match written.entry(entry.archive_name.clone()) {
            Entry::Occupied(existing) => {
                return Err(PackError::DuplicateEntryName {
                    name: entry.archive_name,
                    path: entry.source_path,
                    existing: existing.get().clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(entry.source_path.clone());
            }
        }

        let mut file = File::open(&entry.source_path).map_err(|source| {
            PackError::UnreadableEntry {
                path: entry.source_path.clone(),
                source,
            }
        })?;
        writer.add_entry(
            &entry.archive_name,
            &mut file,
            progress,
            &mut report,
            |source| PackError::UnreadableEntry {
                path: entry.source_path.clone(),
                source,
            },
        )?;
    }

    report.bytes_compressed = writer.finish()?;
    report.duration = start.elapsed();

    tracing::info!(
        entries = report.entries_added,
        bytes = report.bytes_read,
        compressed = report.bytes_compressed,
        "archive finalized"
    );
    progress.on_complete(&report);

    Ok(report)
}

/// Opens the top-level file, rejecting anything that is not a regular file.
fn open_source_file(path: &Path) -> Result<File> {
    let missing = |source| PackError::MissingInputFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(missing)?;
    let metadata = file.metadata().map_err(missing)?;
    if !metadata.is_file() {
        return Err(missing(std::io::Error::other("not a regular file")));
    }
    Ok(file)
}

/// Output archive with guaranteed finalization.
///
/// [`ArchiveWriter::finish`] finalizes on success. If the writer is dropped
/// on an error path instead, the central directory is still written so the
/// partial archive stays readable.
struct ArchiveWriter {
    zip: Option<ZipWriter<File>>,
    path: PathBuf,
    options: SimpleFileOptions,
    buffer: Vec<u8>,
}

impl ArchiveWriter {
    fn new(file: File, path: PathBuf, options: SimpleFileOptions) -> Self {
        Self {
            zip: Some(ZipWriter::new(file)),
            path,
            options,
            buffer: vec![0u8; COPY_BUFFER_SIZE],
        }
    }

    /// Writes one entry, copying `reader` to the end.
    ///
    /// Read failures are mapped through `read_error`; write failures become
    /// [`PackError::WriteFailure`].
    fn add_entry<R, F>(
        &mut self,
        archive_name: &str,
        reader: &mut R,
        progress: &mut dyn ProgressCallback,
        report: &mut PackReport,
        read_error: F,
    ) -> Result<()>
    where
        R: Read,
        F: Fn(std::io::Error) -> PackError,
    {
        let Some(zip) = self.zip.as_mut() else {
            return Err(PackError::write_failure(&self.path, "archive already finalized"));
        };

        progress.on_entry_start(archive_name, report.entries_added + 1);

        zip.start_file(archive_name, self.options)
            .map_err(|e| PackError::write_failure(&self.path, format!("{archive_name}: {e}")))?;

        let mut bytes = 0u64;
        loop {
            let read = match reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(read_error(e)),
            };
            zip.write_all(&self.buffer[..read])
                .map_err(|e| PackError::write_failure(&self.path, e))?;
            bytes += read as u64;
            progress.on_bytes_written(read as u64);
        }

        report.entries_added += 1;
        report.bytes_read += bytes;
        tracing::debug!(entry = archive_name, bytes, "added entry");
        progress.on_entry_complete(archive_name);

        Ok(())
    }

    /// Writes the central directory and returns the final archive size.
    fn finish(mut self) -> Result<u64> {
        let Some(zip) = self.zip.take() else {
            return Err(PackError::write_failure(&self.path, "archive already finalized"));
        };
        let mut file = zip
            .finish()
            .map_err(|e| PackError::write_failure(&self.path, e))?;
        file.flush()
            .map_err(|e| PackError::write_failure(&self.path, e))?;
        let size = file
            .metadata()
            .map_err(|e| PackError::write_failure(&self.path, e))?
            .len();
        Ok(size)
    }
}

impl Drop for ArchiveWriter {
    fn drop(&mut self) {
        if let Some(zip) = self.zip.take() {
            match zip.finish() {
                Ok(_) => {
                    tracing::warn!(path = %self.path.display(), "finalized incomplete archive");
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to finalize archive");
                }
            }
        }
    }
}
