//! Lazy directory walking.
//!
//! The walk is depth-first and lists the entries of each directory sorted by
//! file name, so two runs over the same tree always yield files in the same
//! order. Only regular files are yielded: directories are descended into and
//! symlinks or special files are passed over.

use crate::PackError;
use crate::Result;
use crate::naming;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One file ready to be written into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name inside the archive, `/`-separated.
    pub archive_name: String,

    /// Filesystem path the entry bytes are read from.
    pub source_path: PathBuf,
}

/// Walks a directory tree, producing one [`ArchiveEntry`] per regular file.
///
/// # Examples
///
/// ```no_run
/// use plugzip_core::walker::DirWalker;
/// use std::path::Path;
///
/// let walker = DirWalker::new(Path::new("./dist"), Path::new("."));
/// for entry in walker.walk()? {
///     let entry = entry?;
///     println!("{}", entry.archive_name);
/// }
/// # Ok::<(), plugzip_core::PackError>(())
/// ```
pub struct DirWalker<'a> {
    root: &'a Path,
    base: &'a Path,
}

impl<'a> DirWalker<'a> {
    /// Creates a walker over `root`, naming entries relative to `base`.
    #[must_use]
    pub fn new(root: &'a Path, base: &'a Path) -> Self {
        Self { root, base }
    }

    /// Returns a single-pass iterator over the regular files under the root.
    ///
    /// # Errors
    ///
    /// Fails up front with [`PackError::MissingInputDirectory`] if the root
    /// does not exist, is not a directory, or cannot be listed. Items of the
    /// iterator fail with [`PackError::UnreadableEntry`] when part of the
    /// tree cannot be read, and with [`PackError::InvalidEntryName`] when a
    /// path cannot be named.
    pub fn walk(&self) -> Result<impl Iterator<Item = Result<ArchiveEntry>> + '_> {
        let metadata = std::fs::metadata(self.root).map_err(|e| self.missing_root(e))?;
        if !metadata.is_dir() {
            return Err(self.missing_root(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }

        let walker = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(walker.filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    if entry.file_type().is_symlink() {
                        tracing::debug!(path = %entry.path().display(), "skipping symlink");
                    }
                    return None;
                }
                Some(self.build_entry(entry.into_path()))
            }
            Err(e) => Some(Err(self.convert_walk_error(e))),
        }))
    }

    fn build_entry(&self, source_path: PathBuf) -> Result<ArchiveEntry> {
        let archive_name = naming::archive_name(&source_path, self.base)?;
        Ok(ArchiveEntry {
            archive_name,
            source_path,
        })
    }

    fn convert_walk_error(&self, err: walkdir::Error) -> PackError {
        let depth = err.depth();
        let path = err
            .path()
            .map_or_else(|| self.root.to_path_buf(), Path::to_path_buf);
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("file system loop detected"));

        if depth == 0 {
            self.missing_root(source)
        } else {
            PackError::UnreadableEntry { path, source }
        }
    }

    fn missing_root(&self, source: std::io::Error) -> PackError {
        PackError::MissingInputDirectory {
            path: self.root.to_path_buf(),
            source,
        }
    }
}
