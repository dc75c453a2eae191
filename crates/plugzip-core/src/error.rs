//! Error types for archive packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging an archive.
///
/// Every variant carries the path it concerns. None of them are recovered
/// locally: the first error aborts the whole operation.
#[derive(Error, Debug)]
pub enum PackError {
    /// The fixed top-level file does not exist or cannot be read.
    #[error("input file not found or unreadable: {path}: {source}")]
    MissingInputFile {
        /// The file that was expected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directory to walk does not exist or cannot be listed.
    #[error("input directory not found or unreadable: {path}: {source}")]
    MissingInputDirectory {
        /// The directory that was expected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file discovered during the walk cannot be opened or read.
    #[error("cannot read {path}: {source}")]
    UnreadableEntry {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The output archive cannot be created, written or finalized.
    #[error("cannot write archive {path}: {reason}")]
    WriteFailure {
        /// The output archive path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A path cannot be turned into an archive name.
    #[error("path cannot be used as an archive name: {path}: {reason}")]
    InvalidEntryName {
        /// The offending path.
        path: PathBuf,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two inputs map to the same archive name.
    #[error("{path} and {existing} are both stored as {name}")]
    DuplicateEntryName {
        /// The archive name both inputs resolve to.
        name: String,
        /// The input that was rejected.
        path: PathBuf,
        /// The input already written under `name`.
        existing: PathBuf,
    },
}

/// Discriminant of a [`PackError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackErrorKind {
    /// See [`PackError::MissingInputFile`].
    MissingInputFile,
    /// See [`PackError::MissingInputDirectory`].
    MissingInputDirectory,
    /// See [`PackError::UnreadableEntry`].
    UnreadableEntry,
    /// See [`PackError::WriteFailure`].
    WriteFailure,
    /// See [`PackError::InvalidEntryName`].
    InvalidEntryName,
    /// See [`PackError::DuplicateEntryName`].
    DuplicateEntryName,
}

impl PackError {
    /// Returns the kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use plugzip_core::PackError;
    /// use plugzip_core::PackErrorKind;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::InvalidEntryName {
    ///     path: PathBuf::from("dist/bad"),
    ///     reason: "not valid UTF-8",
    /// };
    /// assert_eq!(err.kind(), PackErrorKind::InvalidEntryName);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> PackErrorKind {
        match self {
            Self::MissingInputFile { .. } => PackErrorKind::MissingInputFile,
            Self::MissingInputDirectory { .. } => PackErrorKind::MissingInputDirectory,
            Self::UnreadableEntry { .. } => PackErrorKind::UnreadableEntry,
            Self::WriteFailure { .. } => PackErrorKind::WriteFailure,
            Self::InvalidEntryName { .. } => PackErrorKind::InvalidEntryName,
            Self::DuplicateEntryName { .. } => PackErrorKind::DuplicateEntryName,
        }
    }

    /// Returns the path this error concerns.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::MissingInputFile { path, .. }
            | Self::MissingInputDirectory { path, .. }
            | Self::UnreadableEntry { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::InvalidEntryName { path, .. }
            | Self::DuplicateEntryName { path, .. } => path,
        }
    }

    /// Returns `true` if the error was caused by the inputs rather than the
    /// output archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use plugzip_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::WriteFailure {
    ///     path: PathBuf::from("out.zip"),
    ///     reason: "disk full".to_string(),
    /// };
    /// assert!(!err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::WriteFailure { .. })
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
