//! Error conversion utilities for CLI.
//!
//! Converts plugzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use plugzip_core::PackError;

/// Converts `PackError` to user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError) -> anyhow::Error {
    match err {
        PackError::MissingInputFile { path, source } => {
            anyhow!(
                "Plugin file '{}' not found or unreadable: {}\n\
                 HINT: Run plugzip from the plugin's root directory.",
                path.display(),
                source
            )
        }
        PackError::MissingInputDirectory { path, source } => {
            anyhow!(
                "Build directory '{}' not found or unreadable: {}\n\
                 HINT: Build the front-end assets first so that the directory exists.",
                path.display(),
                source
            )
        }
        PackError::UnreadableEntry { path, source } => {
            anyhow!(
                "Cannot read '{}': {}\n\
                 HINT: Check the file's permissions. The archive was left incomplete.",
                path.display(),
                source
            )
        }
        PackError::WriteFailure { path, reason } => {
            anyhow!(
                "Cannot write archive '{}': {}\n\
                 HINT: Check free disk space and write permission on the output directory.",
                path.display(),
                reason
            )
        }
        PackError::InvalidEntryName { path, reason } => {
            anyhow!(
                "Cannot store '{}' in the archive: {}\n\
                 HINT: Use UTF-8 file names and keep every input inside the plugin directory.",
                path.display(),
                reason
            )
        }
        PackError::DuplicateEntryName {
            name,
            path,
            existing,
        } => {
            anyhow!(
                "'{}' and '{}' would both be stored as '{}'\n\
                 HINT: Rename one of them. Backslashes in file names are read as separators.",
                path.display(),
                existing.display(),
                name
            )
        }
    }
}

/// Converts the error of a packaging result, if any
pub fn add_pack_context<T>(result: Result<T, PackError>) -> anyhow::Result<T> {
    result.map_err(convert_pack_error)
}
