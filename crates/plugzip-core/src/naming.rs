//! Archive entry naming.
//!
//! ZIP entry names always use `/` as separator. Walked paths are first made
//! relative to the naming base, then passed through [`normalize_separators`]
//! right before they are written.

use crate::PackError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Replaces every path separator with `/`.
///
/// Both `\` and the host's main separator are replaced, so the result never
/// contains a backslash whichever platform produced the input.
///
/// # Examples
///
/// ```
/// use plugzip_core::naming::normalize_separators;
///
/// assert_eq!(normalize_separators("dist\\css\\style.css"), "dist/css/style.css");
/// assert_eq!(normalize_separators("dist/app.js"), "dist/app.js");
/// ```
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c == '\\' || c == std::path::MAIN_SEPARATOR {
                '/'
            } else {
                c
            }
        })
        .collect()
}

/// Computes the archive name of a walked file.
///
/// `path` is made relative to `base`; `.` components are dropped and the
/// remainder is joined with `/`. When `path` does not lie under `base` it is
/// used as is, minus any root or prefix component.
///
/// # Errors
///
/// Returns [`PackError::InvalidEntryName`] if the relative path is empty, is
/// not valid UTF-8, or climbs out with `..`.
///
/// # Examples
///
/// ```
/// use plugzip_core::naming::archive_name;
/// use std::path::Path;
///
/// let name = archive_name(Path::new("./dist/css/style.css"), Path::new("."))?;
/// assert_eq!(name, "dist/css/style.css");
/// # Ok::<(), plugzip_core::PackError>(())
/// ```
pub fn archive_name(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).unwrap_or(path);

    let mut parts: Vec<&str> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                parts.push(part.to_str().ok_or_else(|| invalid(path, NOT_UTF8))?);
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return Err(invalid(path, CLIMBS_OUT)),
        }
    }

    if parts.is_empty() {
        return Err(invalid(path, EMPTY_NAME));
    }

    Ok(normalize_separators(&parts.join("/")))
}

/// Name of the top-level file inside the archive: its base name.
///
/// # Errors
///
/// Returns [`PackError::InvalidEntryName`] if the path has no file name or
/// the file name is not valid UTF-8.
pub fn root_file_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| invalid(path, EMPTY_NAME))?;
    name.to_str()
        .map(normalize_separators)
        .ok_or_else(|| invalid(path, NOT_UTF8))
}

const NOT_UTF8: &str = "the name is not valid UTF-8";
const CLIMBS_OUT: &str = "the path climbs out of the naming base with '..'";
const EMPTY_NAME: &str = "the relative name is empty";

fn invalid(path: &Path, reason: &'static str) -> PackError {
    PackError::InvalidEntryName {
        path: PathBuf::from(path),
        reason,
    }
}
