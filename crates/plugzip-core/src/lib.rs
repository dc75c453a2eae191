//! Packages a plugin source file and a build output directory into a single
//! deflate-compressed ZIP archive.
//!
//! The top-level file is stored under its base name. Every regular file
//! under the source directory is stored under its path relative to the
//! working directory (so `dist/css/style.css`, not `css/style.css`), with
//! `/` separators on every platform.
//!
//! # Examples
//!
//! ```no_run
//! use plugzip_core::ArchiveTask;
//! use plugzip_core::create_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let task = ArchiveTask::new("my-plugin.php", "dist", "my-plugin.zip");
//! let report = create_archive(&task)?;
//! println!("Packed {} entries", report.entries_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod error;
pub mod naming;
pub mod report;
pub mod task;
pub mod walker;

pub use archiver::create_archive;
pub use archiver::create_archive_with_progress;
pub use error::PackError;
pub use error::PackErrorKind;
pub use error::Result;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use task::ArchiveTask;
pub use task::CompressionMethod;
pub use walker::ArchiveEntry;
pub use walker::DirWalker;
