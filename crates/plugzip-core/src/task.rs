//! Configuration for a packaging run.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// File placed at the archive root by the default task.
pub const DEFAULT_SOURCE_FILE: &str = "bicicolombia-form.php";

/// Build output directory walked by the default task.
pub const DEFAULT_SOURCE_DIRECTORY: &str = "dist";

/// Archive written by the default task.
pub const DEFAULT_OUTPUT_PATH: &str = "bicicolombia-form.zip";

/// Compression method applied to every archive entry.
///
/// Deflate is the only method; the enum exists so the archive options are
/// derived from the task instead of being hard-wired in the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Raw deflate, the ZIP default.
    #[default]
    Deflate,
}

impl CompressionMethod {
    pub(crate) const fn as_zip(self) -> zip::CompressionMethod {
        match self {
            Self::Deflate => zip::CompressionMethod::Deflated,
        }
    }
}

/// One packaging run: which file and directory go into which archive.
///
/// Relative paths are resolved against `working_dir`, and archive names for
/// walked files are computed relative to it as well.
///
/// # Examples
///
/// ```
/// use plugzip_core::ArchiveTask;
///
/// // The hard-coded invocation
/// let task = ArchiveTask::default();
/// assert_eq!(task.source_directory.to_str(), Some("dist"));
///
/// // Same layout, different plugin
/// let custom = ArchiveTask::new("my-plugin.php", "build", "my-plugin.zip");
/// assert_eq!(custom.output_path.to_str(), Some("my-plugin.zip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTask {
    /// Single file stored at the archive root under its base name.
    pub source_file: PathBuf,

    /// Root of the tree whose regular files are added.
    pub source_directory: PathBuf,

    /// Destination archive, created or truncated.
    pub output_path: PathBuf,

    /// Method used for every entry.
    pub compression_method: CompressionMethod,

    /// Directory relative paths are resolved against.
    ///
    /// Default: `.` (the process working directory).
    pub working_dir: PathBuf,
}

impl Default for ArchiveTask {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCE_FILE,
            DEFAULT_SOURCE_DIRECTORY,
            DEFAULT_OUTPUT_PATH,
        )
    }
}

impl ArchiveTask {
    /// Creates a task rooted at the process working directory.
    #[must_use]
    pub fn new(
        source_file: impl Into<PathBuf>,
        source_directory: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            source_directory: source_directory.into(),
            output_path: output_path.into(),
            compression_method: CompressionMethod::Deflate,
            working_dir: PathBuf::from("."),
        }
    }

    /// Sets the directory relative paths are resolved against.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Sets the top-level file.
    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = path.into();
        self
    }

    /// Sets the directory to walk.
    #[must_use]
    pub fn with_source_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_directory = path.into();
        self
    }

    /// Sets the output archive path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Source file as it will be opened.
    #[must_use]
    pub fn resolved_source_file(&self) -> PathBuf {
        self.resolve(&self.source_file)
    }

    /// Source directory as it will be walked.
    #[must_use]
    pub fn resolved_source_directory(&self) -> PathBuf {
        self.resolve(&self.source_directory)
    }

    /// Output archive as it will be created.
    #[must_use]
    pub fn resolved_output_path(&self) -> PathBuf {
        self.resolve(&self.output_path)
    }

    /// Base that walked paths are made relative to when naming entries.
    ///
    /// This is `working_dir` when the source directory lies inside it, which
    /// yields names like `dist/css/style.css`. Otherwise names are rooted at
    /// the source directory's own name. A relative directory that climbs out
    /// with `..` counts as outside.
    #[must_use]
    pub fn naming_base(&self) -> PathBuf {
        let dir = self.resolved_source_directory();
        let inside = dir
            .strip_prefix(&self.working_dir)
            .is_ok_and(|rest| !rest.components().any(|c| c == Component::ParentDir));
        if inside {
            return self.working_dir.clone();
        }
        dir.parent()
            .map_or_else(|| dir.clone(), Path::to_path_buf)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_task_matches_hard_coded_invocation() {
        let task = ArchiveTask::default();
        assert_eq!(task.source_file, PathBuf::from("bicicolombia-form.php"));
        assert_eq!(task.source_directory, PathBuf::from("dist"));
        assert_eq!(task.output_path, PathBuf::from("bicicolombia-form.zip"));
        assert_eq!(task.compression_method, CompressionMethod::Deflate);
        assert_eq!(task.working_dir, PathBuf::from("."));
    }

    #[test]
    fn test_builder() {
        let task = ArchiveTask::default()
            .with_working_dir("/work")
            .with_source_file("plugin.php")
            .with_source_directory("build")
            .with_output_path("out/plugin.zip");

        assert_eq!(task.resolved_source_file(), PathBuf::from("/work/plugin.php"));
        assert_eq!(task.resolved_source_directory(), PathBuf::from("/work/build"));
        assert_eq!(
            task.resolved_output_path(),
            PathBuf::from("/work/out/plugin.zip")
        );
    }

    #[test]
    fn test_absolute_paths_are_not_rebased() {
        let task = ArchiveTask::new("/abs/plugin.php", "dist", "out.zip").with_working_dir("/work");
        assert_eq!(task.resolved_source_file(), PathBuf::from("/abs/plugin.php"));
    }

    #[test]
    fn test_naming_base_inside_working_dir() {
        let task = ArchiveTask::default().with_working_dir("/work");
        assert_eq!(task.naming_base(), PathBuf::from("/work"));

        let task = ArchiveTask::default();
        assert_eq!(task.naming_base(), PathBuf::from("."));
    }

    #[test]
    fn test_naming_base_outside_working_dir() {
        let task = ArchiveTask::default()
            .with_working_dir("/work")
            .with_source_directory("/elsewhere/site/dist");
        assert_eq!(task.naming_base(), PathBuf::from("/elsewhere/site"));
    }

    #[test]
    fn test_naming_base_parent_relative_directory() {
        let task = ArchiveTask::default().with_source_directory("../dist");
        assert_eq!(task.naming_base(), PathBuf::from("./.."));

        let task = ArchiveTask::default()
            .with_working_dir("/work")
            .with_source_directory("assets/../../dist");
        assert_eq!(task.naming_base(), PathBuf::from("/work/assets/../.."));
    }

    #[test]
    fn test_compression_method_maps_to_deflated() {
        assert_eq!(
            CompressionMethod::Deflate.as_zip(),
            zip::CompressionMethod::Deflated
        );
    }
}
