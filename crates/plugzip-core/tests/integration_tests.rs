//! Integration tests for plugzip-core.
//!
//! These tests pack real directory trees and read the archives back with the
//! `zip` crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use plugzip_core::ArchiveTask;
use plugzip_core::PackErrorKind;
use plugzip_core::create_archive;
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

/// Reads every entry of an archive into memory, keyed by name.
///
/// Panics on duplicate names so every caller also checks uniqueness.
fn read_archive(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let file = File::open(path).expect("archive should exist");
    let mut archive = zip::ZipArchive::new(file).expect("archive should be readable");
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        let previous = entries.insert(entry.name().to_string(), content);
        assert!(previous.is_none(), "duplicate entry {}", entry.name());
    }
    entries
}

/// Writes `files` (relative path, content) under `root`.
fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
}

fn plugin_task(temp: &TempDir) -> ArchiveTask {
    ArchiveTask::new("plugin.php", "dist", "plugin.zip").with_working_dir(temp.path())
}

#[test]
fn test_plugin_scenario() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[
            ("plugin.php", "<?php // v1"),
            ("dist/app.js", "console.log(1)"),
            ("dist/css/style.css", "body{}"),
        ],
    );

    let report = create_archive(&plugin_task(&temp)).unwrap();
    assert_eq!(report.entries_added, 3);

    let entries = read_archive(&temp.path().join("plugin.zip"));
    assert_eq!(entries.len(), 3);
    assert_eq!(entries["plugin.php"], b"<?php // v1");
    assert_eq!(entries["dist/app.js"], b"console.log(1)");
    assert_eq!(entries["dist/css/style.css"], b"body{}");
}

#[test]
fn test_completeness_and_no_extraneous_entries() {
    let temp = TempDir::new().unwrap();
    let mut files = vec![("plugin.php".to_string(), "<?php".to_string())];
    for dir in ["", "js/", "js/vendor/", "img/", "a/b/c/d/"] {
        for i in 0..5 {
            files.push((format!("dist/{dir}file_{i}.txt"), format!("{dir}{i}")));
        }
    }
    let borrowed: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    write_tree(temp.path(), &borrowed);

    create_archive(&plugin_task(&temp)).unwrap();
    let entries = read_archive(&temp.path().join("plugin.zip"));

    assert_eq!(entries.len(), files.len());
    for (path, content) in &files {
        assert_eq!(
            entries.get(path.as_str()).map(Vec::as_slice),
            Some(content.as_bytes()),
            "entry {path} missing or different"
        );
    }
}

#[test]
fn test_root_file_stored_under_base_name() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[("src/plugin.php", "<?php"), ("dist/app.js", "x")],
    );

    let task = plugin_task(&temp).with_source_file("src/plugin.php");
    create_archive(&task).unwrap();

    let entries = read_archive(&temp.path().join("plugin.zip"));
    assert!(entries.contains_key("plugin.php"));
    assert!(!entries.contains_key("src/plugin.php"));
}

#[test]
fn test_entry_names_have_no_backslashes() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[
            ("plugin.php", "<?php"),
            ("dist/a/b/c.js", "c"),
            ("dist/x/y.css", "y"),
        ],
    );

    create_archive(&plugin_task(&temp)).unwrap();
    let entries = read_archive(&temp.path().join("plugin.zip"));
    for name in entries.keys() {
        assert!(!name.contains('\\'), "backslash in {name}");
    }
    assert!(entries.contains_key("dist/a/b/c.js"));
}

#[test]
fn test_idempotent_runs() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[
            ("plugin.php", "<?php"),
            ("dist/app.js", "console.log(1)"),
            ("dist/css/style.css", "body{}"),
        ],
    );

    let first = plugin_task(&temp).with_output_path("first.zip");
    let second = plugin_task(&temp).with_output_path("second.zip");
    create_archive(&first).unwrap();
    create_archive(&second).unwrap();

    let a = read_archive(&temp.path().join("first.zip"));
    let b = read_archive(&temp.path().join("second.zip"));
    assert_eq!(a, b);
}

#[test]
fn test_missing_input_file() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &[("dist/app.js", "x")]);

    let err = create_archive(&plugin_task(&temp)).unwrap_err();
    assert_eq!(err.kind(), PackErrorKind::MissingInputFile);
    assert!(err.to_string().contains("plugin.php"));
    assert!(!temp.path().join("plugin.zip").exists());
}

#[test]
fn test_missing_input_directory() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &[("plugin.php", "<?php")]);

    let err = create_archive(&plugin_task(&temp)).unwrap_err();
    assert_eq!(err.kind(), PackErrorKind::MissingInputDirectory);
    assert!(!temp.path().join("plugin.zip").exists());
}

#[test]
fn test_rerun_overwrites_previous_archive() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[("plugin.php", "<?php"), ("dist/old.js", "old")],
    );
    create_archive(&plugin_task(&temp)).unwrap();

    fs::remove_file(temp.path().join("dist/old.js")).unwrap();
    write_tree(temp.path(), &[("dist/new.js", "new")]);
    create_archive(&plugin_task(&temp)).unwrap();

    let entries = read_archive(&temp.path().join("plugin.zip"));
    assert!(entries.contains_key("dist/new.js"));
    assert!(!entries.contains_key("dist/old.js"));
}

#[test]
fn test_binary_content_preserved() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &[("plugin.php", "<?php")]);
    fs::create_dir(temp.path().join("dist")).unwrap();
    let bytes: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
    fs::write(temp.path().join("dist/font.woff2"), &bytes).unwrap();

    let report = create_archive(&plugin_task(&temp)).unwrap();
    assert_eq!(report.bytes_read, 5 + 200_000);

    let entries = read_archive(&temp.path().join("plugin.zip"));
    assert_eq!(entries["dist/font.woff2"], bytes);
}
