/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use discourse_inject::file_utils::FileManager;
use crate::common;

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test that ensure_dir accepts the empty parent of a bare file name
#[test]
fn test_ensure_dir_withEmptyPath_shouldDoNothing() -> Result<()> {
    FileManager::ensure_dir("")?;
    Ok(())
}

/// Test that the tagged output path appends the suffix to the full name
#[test]
fn test_tagged_output_path_withExtension_shouldAppendSuffix() {
    assert_eq!(
        FileManager::tagged_output_path("/tmp/out/injected.txt"),
        Path::new("/tmp/out/injected.txt.tagged")
    );
    assert_eq!(FileManager::tagged_output_path("out"), Path::new("out.tagged"));
}

/// Test that append_to_log_file appends timestamped lines
#[test]
fn test_append_to_log_file_withTwoWrites_shouldAppendBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs").join("run.log");

    FileManager::append_to_log_file(&log_path, "INFO first")?;
    FileManager::append_to_log_file(&log_path, "WARN second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("] INFO first"));
    assert!(lines[1].ends_with("] WARN second"));
    Ok(())
}
