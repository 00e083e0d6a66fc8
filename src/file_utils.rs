use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;

// @module: File and directory utilities

/// Suffix of the annotated output written next to the plain output
pub const TAGGED_SUFFIX: &str = "tagged";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Path of the tagged copy, `<output>.tagged`
    pub fn tagged_output_path<P: AsRef<Path>>(output: P) -> PathBuf {
        let mut name = output.as_ref().as_os_str().to_os_string();
        name.push(".");
        name.push(TAGGED_SUFFIX);
        PathBuf::from(name)
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
