/*!
 * Common test utilities for the discourse-inject test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

// Re-export the fixture tagger module
pub mod fixture_tagger;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample PE corpus in doctext form
///
/// Document 1 exercises the connective pass, document 2 the lexical and
/// structural passes, document 3 is never touched.
pub const SAMPLE_PE: &str = "# id=1
when it rains we stay inside
A crucial step
# id=2
the very old building stood
Nobody noticed the change
an extra remark followed
# id=3
Nothing to see here
";

/// Sample MT corpus matching `SAMPLE_PE` line for line
pub const SAMPLE_MT: &str = "# id=1
after it rains we stay inside
Yet a crucial step
# id=2
that house stood
The change went unnoticed by all
a remark followed
# id=3
Nothing to see here
";

pub const SAMPLE_ALIGNMENTS: &str = r#"{
  "1": {"0": "0-0 1-1 2-2 3-3 4-4 5-5", "1": "1-0 2-1 3-2"},
  "2": {"0": "0-0 1-0 2-4", "2": "0-0 1-2 2-3"}
}"#;

/// Lexicon that makes the built-in tagger agree with `FixtureTagger::for_sample`
pub const SAMPLE_LEXICON: &str = "old\tJJ\nbuilding\tNN\n";

/// Expected plain output for the sample with every pass enabled
pub const SAMPLE_EXPECTED_PLAIN: &str = "# id=1
after it rains we stay inside
Yet A crucial step
# id=2
the very old house stood
The change went unnoticed by all
an remark followed
# id=3
Nothing to see here
";

pub const SAMPLE_STRUCTURAL: &str = r#"{"2": [1]}"#;

pub const SAMPLE_LEXICAL: &str = r#"{
  "2": {"0": {"0": ["house"], "1": ["building"]},
        "1": {"0": ["unnoticed"], "1": []},
        "2": {"0": [], "1": ["extra"]}}
}"#;

pub const SAMPLE_CONNECTIVE: &str = r#"{
  "1": {"0": {"0": ["after"], "1": ["when"]},
        "1": {"0": ["Yet"], "1": []}}
}"#;

/// Paths of a sample input set written to disk
pub struct SampleInputs {
    pub pe: PathBuf,
    pub mt: PathBuf,
    pub alignments: PathBuf,
    pub structural: PathBuf,
    pub errors_dir: PathBuf,
}

/// Writes the sample corpora and catalogues into `dir`
///
/// The lexical and connective catalogues use the errors-directory names.
pub fn write_sample_inputs(dir: &Path) -> Result<SampleInputs> {
    let errors_dir = dir.join("errors");
    create_test_file(&errors_dir, "lexical_errors_json", SAMPLE_LEXICAL)?;
    create_test_file(&errors_dir, "connective_errors_json", SAMPLE_CONNECTIVE)?;

    Ok(SampleInputs {
        pe: create_test_file(dir, "pe.txt", SAMPLE_PE)?,
        mt: create_test_file(dir, "mt.txt", SAMPLE_MT)?,
        alignments: create_test_file(dir, "alignments.json", SAMPLE_ALIGNMENTS)?,
        structural: create_test_file(dir, "structural.json", SAMPLE_STRUCTURAL)?,
        errors_dir,
    })
}

/// Writes a corpus in directory layout, one file per document
pub fn write_corpus_dir(dir: &Path, documents: &[(&str, &[&str])]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    for (name, lines) in documents {
        let mut content = lines.join("\n");
        content.push('\n');
        create_test_file(dir, name, &content)?;
    }
    Ok(dir.to_path_buf())
}

/// Optional log capture for debugging a failing test (`RUST_LOG=debug`)
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
