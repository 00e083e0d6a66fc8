/*!
 * Tests for alignment, edit and structural catalogues
 */

use std::path::Path;
use anyhow::Result;
use discourse_inject::catalogue::{AlignmentEntry, AlignmentIndex, EditCatalogue, StructuralErrorSet};
use discourse_inject::corpus::DocId;
use discourse_inject::errors::CatalogueError;
use crate::common;

/// Test loading the sample alignment file
#[test]
fn test_alignment_from_file_withSample_shouldIndexPairs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "alignments.json", common::SAMPLE_ALIGNMENTS)?;

    let index = AlignmentIndex::from_file(&path)?;

    assert_eq!(index.len(), 2);
    assert_eq!(
        index.entries(&DocId::from("2"), 0),
        &[AlignmentEntry::new(0, 0), AlignmentEntry::new(1, 0), AlignmentEntry::new(2, 4)]
    );
    assert!(index.has_line(&DocId::from("1"), 1));
    assert!(!index.has_line(&DocId::from("2"), 1));
    assert!(index.entries(&DocId::from("3"), 0).is_empty());
    Ok(())
}

/// Test that a list of pairs and bad pairs are handled
#[test]
fn test_alignment_parse_withListAndBadPair_shouldKeepValidPairs() -> Result<()> {
    let content = "\"7\":\n  \"0\": [\"0-1\", \"x-2\", \"2-2\"]\n";

    let index = AlignmentIndex::parse(content, Path::new("<inline>"))?;

    assert_eq!(
        index.entries(&DocId::from("7"), 0),
        &[AlignmentEntry::new(0, 1), AlignmentEntry::new(2, 2)]
    );
    Ok(())
}

/// Test that a missing alignment file is unreadable
#[test]
fn test_alignment_from_file_withMissingFile_shouldFail() {
    let result = AlignmentIndex::from_file("missing_alignments.json");
    assert!(matches!(result, Err(CatalogueError::Unreadable { .. })));
}

/// Test loading the lexical catalogue from an errors directory
#[test]
fn test_edit_catalogue_from_file_withErrorsDirNames_shouldLoadRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let inputs = common::write_sample_inputs(temp_dir.path())?;

    let lexical = EditCatalogue::from_file(inputs.errors_dir.join("lexical_errors_json"))?;
    let connective = EditCatalogue::from_file(inputs.errors_dir.join("connective_errors_json"))?;

    assert_eq!(lexical.record_count(), 3);
    assert_eq!(connective.record_count(), 2);
    assert!(lexical.malformed().is_empty());

    let record = lexical.record(&DocId::from("2"), 0).expect("record for line 0");
    assert_eq!(record.to_reinsert, vec!["house"]);
    assert!(record.to_remove.contains("building"));
    assert!(record.is_replace());

    let deletion_only = lexical.record(&DocId::from("2"), 2).expect("record for line 2");
    assert!(deletion_only.to_reinsert.is_empty());
    assert!(!deletion_only.is_replace());
    Ok(())
}

/// Test that catalogue order is kept when iterating
#[test]
fn test_edit_catalogue_iter_withUnsortedKeys_shouldKeepFileOrder() -> Result<()> {
    let content = r#"{"9": {"3": {"0": ["a"], "1": []}, "1": {"0": ["b"], "1": []}},
                      "2": {"0": {"0": ["c"], "1": []}}}"#;

    let catalogue = EditCatalogue::parse(content, Path::new("<inline>"))?;

    let order: Vec<(String, usize)> = catalogue
        .iter()
        .map(|(doc, line, _)| (doc.to_string(), line))
        .collect();
    assert_eq!(
        order,
        vec![("9".to_string(), 3), ("9".to_string(), 1), ("2".to_string(), 0)]
    );
    Ok(())
}

/// Test that malformed records are skipped and kept for reporting
#[test]
fn test_edit_catalogue_parse_withMalformedRecords_shouldSkipThem() -> Result<()> {
    let content = r#"{"1": {"0": {"0": ["ok"], "1": []},
                           "1": {"0": ["missing remove list"]},
                           "x": {"0": [], "1": []},
                           "2": "not a record"}}"#;

    let catalogue = EditCatalogue::parse(content, Path::new("<inline>"))?;

    assert_eq!(catalogue.record_count(), 1);
    assert_eq!(catalogue.malformed().len(), 3);
    assert!(catalogue
        .malformed()
        .iter()
        .any(|e| matches!(e, CatalogueError::MissingKey { key: "1", .. })));
    assert!(catalogue
        .malformed()
        .iter()
        .any(|e| matches!(e, CatalogueError::InvalidLineNumber { .. })));
    Ok(())
}

/// Test that a YAML catalogue parses like its JSON form
#[test]
fn test_edit_catalogue_parse_withYaml_shouldMatchJson() -> Result<()> {
    let yaml = "1:\n  0:\n    \"0\": [after]\n    \"1\": [when]\n";

    let catalogue = EditCatalogue::parse(yaml, Path::new("<inline>"))?;

    let record = catalogue.record(&DocId::from("1"), 0).expect("record");
    assert_eq!(record.to_reinsert, vec!["after"]);
    assert!(record.to_remove.contains("when"));
    Ok(())
}

/// Test that a non-mapping catalogue root fails
#[test]
fn test_edit_catalogue_parse_withListRoot_shouldFail() {
    let result = EditCatalogue::parse("[1, 2]", Path::new("<inline>"));
    assert!(matches!(result, Err(CatalogueError::Parse { .. })));
}

/// Test loading the structural catalogue with string and number lines
#[test]
fn test_structural_parse_withMixedLineKeys_shouldNormalize() -> Result<()> {
    let set = StructuralErrorSet::parse(r#"{"2": [1, "4", "bad"], "5": []}"#, Path::new("<inline>"))?;

    assert_eq!(set.len(), 2);
    assert!(set.contains(&DocId::from("2"), 1));
    assert!(set.contains(&DocId::from("2"), 4));
    assert!(!set.contains(&DocId::from("5"), 0));
    Ok(())
}

/// Test that invalid JSON is a parse error
#[test]
fn test_structural_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "structural.json", "{not json")?;

    let result = StructuralErrorSet::from_file(&path);
    assert!(matches!(result, Err(CatalogueError::Parse { .. })));
    Ok(())
}
