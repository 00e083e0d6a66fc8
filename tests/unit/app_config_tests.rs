/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;
use anyhow::Result;
use discourse_inject::app_config::{Config, InputConfig, LogLevel};
use discourse_inject::corpus::CorpusLayout;
use discourse_inject::injection::{ErrorKind, ErrorSelection};
use crate::common;

fn complete_config() -> Config {
    Config {
        inputs: InputConfig {
            pe: Some(PathBuf::from("pe.txt")),
            mt: Some(PathBuf::from("mt.txt")),
            structural: Some(PathBuf::from("structural.json")),
            errors_dir: Some(PathBuf::from("errors")),
            alignments: Some(PathBuf::from("alignments.json")),
            ..Default::default()
        },
        output: Some(PathBuf::from("out.txt")),
        ..Default::default()
    }
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.corpus.layout, CorpusLayout::Auto);
    assert_eq!(config.error_kind, ErrorSelection::All);
    assert_eq!(config.tagger.noun_tags, vec!["NN", "NNS", "NNP", "NNPS"]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.output.is_none());
    assert!(config.log_file.is_none());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = complete_config();
    assert!(config.validate().is_ok());

    // Missing output
    config.output = None;
    assert!(config.validate().is_err());
    config.output = Some(PathBuf::from("out.txt"));

    // Missing corpus
    config.inputs.mt = None;
    assert!(config.validate().is_err());
    config.inputs.mt = Some(PathBuf::from("mt.txt"));

    // Token-level catalogues need alignments
    config.inputs.alignments = None;
    assert!(config.validate().is_err());

    // ...but a structural-only run does not
    config.error_kind = ErrorSelection::Structural;
    assert!(config.validate().is_ok());

    // Empty noun tag set
    config.tagger.noun_tags.clear();
    assert!(config.validate().is_err());
}

/// Test that a single selected kind requires its own catalogue
#[test]
fn test_config_validation_withSelectedKindMissingCatalogue_shouldFail() {
    let mut config = complete_config();
    config.inputs.errors_dir = None;
    config.error_kind = ErrorSelection::Lexical;
    assert!(config.validate().is_err());

    config.inputs.lexical = Some(PathBuf::from("lexical.yaml"));
    assert!(config.validate().is_ok());
}

/// Test that selected kinds follow pass order
#[test]
fn test_selected_kinds_withAll_shouldFollowPassOrder() {
    let mut config = Config::default();
    assert_eq!(
        config.selected_kinds(),
        vec![ErrorKind::Structural, ErrorKind::Lexical, ErrorKind::Connective]
    );

    config.error_kind = ErrorSelection::Connective;
    assert_eq!(config.selected_kinds(), vec![ErrorKind::Connective]);
}

/// Test that a partial JSON file falls back to defaults
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "inject.json",
        r#"{"corpus": {"layout": "doctext"}, "error_kind": "connective", "log_level": "debug"}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.corpus.layout, CorpusLayout::Doctext);
    assert_eq!(config.error_kind, ErrorSelection::Connective);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.tagger.noun_tags.len(), 4);
    Ok(())
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("inject.json");
    let mut config = complete_config();
    config.error_kind = ErrorSelection::Lexical;
    config.tagger.lexicon = Some(PathBuf::from("lexicon.tsv"));

    config.save(&path)?;
    let loaded = Config::from_file(&path)?;

    assert_eq!(loaded.inputs, config.inputs);
    assert_eq!(loaded.error_kind, ErrorSelection::Lexical);
    assert_eq!(loaded.tagger, config.tagger);
    Ok(())
}

/// Test that an invalid error kind is rejected at parse time
#[test]
fn test_from_file_withUnknownErrorKind_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "inject.json", r#"{"error_kind": "syntactic"}"#)?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}
