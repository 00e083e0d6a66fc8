/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use discourse_inject::errors::{AppError, CatalogueError, CorpusError, InjectionError};

#[test]
fn test_corpusError_notFound_shouldDisplayPath() {
    let error = CorpusError::NotFound(PathBuf::from("/data/pe"));
    let display = format!("{}", error);
    assert!(display.contains("Corpus not found"));
    assert!(display.contains("/data/pe"));
}

#[test]
fn test_catalogueError_missingKey_shouldDisplayLocationAndKey() {
    let error = CatalogueError::MissingKey {
        doc: "12".to_string(),
        line: "4".to_string(),
        key: "1",
    };
    let display = format!("{}", error);
    assert!(display.contains("document 12"));
    assert!(display.contains("line 4"));
    assert!(display.contains("\"1\""));
}

#[test]
fn test_injectionError_indexOutOfRange_shouldDisplayIndexAndLength() {
    let error = InjectionError::IndexOutOfRange { index: 9, len: 3 };
    let display = format!("{}", error);
    assert!(display.contains('9'));
    assert!(display.contains('3'));
}

#[test]
fn test_appError_fromCorpusError_shouldWrapCorrectly() {
    let app_error: AppError = CorpusError::Empty(PathBuf::from("mt")).into();
    assert!(matches!(app_error, AppError::Corpus(CorpusError::Empty(_))));
    assert!(app_error.to_string().starts_with("Corpus error"));
}

#[test]
fn test_appError_fromCatalogueError_shouldWrapCorrectly() {
    let app_error: AppError = CatalogueError::InvalidLineNumber {
        doc: "1".to_string(),
        line: "x".to_string(),
    }
    .into();
    assert!(matches!(app_error, AppError::Catalogue(_)));
}

#[test]
fn test_appError_fromInjectionError_shouldWrapCorrectly() {
    let app_error: AppError = InjectionError::AlreadyEdited { index: 2 }.into();
    assert!(matches!(app_error, AppError::Injection(InjectionError::AlreadyEdited { index: 2 })));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(ref message) if message.contains("gone")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(app_error.to_string(), "Unknown error: something odd");
}
