/*!
 * Error types for the discourse-inject application.
 *
 * This module contains custom error types for the different parts of the
 * injection run, using the thiserror crate for ergonomic error definitions.
 * Corpus and catalogue errors are fatal at load time; injection errors are
 * per-edit and are logged and skipped by the passes.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a PE or MT corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The corpus path does not exist
    #[error("Corpus not found: {0:?}")]
    NotFound(PathBuf),

    /// The corpus could not be read
    #[error("Failed to read corpus {path:?}: {message}")]
    Unreadable {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// The corpus was read but contains no documents
    #[error("Corpus contains no documents: {0:?}")]
    Empty(PathBuf),
}

/// Errors that can occur while loading an alignment or error catalogue
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// The catalogue file could not be read
    #[error("Failed to read catalogue {path:?}: {message}")]
    Unreadable {
        /// Catalogue path
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// The whole catalogue file could not be parsed
    #[error("Failed to parse catalogue {path:?}: {message}")]
    Parse {
        /// Catalogue path (or `<inline>` for in-memory sources)
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A line record lacks one of the `"0"` / `"1"` token lists
    #[error("Malformed record for document {doc} line {line}: missing key \"{key}\"")]
    MissingKey {
        /// Document id
        doc: String,
        /// Raw line key
        line: String,
        /// The absent key
        key: &'static str,
    },

    /// A line record exists but is not shaped as a list of tokens
    #[error("Malformed record for document {doc} line {line}: {message}")]
    MalformedRecord {
        /// Document id
        doc: String,
        /// Raw line key
        line: String,
        /// What was wrong
        message: String,
    },

    /// A line key is not a non-negative integer
    #[error("Invalid line number for document {doc}: {line}")]
    InvalidLineNumber {
        /// Document id
        doc: String,
        /// Raw line key
        line: String,
    },

    /// An alignment pair is not of the form `mt-pe`
    #[error("Invalid alignment pair for document {doc} line {line}: {pair}")]
    InvalidAlignmentPair {
        /// Document id
        doc: String,
        /// Line number
        line: usize,
        /// The offending pair text
        pair: String,
    },
}

/// Per-edit errors raised while mutating the working corpus
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InjectionError {
    /// A token index no longer fits the current token sequence
    #[error("Index {index} out of range for line of {len} tokens")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current number of slots
        len: usize,
    },

    /// The slot already carries an edit from this run
    #[error("Token {index} was already edited")]
    AlreadyEdited {
        /// Slot index
        index: usize,
    },

    /// The document is absent from the PE or MT corpus
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// The line is absent from the PE or MT document
    #[error("Unknown line {line} in document {doc}")]
    UnknownLine {
        /// Document id
        doc: String,
        /// Line number
        line: usize,
    },

    /// The line was already replaced wholesale and cannot take token edits
    #[error("Line {line} in document {doc} is not token-editable")]
    NotTokenized {
        /// Document id
        doc: String,
        /// Line number
        line: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from corpus loading
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Error from catalogue loading
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Error from the injection engine
    #[error("Injection error: {0}")]
    Injection(#[from] InjectionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
