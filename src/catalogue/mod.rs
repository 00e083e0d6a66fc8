/*!
 * Input catalogues that drive the injection passes.
 *
 * - `alignment`: per-line MT→PE token alignments
 * - `edits`: per-line tokens to reinsert / remove (lexical and connective)
 * - `structural`: lines replaced wholesale by their MT counterpart
 *
 * Line numbers are normalised to `usize` when a catalogue is loaded; the
 * string keys of the serialized form never leave this module.
 */

pub mod alignment;
pub mod edits;
pub mod structural;

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::errors::CatalogueError;

pub use alignment::{AlignmentEntry, AlignmentIndex};
pub use edits::{EditCatalogue, EditRecord, RemovalSet};
pub use structural::StructuralErrorSet;

/// Read a catalogue file to a string
pub(crate) fn read_catalogue(path: &Path) -> Result<String, CatalogueError> {
    fs::read_to_string(path).map_err(|e| CatalogueError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML (or JSON, which YAML accepts) into a generic value
pub(crate) fn parse_value(content: &str, origin: &Path) -> Result<Value, CatalogueError> {
    serde_yaml::from_str(content).map_err(|e| CatalogueError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Render a scalar mapping key (`"12"` or `12`) as a string
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a line key into a zero-based line number
pub(crate) fn parse_line_number(doc: &str, raw: &str) -> Result<usize, CatalogueError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogueError::InvalidLineNumber {
            doc: doc.to_string(),
            line: raw.to_string(),
        })
}
