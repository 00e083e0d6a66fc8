use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use super::{parse_line_number, read_catalogue};
use crate::corpus::DocId;
use crate::errors::CatalogueError;

// @module: Lines replaced wholesale by their MT counterpart (clausal errors)

/// Structural error catalogue: `document id → [line numbers]`.
///
/// Also serves as the exclusion set for the token-level passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralErrorSet {
    documents: BTreeMap<DocId, BTreeSet<usize>>,
}

impl StructuralErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    // @loads: JSON structural catalogue from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let content = read_catalogue(path)?;
        Self::parse(&content, path)
    }

    // @parses: {"doc": [1, "2", ...]}; bad line entries are logged and dropped
    pub fn parse(content: &str, origin: &Path) -> Result<Self, CatalogueError> {
        let root: Value = serde_json::from_str(content).map_err(|e| CatalogueError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let Value::Object(documents) = root else {
            return Err(CatalogueError::Parse {
                path: origin.to_path_buf(),
                message: "expected an object of document ids".to_string(),
            });
        };

        let mut set = Self::new();
        for (doc, lines) in documents {
            let Value::Array(lines) = lines else {
                warn!("Skipping structural errors for document {}: not a list", doc);
                continue;
            };
            for line in lines {
                let raw = match line {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                match parse_line_number(&doc, &raw) {
                    Ok(line) => set.insert(DocId::from(doc.as_str()), line),
                    Err(e) => warn!("{}", e),
                }
            }
        }

        debug!("Loaded {} structural error lines", set.len());
        Ok(set)
    }

    pub fn insert(&mut self, doc: DocId, line: usize) {
        self.documents.entry(doc).or_default().insert(line);
    }

    /// Whether the line is claimed by a structural error
    pub fn contains(&self, doc: &DocId, line: usize) -> bool {
        self.documents
            .get(doc)
            .is_some_and(|lines| lines.contains(&line))
    }

    /// Every (document, line) pair, documents and lines ascending
    pub fn iter(&self) -> impl Iterator<Item = (&DocId, usize)> {
        self.documents
            .iter()
            .flat_map(|(doc, lines)| lines.iter().map(move |line| (doc, *line)))
    }

    /// Number of lines in the set
    pub fn len(&self) -> usize {
        self.documents.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
