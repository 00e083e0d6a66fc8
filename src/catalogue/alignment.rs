/*!
 * MT→PE word alignments.
 *
 * Serialized as `document id → line number → "mt-pe mt-pe ..."`, e.g.
 *
 * ```yaml
 * "1":
 *   "0": "1-0 2-1 3-2"
 * ```
 *
 * A list of pair strings is accepted in place of the space-separated string.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use serde_yaml::Value;

use super::{parse_line_number, parse_value, read_catalogue, scalar_to_string};
use crate::corpus::DocId;
use crate::errors::CatalogueError;

/// One aligned token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentEntry {
    /// Token index in the MT sentence
    pub mt: usize,
    /// Token index in the PE sentence
    pub pe: usize,
}

impl AlignmentEntry {
    pub fn new(mt: usize, pe: usize) -> Self {
        Self { mt, pe }
    }
}

impl FromStr for AlignmentEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mt, pe) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("missing '-' in {}", s))?;
        let mt = mt.parse().map_err(|_| format!("bad MT index in {}", s))?;
        let pe = pe.parse().map_err(|_| format!("bad PE index in {}", s))?;
        Ok(Self { mt, pe })
    }
}

impl fmt::Display for AlignmentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.mt, self.pe)
    }
}

/// Alignments for every line of every document
#[derive(Debug, Clone, Default)]
pub struct AlignmentIndex {
    documents: HashMap<DocId, HashMap<usize, Vec<AlignmentEntry>>>,
}

impl AlignmentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an alignment file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let content = read_catalogue(path)?;
        Self::parse(&content, path)
    }

    /// Parse alignments from YAML or JSON text.
    ///
    /// Unparseable pairs and line keys are logged and dropped; only a
    /// structurally invalid document fails.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, CatalogueError> {
        let root = parse_value(content, origin)?;
        let mut index = Self::new();

        let documents = match root {
            Value::Mapping(documents) => documents,
            Value::Null => return Ok(index),
            _ => {
                return Err(CatalogueError::Parse {
                    path: origin.to_path_buf(),
                    message: "expected a mapping of document ids".to_string(),
                });
            }
        };

        for (doc_key, lines) in documents.iter() {
            let Some(doc) = scalar_to_string(doc_key) else {
                warn!("Skipping alignment document with non-scalar id");
                continue;
            };
            let Value::Mapping(lines) = lines else {
                warn!("Skipping alignments for document {}: not a mapping", doc);
                continue;
            };
            for (line_key, pairs) in lines.iter() {
                let line = match scalar_to_string(line_key)
                    .ok_or_else(|| CatalogueError::InvalidLineNumber {
                        doc: doc.clone(),
                        line: format!("{:?}", line_key),
                    })
                    .and_then(|raw| parse_line_number(&doc, &raw))
                {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("{}", e);
                        continue;
                    }
                };
                let entries = parse_pairs(&doc, line, pairs);
                index.insert(DocId::from(doc.as_str()), line, entries);
            }
        }

        debug!("Loaded alignments for {} documents", index.documents.len());
        Ok(index)
    }

    /// Set the alignments of one line
    pub fn insert(&mut self, doc: DocId, line: usize, entries: Vec<AlignmentEntry>) {
        self.documents.entry(doc).or_default().insert(line, entries);
    }

    /// Alignments of one line; empty when the line has none
    pub fn entries(&self, doc: &DocId, line: usize) -> &[AlignmentEntry] {
        self.documents
            .get(doc)
            .and_then(|lines| lines.get(&line))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any alignment exists for the line
    pub fn has_line(&self, doc: &DocId, line: usize) -> bool {
        self.documents
            .get(doc)
            .is_some_and(|lines| lines.contains_key(&line))
    }

    /// Number of documents with alignments
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// The PE index of the first entry whose MT side is `mt_index`
pub fn aligned_pe_index(entries: &[AlignmentEntry], mt_index: usize) -> Option<usize> {
    entries.iter().find(|e| e.mt == mt_index).map(|e| e.pe)
}

fn parse_pairs(doc: &str, line: usize, value: &Value) -> Vec<AlignmentEntry> {
    let raw: Vec<String> = match value {
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(
                "Skipping alignments for document {} line {}: unexpected value {:?}",
                doc, line, other
            );
            Vec::new()
        }
    };

    raw.iter()
        .filter_map(|pair| match pair.parse::<AlignmentEntry>() {
            Ok(entry) => Some(entry),
            Err(_) => {
                let error = CatalogueError::InvalidAlignmentPair {
                    doc: doc.to_string(),
                    line,
                    pair: pair.clone(),
                };
                warn!("{}", error);
                None
            }
        })
        .collect()
}
