/*!
 * Word-level edit catalogues for lexical and connective errors.
 *
 * Serialized as `document id → line number → {"0": [...], "1": [...]}`:
 * - `"0"`: tokens present in MT but removed by the post-editor (reinsert)
 * - `"1"`: tokens inserted by the post-editor (remove)
 *
 * ```json
 * {"1": {"0": {"0": ["Yet"], "1": []},
 *        "1": {"0": ["when"], "1": ["after"]}}}
 * ```
 *
 * Catalogue order is preserved. A malformed line record is logged, kept in
 * `malformed()` and otherwise skipped.
 */

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use super::{parse_line_number, parse_value, read_catalogue, scalar_to_string};
use crate::corpus::DocId;
use crate::errors::CatalogueError;

/// Key of the tokens to reinsert (removed in PE)
pub const REINSERT_KEY: &str = "0";

/// Key of the tokens to remove (inserted in PE)
pub const REMOVE_KEY: &str = "1";

/// Tokens still waiting to be deleted from a line.
///
/// Shared by the reinsertion loop, which takes tokens it has already
/// overwritten, and the final deletion sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSet(IndexSet<String>);

impl RemovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Remove `token` from the set, returning whether it was present
    pub fn take(&mut self, token: &str) -> bool {
        self.0.shift_remove(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RemovalSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Edits recorded for a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRecord {
    /// Tokens the post-editor removed; reinserted to revert the edit
    pub to_reinsert: Vec<String>,
    /// Tokens the post-editor inserted; deleted to revert the edit
    pub to_remove: RemovalSet,
}

impl EditRecord {
    pub fn new<R, D, S, T>(to_reinsert: R, to_remove: D) -> Self
    where
        R: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            to_reinsert: to_reinsert.into_iter().map(Into::into).collect(),
            to_remove: to_remove.into_iter().collect(),
        }
    }

    /// Both lists are non-empty, so reinsertions may replace removed tokens
    pub fn is_replace(&self) -> bool {
        !self.to_reinsert.is_empty() && !self.to_remove.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.to_reinsert.is_empty() && self.to_remove.is_empty()
    }

    fn from_value(doc: &str, line: &str, value: &Value) -> Result<Self, CatalogueError> {
        let Value::Mapping(map) = value else {
            return Err(CatalogueError::MalformedRecord {
                doc: doc.to_string(),
                line: line.to_string(),
                message: "expected a mapping with keys \"0\" and \"1\"".to_string(),
            });
        };

        let reinsert = lookup(map, REINSERT_KEY).ok_or_else(|| CatalogueError::MissingKey {
            doc: doc.to_string(),
            line: line.to_string(),
            key: REINSERT_KEY,
        })?;
        let remove = lookup(map, REMOVE_KEY).ok_or_else(|| CatalogueError::MissingKey {
            doc: doc.to_string(),
            line: line.to_string(),
            key: REMOVE_KEY,
        })?;

        Ok(Self {
            to_reinsert: token_list(doc, line, reinsert)?,
            to_remove: token_list(doc, line, remove)?.into_iter().collect(),
        })
    }
}

fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| scalar_to_string(k).as_deref() == Some(key))
        .map(|(_, v)| v)
}

fn token_list(doc: &str, line: &str, value: &Value) -> Result<Vec<String>, CatalogueError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                scalar_to_string(item).ok_or_else(|| CatalogueError::MalformedRecord {
                    doc: doc.to_string(),
                    line: line.to_string(),
                    message: format!("non-scalar token {:?}", item),
                })
            })
            .collect(),
        other => scalar_to_string(other)
            .map(|token| vec![token])
            .ok_or_else(|| CatalogueError::MalformedRecord {
                doc: doc.to_string(),
                line: line.to_string(),
                message: format!("expected a token list, got {:?}", other),
            }),
    }
}

/// A full lexical or connective error catalogue
#[derive(Debug, Default)]
pub struct EditCatalogue {
    documents: IndexMap<DocId, IndexMap<usize, EditRecord>>,
    malformed: Vec<CatalogueError>,
}

impl EditCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let content = read_catalogue(path)?;
        Self::parse(&content, path)
    }

    /// Parse a catalogue from YAML or JSON text
    pub fn parse(content: &str, origin: &Path) -> Result<Self, CatalogueError> {
        let root = parse_value(content, origin)?;
        let mut catalogue = Self::new();

        let documents = match root {
            Value::Mapping(documents) => documents,
            Value::Null => return Ok(catalogue),
            _ => {
                return Err(CatalogueError::Parse {
                    path: origin.to_path_buf(),
                    message: "expected a mapping of document ids".to_string(),
                });
            }
        };

        for (doc_key, lines) in documents.iter() {
            let Some(doc) = scalar_to_string(doc_key) else {
                warn!("Skipping catalogue document with non-scalar id {:?}", doc_key);
                continue;
            };
            let Value::Mapping(lines) = lines else {
                catalogue.reject(CatalogueError::MalformedRecord {
                    doc: doc.clone(),
                    line: "*".to_string(),
                    message: "expected a mapping of line numbers".to_string(),
                });
                continue;
            };

            for (line_key, record) in lines.iter() {
                let raw_line = scalar_to_string(line_key).unwrap_or_else(|| format!("{:?}", line_key));
                let parsed = parse_line_number(&doc, &raw_line)
                    .and_then(|line| EditRecord::from_value(&doc, &raw_line, record).map(|r| (line, r)));
                match parsed {
                    Ok((line, record)) => catalogue.insert(DocId::from(doc.as_str()), line, record),
                    Err(e) => catalogue.reject(e),
                }
            }
        }

        debug!(
            "Loaded {} line records ({} malformed) from {:?}",
            catalogue.record_count(),
            catalogue.malformed.len(),
            origin
        );
        Ok(catalogue)
    }

    fn reject(&mut self, error: CatalogueError) {
        warn!("{}", error);
        self.malformed.push(error);
    }

    /// Add or replace the record for one line
    pub fn insert(&mut self, doc: DocId, line: usize, record: EditRecord) {
        self.documents.entry(doc).or_default().insert(line, record);
    }

    /// Record for one line
    pub fn record(&self, doc: &DocId, line: usize) -> Option<&EditRecord> {
        self.documents.get(doc).and_then(|lines| lines.get(&line))
    }

    /// Every record in catalogue order
    pub fn iter(&self) -> impl Iterator<Item = (&DocId, usize, &EditRecord)> {
        self.documents
            .iter()
            .flat_map(|(doc, lines)| lines.iter().map(move |(line, record)| (doc, *line, record)))
    }

    /// Records that failed to parse and were skipped
    pub fn malformed(&self) -> &[CatalogueError] {
        &self.malformed
    }

    /// Number of well-formed line records
    pub fn record_count(&self) -> usize {
        self.documents.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
