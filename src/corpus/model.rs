/*!
 * Core corpus types: document ids, documents and the PE/MT pair.
 */

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::InjectionError;

/// Opaque document identifier.
///
/// Ids that parse as integers order numerically and come before any
/// non-numeric id, which order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Create a document id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as written in the source
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for DocId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DocId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A set of documents, each an ordered list of sentence lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: BTreeMap<DocId, Vec<String>>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document. Trailing line terminators are stripped.
    pub fn insert<I, S>(&mut self, id: DocId, lines: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|line| strip_line_terminator(line.into()))
            .collect();
        self.documents.insert(id, lines)
    }

    /// Append one line to a document, creating the document if needed
    pub fn push_line(&mut self, id: &DocId, line: impl Into<String>) {
        self.documents
            .entry(id.clone())
            .or_default()
            .push(strip_line_terminator(line.into()));
    }

    /// Lines of a document
    pub fn document(&self, id: &DocId) -> Option<&[String]> {
        self.documents.get(id).map(Vec::as_slice)
    }

    /// One zero-indexed line of a document
    pub fn line(&self, id: &DocId, line: usize) -> Option<&str> {
        self.documents
            .get(id)
            .and_then(|lines| lines.get(line))
            .map(String::as_str)
    }

    /// Document ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &DocId> {
        self.documents.keys()
    }

    /// Documents in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &[String])> {
        self.documents
            .iter()
            .map(|(id, lines)| (id, lines.as_slice()))
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of lines across all documents
    pub fn line_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }
}

impl<I, S> FromIterator<(DocId, I)> for Corpus
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (DocId, I)>>(iter: T) -> Self {
        let mut corpus = Corpus::new();
        for (id, lines) in iter {
            corpus.insert(id, lines);
        }
        corpus
    }
}

fn strip_line_terminator(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// The post-edited reference corpus and its machine-translated counterpart.
#[derive(Debug, Clone, Default)]
pub struct ParallelCorpus {
    /// Post-edited sentences
    pub pe: Corpus,
    /// Machine-translated sentences
    pub mt: Corpus,
}

impl ParallelCorpus {
    /// Pair two corpora, warning about documents whose line counts differ
    pub fn new(pe: Corpus, mt: Corpus) -> Self {
        for (id, pe_lines) in pe.iter() {
            match mt.document(id) {
                Some(mt_lines) if mt_lines.len() != pe_lines.len() => warn!(
                    "Document {} has {} PE lines but {} MT lines",
                    id,
                    pe_lines.len(),
                    mt_lines.len()
                ),
                None => warn!("Document {} has no MT counterpart", id),
                _ => {}
            }
        }
        Self { pe, mt }
    }

    /// The PE and MT sentences of one line
    pub fn sentence_pair(&self, id: &DocId, line: usize) -> Result<(&str, &str), InjectionError> {
        let pe = self.lookup(&self.pe, id, line)?;
        let mt = self.lookup(&self.mt, id, line)?;
        Ok((pe, mt))
    }

    fn lookup<'a>(&self, corpus: &'a Corpus, id: &DocId, line: usize) -> Result<&'a str, InjectionError> {
        let document = corpus
            .document(id)
            .ok_or_else(|| InjectionError::UnknownDocument(id.to_string()))?;
        document
            .get(line)
            .map(String::as_str)
            .ok_or_else(|| InjectionError::UnknownLine {
                doc: id.to_string(),
                line,
            })
    }
}
