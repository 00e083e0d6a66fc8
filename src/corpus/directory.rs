use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use super::model::{Corpus, DocId};
use crate::errors::CorpusError;

// @module: Corpus stored as one file per document

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid digits regex"));

/// Document id for a file: its first run of digits, else its stem
pub fn document_id_for(path: &Path) -> DocId {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match DIGITS_REGEX.find(&name) {
        Some(m) => DocId::from(m.as_str()),
        None => DocId::from(
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or(name),
        ),
    }
}

/// Read every regular file directly under `dir` as one document
pub fn read_directory<P: AsRef<Path>>(dir: P) -> Result<Corpus, CorpusError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CorpusError::NotFound(dir.to_path_buf()));
    }

    let mut corpus = Corpus::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| CorpusError::Unreadable {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| CorpusError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let id = document_id_for(path);
        debug!("Loaded document {} from {:?}", id, path);
        if corpus.insert(id.clone(), content.lines()).is_some() {
            warn!("Document {} appears in more than one file; keeping {:?}", id, path);
        }
    }

    if corpus.is_empty() {
        return Err(CorpusError::Empty(dir.to_path_buf()));
    }
    info!("Loaded {} documents from {:?}", corpus.len(), dir);
    Ok(corpus)
}
