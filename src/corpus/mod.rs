/*!
 * Corpus storage and loading.
 *
 * PE and MT corpora are read once, up front, into `Corpus` values keyed by
 * document id. Two on-disk layouts are supported:
 * - `directory`: one file per document
 * - `doctext`: a single stream with `# id=` headers
 */

pub mod directory;
pub mod doctext;
pub mod model;
pub mod tokenize;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CorpusError;

pub use model::{Corpus, DocId, ParallelCorpus};
pub use tokenize::tokenize;

/// On-disk layout of a corpus
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorpusLayout {
    /// Directory when the path is a directory, doctext otherwise
    #[default]
    Auto,
    /// One file per document
    Directory,
    /// Single doctext stream
    Doctext,
}

/// Load a corpus from `path` using the requested layout
pub fn load_corpus<P: AsRef<Path>>(path: P, layout: CorpusLayout) -> Result<Corpus, CorpusError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }
    match layout {
        CorpusLayout::Directory => directory::read_directory(path),
        CorpusLayout::Doctext => doctext::read_doctext(path),
        CorpusLayout::Auto if path.is_dir() => directory::read_directory(path),
        CorpusLayout::Auto => doctext::read_doctext(path),
    }
}
