/*!
 * Reader and writer for the "doctext" corpus format.
 *
 * A doctext stream is plain text, one sentence per line, where a line
 * starting with `#` opens a new document:
 *
 * ```text
 * # id=1
 * First sentence of document 1.
 * Second sentence.
 * # id=2 genre=news
 * Only sentence of document 2.
 * ```
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Corpus, DocId};
use crate::errors::CorpusError;

/// Id used for lines that appear before the first header
pub const DEFAULT_DOC_ID: &str = "0";

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^=\s]+)=("[^"]*"|\S+)"#).expect("Invalid header attribute regex")
});

/// Parse the `key=value` attributes of a header line (without the leading `#`)
pub fn parse_header(header: &str) -> Vec<(String, String)> {
    ATTRIBUTE_REGEX
        .captures_iter(header)
        .map(|cap| {
            let value = cap[2].trim_matches('"').to_string();
            (cap[1].to_string(), value)
        })
        .collect()
}

/// Document id of a header line, `None` when the line is not a header
pub fn header_id(line: &str) -> Option<String> {
    let header = line.strip_prefix('#')?;
    parse_header(header)
        .into_iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value)
}

/// Parse a doctext stream into a corpus.
///
/// Only `#` lines carrying an `id=` attribute open a document; any other
/// `#` line is a sentence of the current document.
pub fn parse_doctext(content: &str) -> Corpus {
    let mut corpus = Corpus::new();
    let mut current = DocId::from(DEFAULT_DOC_ID);

    for (number, line) in content.lines().enumerate() {
        if let Some(id) = header_id(line) {
            current = DocId::from(id);
            if corpus.insert(current.clone(), Vec::<String>::new()).is_some() {
                warn!("Document {} appears twice; keeping the later copy", current);
            }
            debug!("doctext document {}", current);
            continue;
        }
        if line.starts_with('#') {
            warn!(
                "Line {} starts with '#' but has no id attribute; kept as a sentence of document {}",
                number + 1,
                current
            );
        }
        corpus.push_line(&current, line);
    }

    corpus
}

/// Read a doctext file into a corpus
pub fn read_doctext<P: AsRef<Path>>(path: P) -> Result<Corpus, CorpusError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| CorpusError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let corpus = parse_doctext(&content);
    if corpus.is_empty() {
        return Err(CorpusError::Empty(path.to_path_buf()));
    }
    Ok(corpus)
}

/// Write documents as a doctext stream, one `# id=` header per document
pub fn write_doctext<'a, W, D, L>(writer: &mut W, documents: D) -> io::Result<()>
where
    W: Write,
    D: IntoIterator<Item = (&'a DocId, L)>,
    L: IntoIterator<Item = String>,
{
    for (id, lines) in documents {
        writeln!(writer, "# id={}", id)?;
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(())
}
