/*!
 * The two corpus-in-construction copies, kept in lock step.
 *
 * Every line starts as the verbatim PE sentence. A structural edit replaces
 * the whole line; a token-level pass first splits it into `TokenSlot`s, each
 * holding the plain token and its tagged counterpart. A `Mutation` always
 * updates both sides of a slot at the same index, so the plain and tagged
 * outputs cannot drift apart.
 */

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::markup::{ErrorKind, Markup};
use crate::catalogue::RemovalSet;
use crate::corpus::doctext::write_doctext;
use crate::corpus::{Corpus, DocId, tokenize};
use crate::errors::InjectionError;

/// Which copy of the corpus to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Plain injected text
    Plain,
    /// Text with `<error>` markup
    Tagged,
}

/// One token position with its plain and tagged renderings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSlot {
    plain: Option<String>,
    tagged: String,
    edited: bool,
    inserted: bool,
}

impl TokenSlot {
    /// An unedited PE token
    pub fn original(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            plain: Some(token.clone()),
            tagged: token,
            edited: false,
            inserted: false,
        }
    }

    /// Plain token, `None` once deleted
    pub fn plain(&self) -> Option<&str> {
        self.plain.as_deref()
    }

    pub fn tagged(&self) -> &str {
        &self.tagged
    }

}

/// The plain/tagged value pair written into a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEdit {
    plain: Option<String>,
    markup: Markup,
}

impl TokenEdit {
    /// Put `token` into the plain copy and its annotation into the tagged copy
    pub fn reinsert(token: impl Into<String>, markup: Markup) -> Self {
        Self {
            plain: Some(token.into()),
            markup,
        }
    }
}

/// An edit applied to both copies of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Overwrite the slot at `index`
    Overwrite { index: usize, edit: TokenEdit },
    /// Insert a new slot before `index`
    Insert { index: usize, edit: TokenEdit },
}

/// A tokenized line under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingLine {
    slots: Vec<TokenSlot>,
}

impl WorkingLine {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            slots: tokens.iter().map(|t| TokenSlot::original(t.as_ref())).collect(),
        }
    }

    pub fn from_sentence(sentence: &str) -> Self {
        Self::from_tokens(&tokenize(sentence))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&TokenSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[TokenSlot] {
        &self.slots
    }

    /// Slot index of the `pe_index`-th PE token, skipping inserted slots.
    ///
    /// Alignment indices refer to the PE sentence; earlier insertions on the
    /// same line shift the slots, not the PE positions.
    pub fn position_of_pe(&self, pe_index: usize) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.inserted)
            .nth(pe_index)
            .map(|(position, _)| position)
    }

    /// Whether `token` is currently present in the plain copy
    pub fn contains_plain(&self, token: &str) -> bool {
        self.slots.iter().any(|slot| slot.plain() == Some(token))
    }

    /// Tokens of the plain copy, deleted slots omitted
    pub fn plain_tokens(&self) -> Vec<&str> {
        self.slots.iter().filter_map(TokenSlot::plain).collect()
    }

    /// Tokens of the tagged copy, one per slot
    pub fn tagged_tokens(&self) -> Vec<&str> {
        self.slots.iter().map(TokenSlot::tagged).collect()
    }

    /// Apply a mutation to both copies.
    ///
    /// Fails without touching the line when the index is out of range or the
    /// slot already carries an edit.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), InjectionError> {
        match mutation {
            Mutation::Overwrite { index, edit } => {
                let len = self.slots.len();
                let slot = self
                    .slots
                    .get_mut(index)
                    .ok_or(InjectionError::IndexOutOfRange { index, len })?;
                if slot.edited {
                    return Err(InjectionError::AlreadyEdited { index });
                }
                slot.plain = edit.plain;
                slot.tagged = edit.markup.inline();
                slot.edited = true;
            }
            Mutation::Insert { index, edit } => {
                if index > self.slots.len() {
                    return Err(InjectionError::IndexOutOfRange {
                        index,
                        len: self.slots.len(),
                    });
                }
                self.slots.insert(
                    index,
                    TokenSlot {
                        plain: edit.plain,
                        tagged: edit.markup.inline(),
                        edited: true,
                        inserted: true,
                    },
                );
            }
        }
        Ok(())
    }

    /// Delete every unedited slot whose token is in `to_remove`.
    ///
    /// The tagged copy keeps a deletion annotation in place of each token;
    /// the plain copy drops it. Returns the number of slots deleted.
    pub fn delete_matching(&mut self, to_remove: &RemovalSet, kind: ErrorKind) -> usize {
        let mut deleted = 0;
        for slot in self.slots.iter_mut().filter(|slot| !slot.edited) {
            let Some(token) = slot.plain.clone() else {
                continue;
            };
            if to_remove.contains(&token) {
                slot.plain = None;
                slot.tagged = Markup::deletion(kind, token).inline();
                slot.edited = true;
                deleted += 1;
            }
        }
        deleted
    }

    /// Whitespace-joined rendering of one copy
    pub fn render(&self, channel: Channel) -> String {
        match channel {
            Channel::Plain => self.plain_tokens().join(" "),
            Channel::Tagged => self.tagged_tokens().join(" "),
        }
    }
}

/// State of one line of the working corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    /// Untouched PE sentence
    Original(String),
    /// Whole line replaced
    Replaced { plain: String, tagged: String },
    /// Split into tokens for token-level editing
    Tokens(WorkingLine),
}

impl LineState {
    pub fn render(&self, channel: Channel) -> String {
        match (self, channel) {
            (Self::Original(text), _) => text.clone(),
            (Self::Replaced { plain, .. }, Channel::Plain) => plain.clone(),
            (Self::Replaced { tagged, .. }, Channel::Tagged) => tagged.clone(),
            (Self::Tokens(line), channel) => line.render(channel),
        }
    }
}

/// The injected and tagged corpora under construction
#[derive(Debug, Clone, Default)]
pub struct WorkingCorpus {
    documents: BTreeMap<DocId, Vec<LineState>>,
}

impl WorkingCorpus {
    /// Start both copies as a verbatim copy of the PE corpus
    pub fn from_corpus(pe: &Corpus) -> Self {
        let documents = pe
            .iter()
            .map(|(id, lines)| {
                let states = lines.iter().map(|l| LineState::Original(l.clone())).collect();
                (id.clone(), states)
            })
            .collect();
        Self { documents }
    }

    pub fn line(&self, doc: &DocId, line: usize) -> Option<&LineState> {
        self.documents.get(doc).and_then(|lines| lines.get(line))
    }

    fn line_mut(&mut self, doc: &DocId, line: usize) -> Result<&mut LineState, InjectionError> {
        self.documents
            .get_mut(doc)
            .ok_or_else(|| InjectionError::UnknownDocument(doc.to_string()))?
            .get_mut(line)
            .ok_or_else(|| InjectionError::UnknownLine {
                doc: doc.to_string(),
                line,
            })
    }

    /// Replace a whole line in both copies
    pub fn replace_line(&mut self, doc: &DocId, line: usize, plain: String, tagged: String) -> Result<(), InjectionError> {
        *self.line_mut(doc, line)? = LineState::Replaced { plain, tagged };
        Ok(())
    }

    /// The token view of a line, tokenizing it on first access.
    ///
    /// Lines already edited by an earlier token-level pass keep their slots.
    pub fn tokenized_line(&mut self, doc: &DocId, line: usize) -> Result<&mut WorkingLine, InjectionError> {
        let state = self.line_mut(doc, line)?;
        if let LineState::Original(text) = state {
            *state = LineState::Tokens(WorkingLine::from_sentence(text));
        }
        match state {
            LineState::Tokens(working) => Ok(working),
            _ => Err(InjectionError::NotTokenized {
                doc: doc.to_string(),
                line,
            }),
        }
    }

    /// Render one copy as a doctext stream
    pub fn write_to<W: Write>(&self, writer: &mut W, channel: Channel) -> std::io::Result<()> {
        write_doctext(
            writer,
            self.documents
                .iter()
                .map(|(id, lines)| (id, lines.iter().map(move |l| l.render(channel)))),
        )
    }

    /// Render one copy to a string
    pub fn render(&self, channel: Channel) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer, channel);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write one copy to a file
    pub fn write_file<P: AsRef<Path>>(&self, path: P, channel: Channel) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, channel)
            .with_context(|| format!("Failed to write output file: {:?}", path))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output file: {:?}", path))?;
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
