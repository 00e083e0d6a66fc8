/*!
 * Inline error markup for the tagged corpus.
 *
 * Wire format:
 *
 * ```text
 * <error type=clausal>whole MT sentence</error>
 *  <error type=connective edit=removed item=when>after</error>
 *  <error type=lexical edit=del item=fact></error>
 * ```
 *
 * Token-level annotations are padded with one space on each side when they
 * are placed inline in a token stream.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of discourse error an edit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Whole-line (clausal) restructuring
    Structural,
    /// Noun-level lexical cohesion
    Lexical,
    /// Discourse connective
    Connective,
}

impl ErrorKind {
    /// Value of the `type` attribute
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Structural => "clausal",
            Self::Lexical => "lexical",
            Self::Connective => "connective",
        }
    }

    /// Human-readable pass name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Lexical => "lexical",
            Self::Connective => "connective",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the tagged token relates to the post-editor's change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Token removed by the post-editor, now reinstated
    Removed,
    /// Token reinstated over a noun the post-editor introduced
    Inserted,
    /// Token inserted by the post-editor, now deleted
    Deleted,
}

impl EditKind {
    /// Value of the `edit` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Removed => "removed",
            Self::Inserted => "ins",
            Self::Deleted => "del",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `<error ...>content</error>` annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    kind: ErrorKind,
    edit: Option<(EditKind, String)>,
    content: String,
}

impl Markup {
    /// Whole-line annotation without edit attributes
    pub fn structural(content: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Structural,
            edit: None,
            content: content.into(),
        }
    }

    /// Token annotation carrying the edit kind and the displaced PE token
    pub fn token(kind: ErrorKind, edit: EditKind, content: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            kind,
            edit: Some((edit, item.into())),
            content: content.into(),
        }
    }

    /// Deletion annotation with empty content
    pub fn deletion(kind: ErrorKind, item: impl Into<String>) -> Self {
        Self::token(kind, EditKind::Deleted, "", item)
    }

    pub fn open_tag(&self) -> String {
        match &self.edit {
            Some((edit, item)) => format!("<error type={} edit={} item={}>", self.kind.tag_name(), edit, item),
            None => format!("<error type={}>", self.kind.tag_name()),
        }
    }

    pub fn close_tag() -> &'static str {
        "</error>"
    }

    /// The annotation padded with single spaces for use inside a token stream
    pub fn inline(&self) -> String {
        format!(" {} ", self)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.open_tag(), self.content, Self::close_tag())
    }
}
