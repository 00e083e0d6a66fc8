use std::fmt;

use super::markup::ErrorKind;

/// Counters collected by one injection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassStats {
    pub kind: ErrorKind,

    /// Catalogue lines that were edited
    pub lines_processed: usize,

    /// Lines skipped because a structural error claims them
    pub lines_skipped_structural: usize,

    /// Catalogue lines absent from the PE or MT corpus
    pub lines_missing: usize,

    /// Catalogue records rejected at load time
    pub lines_malformed: usize,

    /// Tokens put back at their aligned position
    pub reinserted: usize,

    /// Tokens moved onto the nearest noun
    pub redirected: usize,

    /// Sentence-initial insertions without alignment
    pub null_inserted: usize,

    /// PE-inserted tokens deleted
    pub deleted: usize,

    /// Reinsertions that found no safe position
    pub abandoned: usize,
}

impl PassStats {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            lines_processed: 0,
            lines_skipped_structural: 0,
            lines_missing: 0,
            lines_malformed: 0,
            reinserted: 0,
            redirected: 0,
            null_inserted: 0,
            deleted: 0,
            abandoned: 0,
        }
    }

    /// Number of token mutations applied
    pub fn edits(&self) -> usize {
        self.reinserted + self.redirected + self.null_inserted + self.deleted
    }
}

impl fmt::Display for PassStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Structural => write!(
                f,
                "{}: {} lines replaced, {} missing",
                self.kind, self.lines_processed, self.lines_missing
            ),
            _ => write!(
                f,
                "{}: {} lines ({} structural skipped, {} missing, {} malformed), \
                 {} reinserted, {} redirected, {} null-inserted, {} deleted, {} abandoned",
                self.kind,
                self.lines_processed,
                self.lines_skipped_structural,
                self.lines_missing,
                self.lines_malformed,
                self.reinserted,
                self.redirected,
                self.null_inserted,
                self.deleted,
                self.abandoned
            ),
        }
    }
}
