/*!
 * Shared driver for the token-level passes.
 *
 * Walks an edit catalogue in catalogue order and, for each line:
 * 1. skips it when the structural exclusion set claims it
 * 2. fetches the PE/MT sentence pair and the line's token view
 * 3. hands the reinsertion tokens to the pass
 * 4. deletes whatever is left in the line's removal set
 *
 * A line that cannot be found is logged and skipped; the run continues.
 */

use log::{debug, warn};

use super::markup::ErrorKind;
use super::stats::PassStats;
use super::working::{WorkingCorpus, WorkingLine};
use crate::catalogue::{AlignmentEntry, AlignmentIndex, EditCatalogue, RemovalSet, StructuralErrorSet};
use crate::corpus::{DocId, ParallelCorpus, tokenize};

/// Read-only inputs shared by every line of a pass
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub corpus: &'a ParallelCorpus,
    pub alignments: &'a AlignmentIndex,
    /// Lines owned by the structural pass, if it ran
    pub exclusions: Option<&'a StructuralErrorSet>,
}

/// One catalogue line as seen by a pass
#[derive(Debug)]
pub struct LineInput<'a> {
    pub doc: &'a DocId,
    pub line: usize,
    pub pe: &'a str,
    pub mt: &'a str,
    pub mt_tokens: Vec<String>,
    pub alignments: &'a [AlignmentEntry],
}

/// A token-level error pass
pub trait LinePass {
    fn kind(&self) -> ErrorKind;

    /// Put the line's `to_reinsert` tokens back, taking handled tokens out of
    /// `to_remove`
    fn reinsert(
        &self,
        input: &LineInput<'_>,
        to_reinsert: &[String],
        line: &mut WorkingLine,
        to_remove: &mut RemovalSet,
        stats: &mut PassStats,
    );
}

/// Run `pass` over every line of `catalogue`
pub fn run_line_pass<P: LinePass + ?Sized>(
    pass: &P,
    catalogue: &EditCatalogue,
    context: PassContext<'_>,
    working: &mut WorkingCorpus,
) -> PassStats {
    let kind = pass.kind();
    let mut stats = PassStats::new(kind);
    stats.lines_malformed = catalogue.malformed().len();

    for (doc, line, record) in catalogue.iter() {
        if context.exclusions.is_some_and(|set| set.contains(doc, line)) {
            debug!("{} pass: skipping structural line {}:{}", kind, doc, line);
            stats.lines_skipped_structural += 1;
            continue;
        }

        let (pe, mt) = match context.corpus.sentence_pair(doc, line) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("{} pass: {}", kind, e);
                stats.lines_missing += 1;
                continue;
            }
        };

        let working_line = match working.tokenized_line(doc, line) {
            Ok(working_line) => working_line,
            Err(e) => {
                warn!("{} pass: {}", kind, e);
                stats.lines_missing += 1;
                continue;
            }
        };

        let input = LineInput {
            doc,
            line,
            pe,
            mt,
            mt_tokens: tokenize(mt),
            alignments: context.alignments.entries(doc, line),
        };

        let mut to_remove = record.to_remove.clone();
        pass.reinsert(&input, &record.to_reinsert, working_line, &mut to_remove, &mut stats);
        stats.deleted += working_line.delete_matching(&to_remove, kind);
        stats.lines_processed += 1;
    }

    debug!("{}", stats);
    stats
}
