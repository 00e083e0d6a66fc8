use log::{debug, warn};

use super::markup::{ErrorKind, Markup};
use super::stats::PassStats;
use super::working::WorkingCorpus;
use crate::catalogue::StructuralErrorSet;
use crate::corpus::ParallelCorpus;

// @module: Clausal errors, whole PE lines swapped for their MT sentence

/// Replace every catalogued line with its MT sentence.
///
/// The plain copy gets the MT line verbatim; the tagged copy gets it wrapped
/// once in a clausal annotation. The set itself then serves as the exclusion
/// set for the token-level passes.
pub fn run_structural_pass(
    structural: &StructuralErrorSet,
    corpus: &ParallelCorpus,
    working: &mut WorkingCorpus,
) -> PassStats {
    let mut stats = PassStats::new(ErrorKind::Structural);

    for (doc, line) in structural.iter() {
        let mt = match corpus.sentence_pair(doc, line) {
            Ok((_, mt)) => mt,
            Err(e) => {
                warn!("structural pass: {}", e);
                stats.lines_missing += 1;
                continue;
            }
        };

        let tagged = Markup::structural(mt).to_string();
        match working.replace_line(doc, line, mt.to_string(), tagged) {
            Ok(()) => stats.lines_processed += 1,
            Err(e) => {
                warn!("structural pass: {}", e);
                stats.lines_missing += 1;
            }
        }
    }

    debug!("{}", stats);
    stats
}
