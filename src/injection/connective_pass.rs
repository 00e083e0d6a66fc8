/*!
 * Discourse connective errors.
 *
 * A connective the post-editor removed is matched in the MT sentence and
 * written back at its aligned PE position, displacing whatever the
 * post-editor put there. An unaligned sentence-initial connective is
 * inserted at position 0. Anything else has no safe position and is left
 * out.
 */

use log::debug;

use super::line_pass::{LineInput, LinePass};
use super::markup::{EditKind, ErrorKind, Markup};
use super::resolver::{Resolution, resolve};
use super::stats::PassStats;
use super::working::{Mutation, TokenEdit, WorkingLine};
use crate::catalogue::RemovalSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectivePass;

impl ConnectivePass {
    pub fn new() -> Self {
        Self
    }
}

impl LinePass for ConnectivePass {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Connective
    }

    fn reinsert(
        &self,
        input: &LineInput<'_>,
        to_reinsert: &[String],
        line: &mut WorkingLine,
        to_remove: &mut RemovalSet,
        stats: &mut PassStats,
    ) {
        for word in to_reinsert {
            if line.contains_plain(word) {
                debug!("connective {:?} already present in {}:{}", word, input.doc, input.line);
                continue;
            }

            match resolve(&input.mt_tokens, input.alignments, word) {
                Resolution::Aligned { pe_index, .. } => {
                    let Some(position) = line.position_of_pe(pe_index) else {
                        debug!(
                            "connective {:?}: PE index {} out of range in {}:{}",
                            word, pe_index, input.doc, input.line
                        );
                        stats.abandoned += 1;
                        continue;
                    };
                    let displaced = line
                        .slot(position)
                        .and_then(|slot| slot.plain())
                        .unwrap_or_default()
                        .to_string();
                    let markup = Markup::token(ErrorKind::Connective, EditKind::Removed, word.as_str(), displaced.as_str());
                    let mutation = Mutation::Overwrite {
                        index: position,
                        edit: TokenEdit::reinsert(word.as_str(), markup),
                    };
                    match line.apply(mutation) {
                        Ok(()) => {
                            to_remove.take(word);
                            to_remove.take(&displaced);
                            stats.reinserted += 1;
                        }
                        Err(e) => {
                            debug!("connective {:?} in {}:{}: {}", word, input.doc, input.line, e);
                            stats.abandoned += 1;
                        }
                    }
                }
                Resolution::NullInitial => {
                    let markup = Markup::token(ErrorKind::Connective, EditKind::Removed, word.as_str(), "");
                    let mutation = Mutation::Insert {
                        index: 0,
                        edit: TokenEdit::reinsert(word.as_str(), markup),
                    };
                    match line.apply(mutation) {
                        Ok(()) => {
                            to_remove.take(word);
                            stats.null_inserted += 1;
                        }
                        Err(e) => {
                            debug!("connective {:?} in {}:{}: {}", word, input.doc, input.line, e);
                            stats.abandoned += 1;
                        }
                    }
                }
                Resolution::Unaligned { mt_index } => {
                    debug!(
                        "connective {:?}: MT index {} unaligned in {}:{}",
                        word, mt_index, input.doc, input.line
                    );
                    stats.abandoned += 1;
                }
                Resolution::NotInMt => {
                    debug!("connective {:?} not in MT for {}:{}", word, input.doc, input.line);
                    stats.abandoned += 1;
                }
            }
        }
    }
}
