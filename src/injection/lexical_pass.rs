/*!
 * Lexical cohesion errors.
 *
 * Like the connective pass, a removed token is matched in MT and followed
 * through the alignment into PE. Lexical errors concern noun referents, so
 * the landing position is checked against a POS tagging of the PE sentence:
 * a noun is overwritten in place, anything else is redirected to the
 * nearest noun. There is no sentence-initial insertion rule here.
 */

use log::debug;

use super::line_pass::{LineInput, LinePass};
use super::markup::{EditKind, ErrorKind, Markup};
use super::noun_proximity::{is_noun_at, nearest_noun};
use super::resolver::{Resolution, normalize_hyphen, resolve};
use super::stats::PassStats;
use super::tagger::{NounTags, PosTagger, TaggedToken};
use super::working::{Mutation, TokenEdit, WorkingLine};
use crate::catalogue::RemovalSet;

pub struct LexicalPass<T: PosTagger> {
    tagger: T,
    nouns: NounTags,
}

impl<T: PosTagger> LexicalPass<T> {
    pub fn new(tagger: T) -> Self {
        Self {
            tagger,
            nouns: NounTags::default(),
        }
    }

    pub fn with_noun_tags(mut self, nouns: NounTags) -> Self {
        self.nouns = nouns;
        self
    }
}

/// Where a lexical token lands and what it displaces
struct Target {
    pe_index: usize,
    edit: EditKind,
    item: String,
}

impl<T: PosTagger> LexicalPass<T> {
    fn choose_target(&self, tagged: &[TaggedToken], line: &WorkingLine, pe_index: usize) -> Option<Target> {
        let displaced = |index: usize| {
            line.position_of_pe(index)
                .and_then(|position| line.slot(position))
                .and_then(|slot| slot.plain())
                .map(str::to_string)
        };

        if is_noun_at(tagged, pe_index, &self.nouns) {
            return displaced(pe_index).map(|item| Target {
                pe_index,
                edit: EditKind::Removed,
                item,
            });
        }

        match nearest_noun(tagged, pe_index, &self.nouns) {
            Some(noun) => Some(Target {
                pe_index: noun.index,
                edit: EditKind::Inserted,
                item: noun.token.to_string(),
            }),
            // No noun in the sentence: stay on the aligned position
            None => displaced(pe_index).map(|item| Target {
                pe_index,
                edit: EditKind::Removed,
                item,
            }),
        }
    }
}

impl<T: PosTagger> LinePass for LexicalPass<T> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Lexical
    }

    fn reinsert(
        &self,
        input: &LineInput<'_>,
        to_reinsert: &[String],
        line: &mut WorkingLine,
        to_remove: &mut RemovalSet,
        stats: &mut PassStats,
    ) {
        let mut tagged: Option<Vec<TaggedToken>> = None;

        for raw in to_reinsert {
            let word = normalize_hyphen(raw);

            let pe_index = match resolve(&input.mt_tokens, input.alignments, &word) {
                Resolution::Aligned { pe_index, .. } => pe_index,
                Resolution::NotInMt => {
                    debug!("lexical {:?} not in MT for {}:{}", word, input.doc, input.line);
                    stats.abandoned += 1;
                    continue;
                }
                Resolution::NullInitial | Resolution::Unaligned { .. } => {
                    debug!("lexical {:?} unaligned in {}:{}", word, input.doc, input.line);
                    stats.abandoned += 1;
                    continue;
                }
            };

            if line.position_of_pe(pe_index).is_none() {
                debug!(
                    "lexical {:?}: PE index {} out of range in {}:{}",
                    word, pe_index, input.doc, input.line
                );
                stats.abandoned += 1;
                continue;
            }

            let tags = tagged.get_or_insert_with(|| self.tagger.tag(input.pe));
            let Some(target) = self.choose_target(tags, line, pe_index) else {
                debug!("lexical {:?}: no usable position in {}:{}", word, input.doc, input.line);
                stats.abandoned += 1;
                continue;
            };
            let Some(position) = line.position_of_pe(target.pe_index) else {
                stats.abandoned += 1;
                continue;
            };

            let markup = Markup::token(ErrorKind::Lexical, target.edit, word.as_str(), target.item.as_str());
            let mutation = Mutation::Overwrite {
                index: position,
                edit: TokenEdit::reinsert(word.as_str(), markup),
            };
            match line.apply(mutation) {
                Ok(()) => {
                    to_remove.take(&word);
                    to_remove.take(&target.item);
                    match target.edit {
                        EditKind::Inserted => stats.redirected += 1,
                        _ => stats.reinserted += 1,
                    }
                }
                Err(e) => {
                    debug!("lexical {:?} in {}:{}: {}", word, input.doc, input.line, e);
                    stats.abandoned += 1;
                }
            }
        }
    }
}
