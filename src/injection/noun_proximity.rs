/*!
 * Redirects a lexical edit onto the nearest noun.
 *
 * Raw word alignment can land on a determiner or modifier that the two
 * tokenizers treated differently. Lexical errors are about noun referents,
 * so such edits are moved to the closest noun in the PE sentence.
 */

use super::tagger::{NounTags, TaggedToken};

/// A noun chosen as the redirect target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounTarget<'a> {
    pub index: usize,
    pub token: &'a str,
}

/// Indices of every noun in a tagged sentence
pub fn noun_positions(tagged: &[TaggedToken], nouns: &NounTags) -> Vec<usize> {
    tagged
        .iter()
        .enumerate()
        .filter(|(_, t)| nouns.is_noun(&t.tag))
        .map(|(i, _)| i)
        .collect()
}

/// Whether the token at `index` is tagged as a noun
pub fn is_noun_at(tagged: &[TaggedToken], index: usize, nouns: &NounTags) -> bool {
    tagged.get(index).is_some_and(|t| nouns.is_noun(&t.tag))
}

/// The noun closest to `pivot`; on a tie the earlier noun wins.
///
/// Returns `None` when the sentence has no noun.
pub fn nearest_noun<'a>(tagged: &'a [TaggedToken], pivot: usize, nouns: &NounTags) -> Option<NounTarget<'a>> {
    noun_positions(tagged, nouns)
        .into_iter()
        .min_by_key(|index| index.abs_diff(pivot))
        .map(|index| NounTarget {
            index,
            token: &tagged[index].token,
        })
}
