use crate::catalogue::AlignmentEntry;
use crate::catalogue::alignment::aligned_pe_index;

// @module: Maps a reinserted token to a PE position via MT match + alignment

/// Where a reinserted token should land in the PE sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Matched in MT at `mt_index`, aligned to `pe_index`
    Aligned { mt_index: usize, pe_index: usize },
    /// Matched sentence-initially in MT with no alignment entry
    NullInitial,
    /// Matched in MT at `mt_index` but no alignment entry covers it
    Unaligned { mt_index: usize },
    /// Token does not occur in the MT sentence
    NotInMt,
}

/// Index of the first MT token equal to `token`
pub fn find_mt_position<S: AsRef<str>>(mt_tokens: &[S], token: &str) -> Option<usize> {
    mt_tokens.iter().position(|t| t.as_ref() == token)
}

/// Join the parts of a hyphenated compound (`"well-known"` → `"wellknown"`)
pub fn normalize_hyphen(token: &str) -> String {
    token.replace('-', "")
}

/// Resolve `token` against the MT sentence and the line's alignments.
///
/// Only the MT side of each alignment entry is compared.
pub fn resolve<S: AsRef<str>>(mt_tokens: &[S], alignments: &[AlignmentEntry], token: &str) -> Resolution {
    let Some(mt_index) = find_mt_position(mt_tokens, token) else {
        return Resolution::NotInMt;
    };
    match aligned_pe_index(alignments, mt_index) {
        Some(pe_index) => Resolution::Aligned { mt_index, pe_index },
        None if mt_index == 0 => Resolution::NullInitial,
        None => Resolution::Unaligned { mt_index },
    }
}
