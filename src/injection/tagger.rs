/*!
 * Part-of-speech tagging for the lexical pass.
 *
 * Tagging sits behind the `PosTagger` trait so the lexical pass can be run
 * against a fixed fixture in tests. `NlpruleTagger` tags with a binary
 * nlprule model; `LexiconTagger` layers an optional `word<TAB>TAG` lexicon
 * over it. Tags follow the Penn Treebank set.
 */

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use nlprule::Tokenizer;

use crate::corpus::tokenize;

/// Penn Treebank noun tags
pub const DEFAULT_NOUN_TAGS: [&str; 4] = ["NN", "NNS", "NNP", "NNPS"];

/// Tag given to tokens nothing could tag
pub const UNKNOWN_TAG: &str = "XX";

// How far ahead to look for a model token matching a corpus token
const ALIGN_WINDOW: usize = 3;

/// A token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub token: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

/// Tags a sentence as an ordered sequence of (token, tag)
pub trait PosTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken>;
}

impl<T: PosTagger + ?Sized> PosTagger for &T {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        (**self).tag(sentence)
    }
}

impl<T: PosTagger + ?Sized> PosTagger for Box<T> {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        (**self).tag(sentence)
    }
}

/// The set of tags counted as nouns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounTags(HashSet<String>);

impl NounTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn is_noun(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

impl Default for NounTags {
    fn default() -> Self {
        Self::new(DEFAULT_NOUN_TAGS)
    }
}

/// Attach model tags to corpus tokens.
///
/// `analysed` holds the model's own (text, tag) tokens for the same sentence.
/// Both sequences follow the sentence left to right, so a cursor walks the
/// model tokens; a corpus token takes the tag of the next model token with the
/// same text, or one that is a prefix of it (or it of them) within a short
/// window. Tokens with no counterpart get `UNKNOWN_TAG`.
pub fn align_tags<S: AsRef<str>>(tokens: Vec<String>, analysed: &[(S, S)]) -> Vec<TaggedToken> {
    let mut cursor = 0;
    tokens
        .into_iter()
        .map(|token| {
            let window_end = (cursor + ALIGN_WINDOW).min(analysed.len());
            let window = &analysed[cursor.min(window_end)..window_end];
            let found = window
                .iter()
                .position(|(text, _)| text.as_ref() == token)
                .or_else(|| {
                    window.iter().position(|(text, _)| {
                        let text = text.as_ref();
                        !text.is_empty() && (token.starts_with(text) || text.starts_with(token.as_str()))
                    })
                });
            match found {
                Some(offset) => {
                    let (_, tag) = &window[offset];
                    cursor += offset + 1;
                    TaggedToken::new(token, tag.as_ref())
                }
                None => TaggedToken::new(token, UNKNOWN_TAG),
            }
        })
        .collect()
}

/// Tagger backed by an nlprule tokenizer model
pub struct NlpruleTagger {
    tokenizer: Tokenizer,
}

impl NlpruleTagger {
    /// Load a binary tokenizer model, e.g. `en_tokenizer.bin`
    pub fn from_model_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer =
            Tokenizer::new(path).map_err(|e| anyhow!("Failed to load tagger model {:?}: {}", path, e))?;
        info!("Loaded tagger model from {:?}", path);
        Ok(Self { tokenizer })
    }

    /// The model's tokens for a sentence with their first part-of-speech tag
    fn analyse(&self, sentence: &str) -> Vec<(String, String)> {
        let mut analysed = Vec::new();
        for sent in self.tokenizer.pipe(sentence) {
            for token in sent.tokens() {
                let text = token.word().text().as_str();
                if text.trim().is_empty() {
                    continue;
                }
                let pos = token
                    .word()
                    .tags()
                    .iter()
                    .map(|tag| tag.pos().as_str())
                    .find(|pos| !pos.is_empty())
                    .unwrap_or(UNKNOWN_TAG);
                analysed.push((text.to_string(), pos.to_string()));
            }
        }
        analysed
    }
}

impl PosTagger for NlpruleTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        align_tags(tokenize(sentence), &self.analyse(sentence))
    }
}

/// Lexicon tagger, optionally over an nlprule model
#[derive(Default)]
pub struct LexiconTagger {
    lexicon: HashMap<String, String>,
    model: Option<NlpruleTagger>,
}

impl LexiconTagger {
    /// Tagger with an empty lexicon and no model
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `word<TAB>TAG` lexicon; blank lines and `#` comments are ignored
    pub fn from_lexicon_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read lexicon: {:?}", path))?;
        let tagger = Self::from_lexicon_str(&content);
        debug!("Loaded {} lexicon entries from {:?}", tagger.lexicon.len(), path);
        Ok(tagger)
    }

    pub fn from_lexicon_str(content: &str) -> Self {
        let mut lexicon = HashMap::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((word, tag)) if !word.is_empty() && !tag.trim().is_empty() => {
                    lexicon.insert(word.to_string(), tag.trim().to_string());
                }
                _ => warn!("Ignoring malformed lexicon line {}: {}", number + 1, line),
            }
        }
        Self { lexicon, model: None }
    }

    /// Take base tags from `model`; lexicon entries still win
    pub fn with_model(mut self, model: NlpruleTagger) -> Self {
        self.model = Some(model);
        self
    }

    fn lookup(&self, token: &str) -> Option<&String> {
        self.lexicon.get(token).or_else(|| self.lexicon.get(&token.to_lowercase()))
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let base = match &self.model {
            Some(model) => model.tag(sentence),
            None => tokenize(sentence)
                .into_iter()
                .map(|token| TaggedToken::new(token, UNKNOWN_TAG))
                .collect(),
        };
        base.into_iter()
            .map(|tagged| match self.lookup(&tagged.token) {
                Some(tag) => TaggedToken::new(tagged.token, tag.as_str()),
                None => tagged,
            })
            .collect()
    }
}
