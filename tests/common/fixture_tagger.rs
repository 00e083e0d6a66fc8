/*!
 * Fixed-fixture POS tagger for testing
 *
 * Tags tokens from a word table so lexical-pass tests do not need a tagger
 * model. Records every sentence it is asked to tag.
 */

use std::cell::RefCell;
use std::collections::HashMap;

use discourse_inject::corpus::tokenize;
use discourse_inject::injection::tagger::UNKNOWN_TAG;
use discourse_inject::injection::{PosTagger, TaggedToken};

#[derive(Debug, Default)]
pub struct FixtureTagger {
    tags: HashMap<String, String>,
    /// Sentences tagged so far
    pub calls: RefCell<Vec<String>>,
}

impl FixtureTagger {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            tags: entries
                .iter()
                .map(|(word, tag)| (word.to_string(), tag.to_string()))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Tagger for the shared sample corpus
    pub fn for_sample() -> Self {
        Self::new(&[
            ("the", "DT"),
            ("very", "RB"),
            ("old", "JJ"),
            ("building", "NN"),
            ("stood", "VBD"),
            ("remark", "NN"),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl PosTagger for FixtureTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        self.calls.borrow_mut().push(sentence.to_string());
        tokenize(sentence)
            .into_iter()
            .map(|token| {
                let tag = self
                    .tags
                    .get(&token)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_TAG.to_string());
                TaggedToken::new(token, tag)
            })
            .collect()
    }
}
