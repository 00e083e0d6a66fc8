use once_cell::sync::Lazy;
use regex::Regex;

// @module: Sentence tokenization shared by MT, PE and the default tagger

// @const: Word runs (apostrophes kept) or single sentence punctuation
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w']+|[.,!?;]").expect("Invalid token regex")
});

/// Split a sentence into word and punctuation tokens.
///
/// Characters that are neither word characters nor one of `.,!?;` are
/// dropped, so the result may not reassemble into the input.
pub fn tokenize(sentence: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(sentence)
        .map(|m| m.as_str().to_string())
        .collect()
}
