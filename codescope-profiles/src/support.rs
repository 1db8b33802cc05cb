//! Shared pieces of profile data
//!
//! Most languages share the same whitespace, newline and bracket plumbing;
//! these helpers keep the per-language modules focused on what differs.

use std::collections::HashMap;

use codescope_engine::{BlockRule, CharClass, LexerRule, Matcher};

/// Runs of spaces and tabs.
pub(crate) fn whitespace_rule() -> LexerRule {
    LexerRule::emit(
        Matcher::chars_then(CharClass::Whitespace, CharClass::Whitespace),
        "whitespace",
    )
}

/// One line terminator per token, so blank-line detection sees pairs.
pub(crate) fn newline_rule() -> LexerRule {
    LexerRule::emit(Matcher::any_exact(["\r\n", "\n", "\r"]), "newline")
}

/// The usual three bracket pairs of curly-brace languages.
pub(crate) fn standard_blocks() -> Vec<BlockRule> {
    vec![
        BlockRule::new("braces", "{", "}"),
        BlockRule::new("parens", "(", ")"),
        BlockRule::new("brackets", "[", "]"),
    ]
}

/// Build a token-type table from literal pairs.
pub(crate) fn token_types(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(token, category)| (token.to_string(), category.to_string()))
        .collect()
}

/// `identStart` / `identRest` classes with the given extra characters.
pub(crate) fn identifier_classes(extra: &str) -> HashMap<String, CharClass> {
    let mut classes = HashMap::new();
    classes.insert(
        "identStart".to_string(),
        CharClass::Letter.or(CharClass::OneOf(extra.to_string())),
    );
    classes.insert(
        "identRest".to_string(),
        CharClass::Alphanumeric.or(CharClass::OneOf(extra.to_string())),
    );
    classes
}

/// An identifier matcher over the `identStart` / `identRest` classes.
pub(crate) fn identifier_matcher() -> Matcher {
    Matcher::chars_then(
        CharClass::Named("identStart".to_string()),
        CharClass::Named("identRest".to_string()),
    )
}

/// Skip whitespace, newlines and comments in the structure parser.
pub(crate) fn standard_skip_types() -> Vec<String> {
    vec![
        "whitespace".to_string(),
        "newline".to_string(),
        "comment".to_string(),
    ]
}
