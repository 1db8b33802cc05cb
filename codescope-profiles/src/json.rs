//! JSON profile
//!
//! The smallest built-in profile: strings, numbers, the three literal
//! keywords and punctuation. Object keys become `property` symbols.

use codescope_engine::{LexerRule, Matcher, NumberSyntax, PatternStep, Profile, SymbolRule};

use crate::support;

pub fn profile() -> Profile {
    let mut profile = Profile::new("json");
    profile.extensions = vec![".json".to_string()];
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("string", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("punctuation", "punctuation"),
    ]);
    profile.states.insert(
        "root".to_string(),
        vec![
            support::whitespace_rule(),
            support::newline_rule(),
            LexerRule::emit(Matcher::delimited("\"", "\"").escaped('\\'), "string"),
            LexerRule::emit(
                Matcher::number(NumberSyntax {
                    float: true,
                    scientific: true,
                    ..NumberSyntax::default()
                }),
                "number",
            ),
            LexerRule::emit(Matcher::keywords(["true", "false", "null"]), "keyword"),
            LexerRule::emit(
                Matcher::any_exact(["{", "}", "[", "]", ":", ","]),
                "punctuation",
            ),
        ],
    );
    profile.skip_types = vec!["whitespace".to_string(), "newline".to_string()];
    profile.blocks = support::standard_blocks();
    profile.symbols = vec![SymbolRule::new(
        "key",
        "property",
        vec![
            PatternStep::capture("string", "name"),
            PatternStep::literal("punctuation", ":"),
        ],
    )];
    profile
}
