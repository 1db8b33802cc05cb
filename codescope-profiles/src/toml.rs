//! TOML profile
//!
//! Tables, bare keys, basic and literal strings (including their multi-line
//! forms), numbers and booleans. Table symbols run to the next blank line;
//! keys are single-statement symbols ending at their line.

use codescope_engine::{
    BlockRule, BodyStyle, LexerRule, Matcher, NumberSyntax, PatternStep, Profile, SymbolRule,
};

use crate::support;

pub fn profile() -> Profile {
    let mut profile = Profile::new("toml");
    profile.extensions = vec![".toml".to_string()];
    profile.classes = support::identifier_classes("_");
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("number", "number"),
        ("boolean", "keyword"),
        ("identifier", "identifier"),
        ("operator", "operator"),
        ("punctuation", "punctuation"),
    ]);
    profile.states.insert(
        "root".to_string(),
        vec![
            support::whitespace_rule(),
            support::newline_rule(),
            LexerRule::emit(Matcher::line("#"), "comment"),
            LexerRule::emit(
                Matcher::delimited("\"\"\"", "\"\"\"").multiline(),
                "string",
            ),
            LexerRule::emit(Matcher::delimited("'''", "'''").multiline(), "string"),
            LexerRule::emit(Matcher::delimited("\"", "\"").escaped('\\'), "string"),
            LexerRule::emit(Matcher::delimited("'", "'"), "string"),
            LexerRule::emit(
                Matcher::number(NumberSyntax {
                    hex: true,
                    octal: true,
                    binary: true,
                    float: true,
                    scientific: true,
                    separator: Some('_'),
                    suffixes: Vec::new(),
                }),
                "number",
            ),
            LexerRule::emit(Matcher::keywords(["true", "false"]), "boolean"),
            LexerRule::emit(support::identifier_matcher(), "identifier"),
            LexerRule::emit(Matcher::exact("="), "operator"),
            // `-`, `+` and `:` appear in dates, times and signed numbers.
            LexerRule::emit(
                Matcher::any_exact(["[", "]", "{", "}", ",", ".", "-", "+", ":"]),
                "punctuation",
            ),
        ],
    );
    profile.skip_types = support::standard_skip_types();
    profile.blocks = vec![
        BlockRule::new("brackets", "[", "]"),
        BlockRule::new("braces", "{", "}"),
    ];
    profile.symbols = vec![
        // [table] and [[array-of-tables]] headers.
        SymbolRule::new(
            "table",
            "table",
            vec![
                PatternStep::literal("punctuation", "["),
                PatternStep::optional(PatternStep::literal("punctuation", "[")),
                PatternStep::capture("identifier", "name"),
                PatternStep::skip_up_to(16),
                PatternStep::literal("punctuation", "]"),
            ],
        )
        .with_body(BodyStyle::MarkupBlock),
        SymbolRule::new(
            "key",
            "property",
            vec![
                PatternStep::capture("identifier", "name"),
                PatternStep::literal("operator", "="),
            ],
        ),
    ];
    profile
}
