//! Markdown profile
//!
//! Tokenization is line-oriented and deliberately coarse: headings and
//! fenced code blocks are the structural anchors, plain prose lexes as one
//! `text` token per line. Blank lines terminate heading content, which is
//! what the markup-block body style measures.

use codescope_engine::{BodyStyle, CharClass, LexerRule, Matcher, PatternStep, Profile, SymbolRule};

use crate::support;

pub fn profile() -> Profile {
    let mut profile = Profile::new("markdown");
    profile.extensions = vec![".md".to_string(), ".markdown".to_string()];
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("heading", "heading"),
        ("codeBlock", "code"),
        ("code", "code"),
        ("marker", "punctuation"),
        ("text", "plain"),
    ]);
    profile.states.insert(
        "root".to_string(),
        vec![
            LexerRule::emit(
                Matcher::delimited("```", "```").multiline(),
                "codeBlock",
            ),
            LexerRule::emit(Matcher::line("#"), "heading"),
            LexerRule::emit(Matcher::delimited("`", "`"), "code"),
            // List bullets and blockquote markers.
            LexerRule::emit(Matcher::any_exact(["-", "*", "+", ">"]), "marker"),
            support::whitespace_rule(),
            support::newline_rule(),
            LexerRule::emit(
                Matcher::chars_then(
                    CharClass::Newline
                        .or(CharClass::Whitespace)
                        .negated(),
                    CharClass::Newline.negated(),
                ),
                "text",
            ),
        ],
    );
    profile.skip_types = vec!["whitespace".to_string(), "newline".to_string()];
    profile.symbols = vec![
        SymbolRule::new(
            "heading",
            "heading",
            vec![PatternStep::capture("heading", "name")],
        )
        .with_body(BodyStyle::MarkupBlock),
        SymbolRule::new("codeBlock", "codeBlock", vec![PatternStep::token("codeBlock")]),
    ];
    profile
}
