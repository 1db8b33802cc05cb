//! Rust profile
//!
//! Block comments nest, string literals span lines, raw strings carry no
//! escapes, and char literals are told apart from lifetimes by shape.
//! Item-level symbols (fn / struct / enum / trait / impl / mod) use brace
//! bodies.

use codescope_engine::{
    BodyStyle, CharClass, LexerRule, Matcher, NumberSyntax, PatternStep, Profile, SymbolRule,
};

use crate::support;

const KEYWORDS: &[&str] = &[
    "fn", "struct", "enum", "trait", "impl", "pub", "use", "mod", "let", "mut", "const", "static",
    "if", "else", "match", "for", "while", "loop", "return", "break", "continue", "move", "ref",
    "where", "as", "in", "dyn", "unsafe", "async", "await", "type", "crate", "self", "Self",
    "super", "extern", "true", "false",
];

const OPERATORS: &[&str] = &[
    "..=", "<<=", ">>=", "->", "=>", "::", "..", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "=", "+", "-", "*", "/", "%", "<", ">", "!",
    "&", "|", "^", "@", "#", "?",
];

const PUNCTUATION: &[&str] = &["{", "}", "(", ")", "[", "]", ";", ",", ".", ":"];

const NUMBER_SUFFIXES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64",
];

pub fn profile() -> Profile {
    let mut profile = Profile::new("rust");
    profile.extensions = vec![".rs".to_string()];
    profile.classes = support::identifier_classes("_");
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("char", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("identifier", "identifier"),
        ("lifetime", "identifier"),
        ("operator", "operator"),
        ("punctuation", "punctuation"),
    ]);
    profile.states.insert(
        "root".to_string(),
        vec![
            support::whitespace_rule(),
            support::newline_rule(),
            LexerRule::emit(Matcher::line("//"), "comment"),
            LexerRule::emit(
                Matcher::delimited("/*", "*/").multiline().nested(),
                "comment",
            ),
            // r"..." carries no escapes.
            LexerRule::emit(
                Matcher::sequence([
                    Matcher::exact("r"),
                    Matcher::delimited("\"", "\"").multiline(),
                ]),
                "string",
            ),
            LexerRule::emit(
                Matcher::delimited("\"", "\"").escaped('\\').multiline(),
                "string",
            ),
            // 'x' or '\n' is a char literal; 'a without a closing quote is a
            // lifetime, handled below.
            LexerRule::emit(Matcher::regex(r"'(?:[^'\\\n]|\\.)'"), "char"),
            LexerRule::emit(
                Matcher::sequence([
                    Matcher::exact("'"),
                    Matcher::chars_then(
                        CharClass::Named("identStart".to_string()),
                        CharClass::Named("identRest".to_string()),
                    ),
                ]),
                "lifetime",
            ),
            LexerRule::emit(
                Matcher::number(NumberSyntax {
                    hex: true,
                    octal: true,
                    binary: true,
                    float: true,
                    scientific: true,
                    separator: Some('_'),
                    suffixes: NUMBER_SUFFIXES.iter().map(|s| s.to_string()).collect(),
                }),
                "number",
            ),
            LexerRule::emit(Matcher::keywords(KEYWORDS.iter().copied()), "keyword"),
            LexerRule::emit(support::identifier_matcher(), "identifier"),
            LexerRule::emit(Matcher::any_exact(OPERATORS.iter().copied()), "operator"),
            LexerRule::emit(Matcher::any_exact(PUNCTUATION.iter().copied()), "punctuation"),
        ],
    );
    profile.skip_types = support::standard_skip_types();
    profile.blocks = support::standard_blocks();

    let braced_item = |keyword: &str, kind: &str| {
        SymbolRule::new(
            keyword,
            kind,
            vec![
                PatternStep::literal("keyword", keyword),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Braces)
    };
    profile.symbols = vec![
        braced_item("fn", "function"),
        braced_item("struct", "struct"),
        braced_item("enum", "enum"),
        braced_item("trait", "trait"),
        braced_item("impl", "impl"),
        braced_item("mod", "module"),
    ];
    profile
}
