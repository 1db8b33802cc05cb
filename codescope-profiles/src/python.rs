//! Python profile
//!
//! Triple-quoted strings span lines, numbers take `_` separators and the
//! imaginary `j` suffix, and `@decorator` lexes as one token. `def` and
//! `class` symbols measure their bodies by indentation.

use codescope_engine::{
    BodyStyle, CharClass, LexerRule, Matcher, NumberSyntax, PatternStep, Profile, SymbolRule,
};

use crate::support;

const KEYWORDS: &[&str] = &[
    "def", "class", "return", "if", "elif", "else", "for", "while", "break", "continue", "pass",
    "import", "from", "as", "with", "try", "except", "finally", "raise", "lambda", "global",
    "nonlocal", "del", "yield", "assert", "in", "is", "not", "and", "or", "None", "True", "False",
    "async", "await", "match", "case",
];

const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "->", ":=", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "**", "//", "<<", ">>", "=", "+", "-", "*", "/", "%", "<", ">", "&", "|",
    "^", "~", "@",
];

const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ":", ",", ";", "."];

pub fn profile() -> Profile {
    let mut profile = Profile::new("python");
    profile.extensions = vec![".py".to_string(), ".pyw".to_string()];
    profile.classes = support::identifier_classes("_");
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("identifier", "identifier"),
        ("decorator", "decorator"),
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
            LexerRule::emit(Matcher::delimited("'", "'").escaped('\\'), "string"),
            LexerRule::emit(
                Matcher::number(NumberSyntax {
                    hex: true,
                    octal: true,
                    binary: true,
                    float: true,
                    scientific: true,
                    separator: Some('_'),
                    suffixes: vec!["j".to_string(), "J".to_string()],
                }),
                "number",
            ),
            LexerRule::emit(Matcher::keywords(KEYWORDS.iter().copied()), "keyword"),
            LexerRule::emit(
                Matcher::sequence([
                    Matcher::exact("@"),
                    Matcher::chars_then(
                        CharClass::Named("identStart".to_string()),
                        CharClass::Named("identRest".to_string()).or(CharClass::OneOf(".".into())),
                    ),
                ]),
                "decorator",
            ),
            LexerRule::emit(support::identifier_matcher(), "identifier"),
            LexerRule::emit(Matcher::any_exact(OPERATORS.iter().copied()), "operator"),
            LexerRule::emit(Matcher::any_exact(PUNCTUATION.iter().copied()), "punctuation"),
        ],
    );
    profile.skip_types = support::standard_skip_types();
    profile.blocks = support::standard_blocks();
    profile.symbols = vec![
        SymbolRule::new(
            "class",
            "class",
            vec![
                PatternStep::literal("keyword", "class"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Indentation),
        SymbolRule::new(
            "function",
            "function",
            vec![
                PatternStep::literal("keyword", "def"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Indentation),
    ];
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use codescope_engine::Engine;

    fn engine() -> Engine {
        let engine = Engine::new();
        engine.register(profile());
        engine
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let tokens = engine()
            .tokenize("\"\"\"doc\nstring\"\"\"", "python")
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, "string");
    }

    #[test]
    fn test_decorator_is_one_token() {
        let tokens = engine().tokenize("@functools.cache\n", "python").unwrap();
        assert_eq!(tokens[0].token_type, "decorator");
        assert_eq!(tokens[0].value, "@functools.cache");
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = engine().tokenize("x = 1  # note\ny", "python").unwrap();
        let comment = tokens.iter().find(|t| t.token_type == "comment").unwrap();
        assert_eq!(comment.value, "# note");
    }

    #[test]
    fn test_nested_def_inside_class() {
        let source = "class User:\n    def run(self):\n        return True\n";
        let symbols = engine().extract_symbols(source, "python").unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "User");
        assert_eq!(symbols[0].kind, "class");
        assert_eq!(symbols[0].content_range.start.line, 1);
        assert_eq!(symbols[0].content_range.end.line, 3);
        assert_eq!(symbols[1].name, "run");
        assert_eq!(symbols[1].kind, "function");
        assert_eq!(symbols[1].content_range.start.line, 2);
        assert_eq!(symbols[1].content_range.end.line, 3);
    }

    #[test]
    fn test_sibling_defs_do_not_swallow_each_other() {
        let source = "def first():\n    return 1\n\ndef second():\n    return 2\n";
        let symbols = engine().extract_symbols(source, "python").unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "first");
        assert_eq!(symbols[0].content_range.end.line, 2);
        assert_eq!(symbols[1].name, "second");
        assert_eq!(symbols[1].content_range.start.line, 4);
    }
}
