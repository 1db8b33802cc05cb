//! JavaScript profile
//!
//! Covers the token surface of modern JavaScript: template literals span
//! lines, numeric literals take `_` separators and the BigInt `n` suffix,
//! and `$` is an identifier character. Symbols are function declarations,
//! class declarations and `const`-bound arrow functions.

use codescope_engine::{
    BodyStyle, LexerRule, Matcher, NumberSyntax, PatternStep, Profile, SymbolRule,
};

use crate::support;

const KEYWORDS: &[&str] = &[
    "function", "class", "const", "let", "var", "return", "if", "else", "for", "while", "do",
    "switch", "case", "break", "continue", "new", "delete", "typeof", "instanceof", "in", "of",
    "this", "super", "extends", "import", "export", "default", "from", "async", "await", "yield",
    "static", "get", "set", "try", "catch", "finally", "throw", "void", "null", "undefined",
    "true", "false",
];

const OPERATORS: &[&str] = &[
    "===", "!==", "**=", "...", "=>", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "&&", "||", "??",
    "?.", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "**", "++",
    "--", "<<", ">>", "=", "+", "-", "*", "/", "%", "<", ">", "!", "&", "|", "^", "~", "?", ":",
];

const PUNCTUATION: &[&str] = &["{", "}", "(", ")", "[", "]", ";", ",", "."];

pub fn profile() -> Profile {
    let mut profile = Profile::new("javascript");
    profile.extensions = vec![".js".to_string(), ".mjs".to_string(), ".cjs".to_string()];
    profile.classes = support::identifier_classes("_$");
    profile.token_types = support::token_types(&[
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("templateString", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("identifier", "identifier"),
        ("operator", "operator"),
        ("punctuation", "punctuation"),
    ]);
    profile.states.insert(
        "root".to_string(),
        vec![
            support::whitespace_rule(),
            support::newline_rule(),
            LexerRule::emit(Matcher::line("//"), "comment"),
            LexerRule::emit(Matcher::delimited("/*", "*/").multiline(), "comment"),
            LexerRule::emit(
                Matcher::delimited("`", "`").escaped('\\').multiline(),
                "templateString",
            ),
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
                    suffixes: vec!["n".to_string()],
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
    profile.symbols = vec![
        SymbolRule::new(
            "function",
            "function",
            vec![
                PatternStep::literal("keyword", "function"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Braces),
        SymbolRule::new(
            "class",
            "class",
            vec![
                PatternStep::literal("keyword", "class"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Braces),
        // const name = (...) => { ... }
        SymbolRule::new(
            "arrowFunction",
            "function",
            vec![
                PatternStep::literal("keyword", "const"),
                PatternStep::capture("identifier", "name"),
                PatternStep::literal("operator", "="),
                PatternStep::skip_up_to(12),
                PatternStep::literal("operator", "=>"),
            ],
        )
        .with_body(BodyStyle::Braces),
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
    fn test_template_literal_spans_lines() {
        let tokens = engine().tokenize("`a\nb`", "javascript").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, "templateString");
    }

    #[test]
    fn test_bigint_and_separator_numbers() {
        let tokens = engine().tokenize("1_000n + 0xFF", "javascript").unwrap();
        assert_eq!(tokens[0].value, "1_000n");
        assert_eq!(tokens[0].token_type, "number");
        assert_eq!(tokens[4].value, "0xFF");
    }

    #[test]
    fn test_dollar_identifiers() {
        let tokens = engine().tokenize("$el _x", "javascript").unwrap();
        assert_eq!(tokens[0].token_type, "identifier");
        assert_eq!(tokens[2].token_type, "identifier");
    }

    #[test]
    fn test_arrow_function_symbol() {
        let source = "const hook = async (ev) => {\n  run(ev);\n}\n";
        let symbols = engine().extract_symbols(source, "javascript").unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "hook");
        assert_eq!(symbols[0].kind, "function");
        assert_eq!(symbols[0].content_range.end.line, 3);
    }

    #[test]
    fn test_plain_const_is_not_a_function() {
        let symbols = engine()
            .extract_symbols("const limit = 42;\n", "javascript")
            .unwrap();
        assert!(symbols.is_empty());
    }
}
