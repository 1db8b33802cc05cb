//! Matcher compiler
//!
//! A matcher specification is data; compiling it yields a scan function that
//! reports how many characters it would consume from the reader's current
//! position, without advancing the reader. The lexer commits a match by
//! advancing the reported count. A count of zero means no match.
//!
//! Longest-match among listed literals is guaranteed by sorting literal lists
//! by length, longest first, at compile time.

use std::collections::HashMap;

use crate::charclass::{self, CharClass, CompiledClass};
use crate::error::CompileError;
use crate::reader::CharReader;

/// Options for the numeric-literal matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberSyntax {
    /// Accept `0x` / `0X` hexadecimal literals.
    pub hex: bool,
    /// Accept `0o` / `0O` octal literals.
    pub octal: bool,
    /// Accept `0b` / `0B` binary literals.
    pub binary: bool,
    /// Accept fractional parts and a leading `.digit`.
    pub float: bool,
    /// Accept `[eE][+-]?digits` exponents.
    pub scientific: bool,
    /// Digit separator permitted between digits, e.g. `_`.
    pub separator: Option<char>,
    /// Literal suffixes consumed after the digits, e.g. `i32`, `n`.
    pub suffixes: Vec<String>,
}

/// A declarative matcher specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// One or more exact literals; the longest listed literal wins.
    Exact(Vec<String>),
    /// Exact words with word-boundary enforcement on both sides.
    Keywords(Vec<String>),
    /// A region between an open and a close literal.
    Delimited {
        open: String,
        close: String,
        /// Escape character that swallows the following character.
        escape: Option<char>,
        /// Whether the region may span line terminators.
        multiline: bool,
        /// Whether a recurring open literal nests.
        nested: bool,
    },
    /// A start literal through the end of the line, terminator excluded.
    Line { start: String },
    /// One character of `first`, then greedily characters of `rest`.
    CharSeq {
        first: CharClass,
        rest: Option<CharClass>,
    },
    /// A numeric literal.
    Number(NumberSyntax),
    /// Ordered conjunction of sub-matchers.
    Sequence(Vec<Matcher>),
    /// Escape hatch: an anchored regular expression.
    Regex(String),
}

impl Matcher {
    pub fn exact(literal: impl Into<String>) -> Self {
        Matcher::Exact(vec![literal.into()])
    }

    pub fn any_exact<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Matcher::Exact(literals.into_iter().map(Into::into).collect())
    }

    pub fn keywords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Matcher::Keywords(words.into_iter().map(Into::into).collect())
    }

    pub fn delimited(open: impl Into<String>, close: impl Into<String>) -> Self {
        Matcher::Delimited {
            open: open.into(),
            close: close.into(),
            escape: None,
            multiline: false,
            nested: false,
        }
    }

    /// Set the escape character of a delimited matcher.
    pub fn escaped(mut self, ch: char) -> Self {
        if let Matcher::Delimited { escape, .. } = &mut self {
            *escape = Some(ch);
        }
        self
    }

    /// Allow a delimited matcher to span line terminators.
    pub fn multiline(mut self) -> Self {
        if let Matcher::Delimited { multiline, .. } = &mut self {
            *multiline = true;
        }
        self
    }

    /// Make a delimited matcher nest on recurring open literals.
    pub fn nested(mut self) -> Self {
        if let Matcher::Delimited { nested, .. } = &mut self {
            *nested = true;
        }
        self
    }

    pub fn line(start: impl Into<String>) -> Self {
        Matcher::Line {
            start: start.into(),
        }
    }

    pub fn chars(first: CharClass) -> Self {
        Matcher::CharSeq { first, rest: None }
    }

    pub fn chars_then(first: CharClass, rest: CharClass) -> Self {
        Matcher::CharSeq {
            first,
            rest: Some(rest),
        }
    }

    pub fn number(syntax: NumberSyntax) -> Self {
        Matcher::Number(syntax)
    }

    pub fn sequence<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Matcher>,
    {
        Matcher::Sequence(parts.into_iter().collect())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Matcher::Regex(pattern.into())
    }
}

/// A matcher with classes resolved, literals sorted and regexes built.
#[derive(Debug)]
pub(crate) enum CompiledMatcher {
    Exact(Vec<String>),
    Keywords(Vec<String>),
    Delimited {
        open: String,
        close: String,
        escape: Option<char>,
        multiline: bool,
        nested: bool,
    },
    Line(String),
    CharSeq {
        first: CompiledClass,
        rest: Option<CompiledClass>,
    },
    Number(NumberSyntax),
    Sequence(Vec<CompiledMatcher>),
    Regex(regex::Regex),
}

/// Compile one matcher specification against the profile's class table.
pub(crate) fn compile(
    matcher: &Matcher,
    classes: &HashMap<String, CharClass>,
) -> Result<CompiledMatcher, CompileError> {
    Ok(match matcher {
        Matcher::Exact(literals) => {
            if literals.is_empty() {
                return Err(CompileError::EmptyMatcher("exact"));
            }
            CompiledMatcher::Exact(sorted_longest_first(literals))
        }
        Matcher::Keywords(words) => {
            if words.is_empty() {
                return Err(CompileError::EmptyMatcher("keywords"));
            }
            CompiledMatcher::Keywords(sorted_longest_first(words))
        }
        Matcher::Delimited {
            open,
            close,
            escape,
            multiline,
            nested,
        } => {
            if open.is_empty() || close.is_empty() {
                return Err(CompileError::EmptyMatcher("delimited"));
            }
            CompiledMatcher::Delimited {
                open: open.clone(),
                close: close.clone(),
                escape: *escape,
                multiline: *multiline,
                nested: *nested,
            }
        }
        Matcher::Line { start } => {
            if start.is_empty() {
                return Err(CompileError::EmptyMatcher("line"));
            }
            CompiledMatcher::Line(start.clone())
        }
        Matcher::CharSeq { first, rest } => CompiledMatcher::CharSeq {
            first: charclass::compile(first, classes)?,
            rest: rest
                .as_ref()
                .map(|r| charclass::compile(r, classes))
                .transpose()?,
        },
        Matcher::Number(syntax) => {
            let mut syntax = syntax.clone();
            syntax.suffixes = sorted_longest_first(&syntax.suffixes);
            CompiledMatcher::Number(syntax)
        }
        Matcher::Sequence(parts) => {
            if parts.is_empty() {
                return Err(CompileError::EmptyMatcher("sequence"));
            }
            CompiledMatcher::Sequence(
                parts
                    .iter()
                    .map(|p| compile(p, classes))
                    .collect::<Result<_, _>>()?,
            )
        }
        Matcher::Regex(pattern) => {
            let anchored = format!(r"\A(?:{})", pattern);
            let built = regex::Regex::new(&anchored).map_err(|err| CompileError::InvalidRegex {
                pattern: pattern.clone(),
                message: err.to_string(),
            })?;
            CompiledMatcher::Regex(built)
        }
    })
}

fn sorted_longest_first(literals: &[String]) -> Vec<String> {
    let mut sorted = literals.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted
}

impl CompiledMatcher {
    /// Number of characters this matcher would consume from the reader's
    /// current position; zero means no match. The reader is not advanced.
    pub fn measure(&self, reader: &CharReader<'_>) -> usize {
        let rest = reader.rest();
        match self {
            CompiledMatcher::Exact(literals) => literals
                .iter()
                .find(|lit| rest.starts_with(lit.as_str()))
                .map(|lit| lit.chars().count())
                .unwrap_or(0),
            CompiledMatcher::Keywords(words) => words
                .iter()
                .find(|word| {
                    rest.starts_with(word.as_str())
                        && !reader.previous_char().is_some_and(is_word_char)
                        && !rest[word.len()..].chars().next().is_some_and(is_word_char)
                })
                .map(|word| word.chars().count())
                .unwrap_or(0),
            CompiledMatcher::Delimited {
                open,
                close,
                escape,
                multiline,
                nested,
            } => measure_delimited(rest, open, close, *escape, *multiline, *nested),
            CompiledMatcher::Line(start) => measure_line(rest, start),
            CompiledMatcher::CharSeq { first, rest: tail } => {
                measure_char_seq(rest, first, tail.as_ref())
            }
            CompiledMatcher::Number(syntax) => measure_number(rest, syntax),
            CompiledMatcher::Sequence(parts) => {
                let mut probe = reader.clone();
                let mut total = 0;
                for part in parts {
                    let count = part.measure(&probe);
                    if count == 0 {
                        return 0;
                    }
                    probe.advance_by(count);
                    total += count;
                }
                total
            }
            CompiledMatcher::Regex(pattern) => pattern
                .find(rest)
                .map(|found| rest[..found.end()].chars().count())
                .unwrap_or(0),
        }
    }
}

/// Word characters for keyword boundaries: ASCII letters, digits, `_`, `$`.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn measure_delimited(
    rest: &str,
    open: &str,
    close: &str,
    escape: Option<char>,
    multiline: bool,
    nested: bool,
) -> usize {
    let Some(mut cursor) = rest.strip_prefix(open) else {
        return 0;
    };
    let mut count = open.chars().count();
    let mut depth: usize = 1;
    loop {
        if cursor.is_empty() {
            // EOF before close.
            return 0;
        }
        if let Some(esc) = escape {
            if cursor.starts_with(esc) {
                let mut chars = cursor.chars();
                chars.next();
                count += 1;
                if chars.next().is_some() {
                    count += 1;
                }
                cursor = chars.as_str();
                continue;
            }
        }
        if nested && cursor.starts_with(open) {
            depth += 1;
            count += open.chars().count();
            cursor = &cursor[open.len()..];
            continue;
        }
        if cursor.starts_with(close) {
            depth -= 1;
            count += close.chars().count();
            cursor = &cursor[close.len()..];
            if depth == 0 {
                return count;
            }
            continue;
        }
        let ch = cursor.chars().next().expect("cursor is non-empty");
        if !multiline && (ch == '\n' || ch == '\r') {
            return 0;
        }
        count += 1;
        cursor = &cursor[ch.len_utf8()..];
    }
}

fn measure_line(rest: &str, start: &str) -> usize {
    let Some(tail) = rest.strip_prefix(start) else {
        return 0;
    };
    let mut count = start.chars().count();
    for ch in tail.chars() {
        if ch == '\n' || ch == '\r' {
            break;
        }
        count += 1;
    }
    count
}

fn measure_char_seq(rest: &str, first: &CompiledClass, tail: Option<&CompiledClass>) -> usize {
    let mut chars = rest.chars();
    match chars.next() {
        Some(ch) if first.matches(ch) => {}
        _ => return 0,
    }
    let mut count = 1;
    if let Some(tail) = tail {
        for ch in chars {
            if !tail.matches(ch) {
                break;
            }
            count += 1;
        }
    }
    count
}

/// Byte-indexed cursor used by the number scanner; counts consumed chars.
struct Cursor<'a> {
    rest: &'a str,
    count: usize,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest, count: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest.chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.rest = &self.rest[ch.len_utf8()..];
            self.count += 1;
        }
    }

    fn eat_str(&mut self, literal: &str) -> bool {
        if let Some(tail) = self.rest.strip_prefix(literal) {
            self.count += literal.chars().count();
            self.rest = tail;
            true
        } else {
            false
        }
    }
}

fn measure_number(rest: &str, syntax: &NumberSyntax) -> usize {
    let mut cursor = Cursor::new(rest);

    let radix: Option<fn(char) -> bool> = if syntax.hex && (cursor.eat_str("0x") || cursor.eat_str("0X")) {
        Some(|c: char| c.is_ascii_hexdigit())
    } else if syntax.octal && (cursor.eat_str("0o") || cursor.eat_str("0O")) {
        Some(|c: char| ('0'..='7').contains(&c))
    } else if syntax.binary && (cursor.eat_str("0b") || cursor.eat_str("0B")) {
        Some(|c: char| c == '0' || c == '1')
    } else {
        None
    };

    let digits = if let Some(is_digit) = radix {
        // A radix prefix requires at least one digit in that base.
        eat_digits(&mut cursor, is_digit, syntax.separator)
    } else {
        measure_decimal(&mut cursor, syntax)
    };
    if digits == 0 {
        return 0;
    }

    for suffix in &syntax.suffixes {
        if cursor.eat_str(suffix) {
            break;
        }
    }
    cursor.count
}

/// Consume digits with optional separators between them; returns how many
/// actual digits were consumed.
fn eat_digits(cursor: &mut Cursor<'_>, is_digit: fn(char) -> bool, separator: Option<char>) -> usize {
    let mut digits = 0;
    loop {
        match cursor.peek() {
            Some(ch) if is_digit(ch) => {
                cursor.bump();
                digits += 1;
            }
            Some(ch)
                if separator == Some(ch)
                    && digits > 0
                    && cursor.peek_second().is_some_and(is_digit) =>
            {
                cursor.bump();
            }
            _ => break,
        }
    }
    digits
}

fn measure_decimal(cursor: &mut Cursor<'_>, syntax: &NumberSyntax) -> usize {
    let is_digit = |c: char| c.is_ascii_digit();
    let mut digits = 0;

    if cursor.peek() == Some('.') {
        // A leading `.digit` is a float-only form.
        if !(syntax.float && cursor.peek_second().is_some_and(is_digit)) {
            return 0;
        }
        cursor.bump();
        digits += eat_digits(cursor, is_digit, syntax.separator);
    } else {
        digits += eat_digits(cursor, is_digit, syntax.separator);
        if digits == 0 {
            return 0;
        }
        // Only consume the dot when a digit follows it.
        if syntax.float && cursor.peek() == Some('.') && cursor.peek_second().is_some_and(is_digit)
        {
            cursor.bump();
            digits += eat_digits(cursor, is_digit, syntax.separator);
        }
    }

    if syntax.scientific {
        eat_exponent(cursor);
    }
    digits
}

/// `[eE][+-]?digits`, committed only if at least one exponent digit follows.
fn eat_exponent(cursor: &mut Cursor<'_>) {
    if !matches!(cursor.peek(), Some('e') | Some('E')) {
        return;
    }
    let mut probe = Cursor::new(cursor.rest);
    probe.bump();
    if matches!(probe.peek(), Some('+') | Some('-')) {
        probe.bump();
    }
    let mut exponent_digits = 0;
    while probe.peek().is_some_and(|c| c.is_ascii_digit()) {
        probe.bump();
        exponent_digits += 1;
    }
    if exponent_digits > 0 {
        cursor.count += probe.count;
        cursor.rest = probe.rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn measure(matcher: &Matcher, source: &str) -> usize {
        let compiled = compile(matcher, &HashMap::new()).expect("matcher compiles");
        compiled.measure(&CharReader::new(source))
    }

    #[test]
    fn test_exact_prefers_longest_literal() {
        let matcher = Matcher::any_exact(["=", "==", "==="]);
        assert_eq!(measure(&matcher, "=== x"), 3);
        assert_eq!(measure(&matcher, "== x"), 2);
        assert_eq!(measure(&matcher, "= x"), 1);
        assert_eq!(measure(&matcher, "x"), 0);
    }

    #[test]
    fn test_keywords_enforce_word_boundaries() {
        let matcher = Matcher::keywords(["function", "fun"]);
        assert_eq!(measure(&matcher, "function f"), 8);
        assert_eq!(measure(&matcher, "functions"), 0);
        assert_eq!(measure(&matcher, "fun()"), 3);
        assert_eq!(measure(&matcher, "fun_ny"), 0);
    }

    #[test]
    fn test_keyword_boundary_looks_behind() {
        let compiled = compile(&Matcher::keywords(["if"]), &HashMap::new()).unwrap();
        let mut reader = CharReader::new("gif");
        reader.advance();
        // 'g' precedes, so "if" is the tail of a word.
        assert_eq!(compiled.measure(&reader), 0);

        let mut reader = CharReader::new("(if");
        reader.advance();
        assert_eq!(compiled.measure(&reader), 2);
    }

    #[test]
    fn test_delimited_single_line() {
        let matcher = Matcher::delimited("\"", "\"").escaped('\\');
        assert_eq!(measure(&matcher, "\"hi\" x"), 4);
        assert_eq!(measure(&matcher, "\"a\\\"b\""), 6);
        assert_eq!(measure(&matcher, "\"open"), 0);
        assert_eq!(measure(&matcher, "\"no\nclose\""), 0);
    }

    #[test]
    fn test_delimited_multiline() {
        let matcher = Matcher::delimited("/*", "*/").multiline();
        assert_eq!(measure(&matcher, "/* a\nb */ x"), 9);
        assert_eq!(measure(&matcher, "/* unterminated"), 0);
    }

    #[test]
    fn test_delimited_nested() {
        let matcher = Matcher::delimited("/*", "*/").multiline().nested();
        assert_eq!(measure(&matcher, "/* a /* b */ c */!"), 17);
        // Without nesting the inner open is plain content.
        let flat = Matcher::delimited("/*", "*/").multiline();
        assert_eq!(measure(&flat, "/* a /* b */ c */!"), 12);
    }

    #[test]
    fn test_delimited_escape_at_eof_fails() {
        let matcher = Matcher::delimited("\"", "\"").escaped('\\');
        assert_eq!(measure(&matcher, "\"abc\\"), 0);
    }

    #[test]
    fn test_line_excludes_terminator() {
        let matcher = Matcher::line("//");
        assert_eq!(measure(&matcher, "// note\nx"), 7);
        assert_eq!(measure(&matcher, "// to eof"), 9);
        assert_eq!(measure(&matcher, "/ not"), 0);
    }

    #[test]
    fn test_char_seq() {
        let ident = Matcher::chars_then(
            CharClass::Letter.or(CharClass::OneOf("_".into())),
            CharClass::Alphanumeric.or(CharClass::OneOf("_".into())),
        );
        assert_eq!(measure(&ident, "snake_case rest"), 10);
        assert_eq!(measure(&ident, "_x"), 2);
        assert_eq!(measure(&ident, "1x"), 0);

        let single = Matcher::chars(CharClass::Digit);
        assert_eq!(measure(&single, "12"), 1);
    }

    fn full_number() -> Matcher {
        Matcher::number(NumberSyntax {
            hex: true,
            octal: true,
            binary: true,
            float: true,
            scientific: true,
            separator: Some('_'),
            suffixes: vec!["n".to_string(), "i32".to_string()],
        })
    }

    #[rstest]
    #[case("123 x", 3)]
    #[case("1_000_000", 9)]
    #[case("0xFF;", 4)]
    #[case("0b1010", 6)]
    #[case("0o777", 5)]
    #[case("1.5", 3)]
    #[case(".5", 2)]
    #[case("1.e5", 1)] // dot not consumed without a following digit
    #[case("1e10", 4)]
    #[case("1e+10", 5)]
    #[case("1e", 1)] // exponent without digits is not committed
    #[case("1.5e-3x", 6)]
    #[case("42n", 3)]
    #[case("7i32", 4)]
    #[case("0x", 0)] // prefix without digits fails outright
    #[case("_1", 0)]
    #[case("x", 0)]
    #[case(".", 0)]
    fn test_number_forms(#[case] source: &str, #[case] expected: usize) {
        assert_eq!(measure(&full_number(), source), expected);
    }

    #[test]
    fn test_number_trailing_separator_not_consumed() {
        assert_eq!(measure(&full_number(), "12_ x"), 2);
    }

    #[test]
    fn test_number_leading_dot_requires_float() {
        let int_only = Matcher::number(NumberSyntax::default());
        assert_eq!(measure(&int_only, ".5"), 0);
        assert_eq!(measure(&int_only, "1.5"), 1);
    }

    #[test]
    fn test_sequence_is_all_or_nothing() {
        let matcher = Matcher::sequence([
            Matcher::exact("@"),
            Matcher::chars_then(CharClass::Letter, CharClass::Alphanumeric),
        ]);
        assert_eq!(measure(&matcher, "@route x"), 6);
        assert_eq!(measure(&matcher, "@ route"), 0);
        assert_eq!(measure(&matcher, "route"), 0);
    }

    #[test]
    fn test_sequence_does_not_advance_the_reader() {
        let compiled = compile(
            &Matcher::sequence([Matcher::exact("a"), Matcher::exact("b")]),
            &HashMap::new(),
        )
        .unwrap();
        let reader = CharReader::new("ab");
        assert_eq!(compiled.measure(&reader), 2);
        assert_eq!(reader.position().offset, 0);
    }

    #[test]
    fn test_regex_is_anchored() {
        let matcher = Matcher::regex("[0-9]+px");
        assert_eq!(measure(&matcher, "12px;"), 4);
        assert_eq!(measure(&matcher, "x 12px"), 0);
    }

    #[test]
    fn test_invalid_regex_is_a_compile_error() {
        let result = compile(&Matcher::regex("("), &HashMap::new());
        assert!(matches!(result, Err(CompileError::InvalidRegex { .. })));
    }

    #[test]
    fn test_empty_literal_lists_are_compile_errors() {
        assert!(compile(&Matcher::Exact(vec![]), &HashMap::new()).is_err());
        assert!(compile(&Matcher::Keywords(vec![]), &HashMap::new()).is_err());
        assert!(compile(&Matcher::Sequence(vec![]), &HashMap::new()).is_err());
    }

    #[test]
    fn test_measure_counts_chars_not_bytes() {
        let matcher = Matcher::delimited("\"", "\"");
        // "héllo" is 5 chars / 6 bytes between the quotes.
        assert_eq!(measure(&matcher, "\"héllo\""), 7);
    }
}
