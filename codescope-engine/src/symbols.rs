//! Symbol detector
//!
//! Runs declarative token patterns over the lexer's output and emits
//! structural symbols (functions, classes, headings, keys ...) with name and
//! content ranges. Patterns see a compressed view of the stream with the
//! profile's skip types (typically whitespace, newlines and comments)
//! removed; content measurement walks the original stream so it can see
//! newlines and columns.
//!
//! A pattern miss is not an error; the rule simply yields no symbol at that
//! position. Matched positions are claimed so later rules cannot reuse them.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::blocks::{track_blocks, BlockSpan};
use crate::location::Range;
use crate::profile::Profile;
use crate::token::Token;

/// Default bound on how far a skip step may scan.
pub const DEFAULT_SKIP_LIMIT: usize = 50;

/// One step of a symbol rule's token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternStep {
    /// Match one token by type, optionally by exact value, optionally
    /// recording it under a capture name.
    Match {
        token: String,
        value: Option<String>,
        capture: Option<String>,
    },
    /// Scan forward (bounded) until the next pattern step matches; the
    /// matched sentinel is consumed as part of the skip.
    Skip { max_tokens: usize },
    /// Attempt one step; failure leaves the position unchanged.
    Optional(Box<PatternStep>),
    /// First matching alternative wins.
    AnyOf(Vec<PatternStep>),
}

impl PatternStep {
    pub fn token(token_type: impl Into<String>) -> Self {
        PatternStep::Match {
            token: token_type.into(),
            value: None,
            capture: None,
        }
    }

    pub fn literal(token_type: impl Into<String>, value: impl Into<String>) -> Self {
        PatternStep::Match {
            token: token_type.into(),
            value: Some(value.into()),
            capture: None,
        }
    }

    pub fn capture(token_type: impl Into<String>, name: impl Into<String>) -> Self {
        PatternStep::Match {
            token: token_type.into(),
            value: None,
            capture: Some(name.into()),
        }
    }

    pub fn skip() -> Self {
        PatternStep::Skip {
            max_tokens: DEFAULT_SKIP_LIMIT,
        }
    }

    pub fn skip_up_to(max_tokens: usize) -> Self {
        PatternStep::Skip { max_tokens }
    }

    pub fn optional(step: PatternStep) -> Self {
        PatternStep::Optional(Box::new(step))
    }

    pub fn any_of<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = PatternStep>,
    {
        PatternStep::AnyOf(steps.into_iter().collect())
    }
}

/// How a symbol's content extent is measured past the pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// The next `braces` block span closes the content.
    Braces,
    /// Content runs while token columns stay right of the match's column.
    Indentation,
    /// Content runs to the next blank line.
    MarkupBlock,
    /// Content runs to a matching end keyword at bracket depth zero.
    EndKeyword,
}

/// A declarative symbol rule.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRule {
    /// Fallback symbol name when the pattern captures no `name`.
    pub name: String,
    /// Symbol kind reported as-is, e.g. `function`, `class`, `heading`.
    pub kind: String,
    pub pattern: Vec<PatternStep>,
    pub has_body: bool,
    pub body_style: BodyStyle,
    /// Closing keyword for [`BodyStyle::EndKeyword`].
    pub end_keyword: Option<String>,
    /// Stored for profile compatibility; not interpreted by the core.
    pub nested: bool,
}

impl SymbolRule {
    /// A bodyless rule: content runs to the next statement boundary.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        pattern: Vec<PatternStep>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            pattern,
            has_body: false,
            body_style: BodyStyle::Braces,
            end_keyword: None,
            nested: false,
        }
    }

    pub fn with_body(mut self, style: BodyStyle) -> Self {
        self.has_body = true;
        self.body_style = style;
        self
    }

    pub fn with_end_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.has_body = true;
        self.body_style = BodyStyle::EndKeyword;
        self.end_keyword = Some(keyword.into());
        self
    }
}

/// A detected structural symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSymbol {
    pub name: String,
    pub kind: String,
    pub name_range: Range,
    pub content_range: Range,
}

/// Run every symbol rule of `profile` over `tokens`.
pub fn detect_symbols(tokens: &[Token], profile: &Profile) -> Vec<CodeSymbol> {
    let skip: HashSet<&str> = profile.skip_types.iter().map(String::as_str).collect();
    let compressed: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !skip.contains(token.token_type.as_str()))
        .map(|(index, _)| index)
        .collect();
    let spans = track_blocks(tokens, &profile.blocks);

    let mut claimed = vec![false; compressed.len()];
    let mut symbols = Vec::new();

    for rule in &profile.symbols {
        let mut position = 0;
        while position < compressed.len() {
            if claimed[position] {
                position += 1;
                continue;
            }
            match try_match(&rule.pattern, tokens, &compressed, position) {
                Some(matched) => {
                    for index in matched.first..=matched.last {
                        claimed[index] = true;
                    }
                    symbols.push(build_symbol(rule, &matched, tokens, &compressed, &spans));
                    position = matched.last + 1;
                }
                None => position += 1,
            }
        }
    }

    symbols.sort_by_key(|symbol| {
        (
            symbol.content_range.start.line,
            symbol.content_range.start.column,
        )
    });
    symbols
}

struct PatternMatch {
    /// First and last matched compressed indices, inclusive.
    first: usize,
    last: usize,
    /// Capture name to compressed index.
    captures: HashMap<String, usize>,
}

enum StepOutcome {
    Advance,
    Stay,
    Fail,
}

fn try_match(
    pattern: &[PatternStep],
    tokens: &[Token],
    compressed: &[usize],
    start: usize,
) -> Option<PatternMatch> {
    let mut position = start;
    let mut captures = HashMap::new();
    let mut step_index = 0;

    while step_index < pattern.len() {
        match &pattern[step_index] {
            PatternStep::Skip { max_tokens } => {
                // The step after the skip is the sentinel; the skip consumes
                // it along with everything scanned over.
                let sentinel = pattern.get(step_index + 1)?;
                let limit = position.saturating_add(*max_tokens).min(compressed.len());
                let mut found = None;
                for candidate in position..limit {
                    if matches!(
                        match_step(sentinel, tokens, compressed, candidate, &mut captures),
                        StepOutcome::Advance
                    ) {
                        found = Some(candidate);
                        break;
                    }
                }
                position = found? + 1;
                step_index += 2;
            }
            step => match match_step(step, tokens, compressed, position, &mut captures) {
                StepOutcome::Advance => {
                    position += 1;
                    step_index += 1;
                }
                StepOutcome::Stay => step_index += 1,
                StepOutcome::Fail => return None,
            },
        }
    }

    if position == start {
        // A pattern of nothing but failed optionals claims no tokens.
        return None;
    }
    Some(PatternMatch {
        first: start,
        last: position - 1,
        captures,
    })
}

fn match_step(
    step: &PatternStep,
    tokens: &[Token],
    compressed: &[usize],
    position: usize,
    captures: &mut HashMap<String, usize>,
) -> StepOutcome {
    match step {
        PatternStep::Match {
            token,
            value,
            capture,
        } => {
            let Some(&original) = compressed.get(position) else {
                return StepOutcome::Fail;
            };
            let candidate = &tokens[original];
            if candidate.token_type != *token {
                return StepOutcome::Fail;
            }
            if let Some(expected) = value {
                if candidate.value != *expected {
                    return StepOutcome::Fail;
                }
            }
            if let Some(name) = capture {
                captures.insert(name.clone(), position);
            }
            StepOutcome::Advance
        }
        PatternStep::Optional(inner) => {
            match match_step(inner, tokens, compressed, position, captures) {
                StepOutcome::Advance => StepOutcome::Advance,
                _ => StepOutcome::Stay,
            }
        }
        PatternStep::AnyOf(alternatives) => {
            for alternative in alternatives {
                match match_step(alternative, tokens, compressed, position, captures) {
                    StepOutcome::Fail => continue,
                    outcome => return outcome,
                }
            }
            StepOutcome::Fail
        }
        // Skips only make sense between top-level steps.
        PatternStep::Skip { .. } => StepOutcome::Fail,
    }
}

fn build_symbol(
    rule: &SymbolRule,
    matched: &PatternMatch,
    tokens: &[Token],
    compressed: &[usize],
    spans: &[BlockSpan],
) -> CodeSymbol {
    let start_original = compressed[matched.first];
    let last_original = compressed[matched.last];

    let content_end = if rule.has_body {
        match rule.body_style {
            BodyStyle::Braces => braces_end(last_original, spans),
            BodyStyle::Indentation => {
                let base_column = tokens[start_original].range.start.column;
                indentation_end(tokens, last_original, base_column)
            }
            BodyStyle::MarkupBlock => markup_block_end(tokens, last_original),
            BodyStyle::EndKeyword => {
                end_keyword_end(tokens, last_original, rule.end_keyword.as_deref())
            }
        }
    } else {
        statement_end(tokens, last_original)
    };

    let (name, name_range) = match matched.captures.get("name") {
        Some(&capture_position) => {
            let token = &tokens[compressed[capture_position]];
            (token.value.clone(), token.range)
        }
        None => (rule.name.clone(), tokens[start_original].range),
    };

    CodeSymbol {
        name,
        kind: rule.kind.clone(),
        name_range,
        content_range: Range::new(
            tokens[start_original].range.start,
            tokens[content_end].range.end,
        ),
    }
}

/// Content closes with the first `braces` block opening at or after the
/// match; without one the match itself is the content.
fn braces_end(last_match: usize, spans: &[BlockSpan]) -> usize {
    spans
        .iter()
        .find(|span| span.name == "braces" && span.open_index >= last_match)
        .map(|span| span.close_index)
        .unwrap_or(last_match)
}

/// Content runs while non-skipped tokens sit right of `base_column`.
fn indentation_end(tokens: &[Token], last_match: usize, base_column: usize) -> usize {
    let mut content_end = last_match;
    for (index, token) in tokens.iter().enumerate().skip(last_match + 1) {
        if is_whitespace_token(token) || is_newline_token(token) {
            continue;
        }
        if token.range.start.column <= base_column {
            break;
        }
        content_end = index;
    }
    content_end
}

/// Content runs to the first blank line (a newline immediately followed by
/// another newline).
fn markup_block_end(tokens: &[Token], last_match: usize) -> usize {
    let mut content_end = last_match;
    for index in (last_match + 1)..tokens.len() {
        let token = &tokens[index];
        if is_newline_token(token)
            && tokens.get(index + 1).is_some_and(is_newline_token)
        {
            break;
        }
        if !is_newline_token(token) && !is_whitespace_token(token) {
            content_end = index;
        }
    }
    content_end
}

/// Content runs to the next `keyword` token equal to `end_keyword` at
/// bracket depth zero.
fn end_keyword_end(tokens: &[Token], last_match: usize, end_keyword: Option<&str>) -> usize {
    let Some(keyword) = end_keyword else {
        return last_match;
    };
    let mut depth: usize = 0;
    for (index, token) in tokens.iter().enumerate().skip(last_match + 1) {
        match token.value.as_str() {
            "{" | "(" | "[" => depth += 1,
            "}" | ")" | "]" => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && token.token_type == "keyword" && token.value == keyword {
            return index;
        }
    }
    last_match
}

/// Bodyless symbols end at the next statement boundary: a `;` at bracket
/// depth zero, or the last non-whitespace token before a newline at depth
/// zero.
fn statement_end(tokens: &[Token], last_match: usize) -> usize {
    let mut depth: usize = 0;
    let mut last_solid = last_match;
    for (index, token) in tokens.iter().enumerate().skip(last_match + 1) {
        match token.value.as_str() {
            "{" | "(" | "[" => depth += 1,
            "}" | ")" | "]" => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 {
            if token.value == ";" {
                return index;
            }
            if is_newline_token(token) {
                return last_solid;
            }
        }
        if !is_whitespace_token(token) && !is_newline_token(token) {
            last_solid = index;
        }
    }
    last_solid
}

fn is_newline_token(token: &Token) -> bool {
    token.token_type == "newline"
        || matches!(token.value.as_str(), "\n" | "\r" | "\r\n")
}

fn is_whitespace_token(token: &Token) -> bool {
    token.token_type == "whitespace"
        || (!token.value.is_empty()
            && token.value.chars().all(|ch| ch == ' ' || ch == '\t'))
}
