//! Block tracker
//!
//! Matches bracket pairs over a token stream by token *value*, producing
//! spans with nesting depth. The tracker is deliberately tolerant: a close
//! with no matching open is dropped, an open with no close produces no span,
//! and a close that skips over unmatched opens discards them. Downstream
//! consumers must not rely on balanced bracketing.

use serde::Serialize;

use crate::token::Token;

/// A named bracket pair, e.g. `braces` for `{` / `}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    pub name: String,
    pub open: String,
    pub close: String,
}

impl BlockRule {
    pub fn new(name: impl Into<String>, open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: open.into(),
            close: close.into(),
        }
    }
}

/// A matched pair of open and close tokens.
///
/// Indices point into the token stream the tracker walked; `depth` counts
/// enclosing frames that were live when the open was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSpan {
    pub name: String,
    pub open_index: usize,
    pub close_index: usize,
    pub depth: usize,
}

struct OpenFrame<'a> {
    rule: &'a BlockRule,
    open_index: usize,
    depth: usize,
}

/// Match bracket pairs over `tokens`, returning spans sorted by open index.
pub fn track_blocks(tokens: &[Token], rules: &[BlockRule]) -> Vec<BlockSpan> {
    let mut stack: Vec<OpenFrame<'_>> = Vec::new();
    let mut spans = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        // Dispatch on the token's value, not its type; profiles are free to
        // type brackets however they like.
        if let Some(rule) = rules.iter().find(|r| r.open == token.value) {
            stack.push(OpenFrame {
                rule,
                open_index: index,
                depth: stack.len(),
            });
            continue;
        }
        if rules.iter().any(|r| r.close == token.value) {
            // Nearest frame whose rule closes with this literal; anything
            // above it was left unmatched and is discarded.
            let found = stack
                .iter()
                .rposition(|frame| frame.rule.close == token.value);
            if let Some(at) = found {
                let frame = &stack[at];
                spans.push(BlockSpan {
                    name: frame.rule.name.clone(),
                    open_index: frame.open_index,
                    close_index: index,
                    depth: frame.depth,
                });
                stack.truncate(at);
            }
            // No matching open: drop the close silently.
        }
    }

    spans.sort_by_key(|span| span.open_index);
    spans
}
