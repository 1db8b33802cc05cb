//! Tokens
//!
//! The lexer's output unit. Tokens cover the source without gaps and without
//! overlap; concatenating all token values reproduces the input byte for
//! byte. When no rule matches, a one-character token of the reserved type
//! `error` keeps the stream well-formed.

use serde::Serialize;
use std::fmt;

use crate::location::Range;

/// Reserved token type emitted when no lexer rule matches.
pub const ERROR_TOKEN_TYPE: &str = "error";

/// Reserved category for `error` tokens.
pub const ERROR_CATEGORY: &str = "error";

/// Reserved category substituted for token types missing from the profile's
/// token-type table.
pub const PLAIN_CATEGORY: &str = "plain";

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The emitting rule's token type, from the profile.
    #[serde(rename = "type")]
    pub token_type: String,
    /// The exact source slice the token covers.
    pub value: String,
    /// Highlighting tag looked up from the profile's token-type table.
    pub category: String,
    pub range: Range,
}

impl Token {
    pub fn is_error(&self) -> bool {
        self.token_type == ERROR_TOKEN_TYPE
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.token_type, self.value, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Position;

    #[test]
    fn test_serializes_type_field_name() {
        let token = Token {
            token_type: "keyword".to_string(),
            value: "fn".to_string(),
            category: "keyword".to_string(),
            range: Range::new(Position::new(1, 0, 0), Position::new(1, 2, 2)),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["type"], "keyword");
        assert_eq!(json["value"], "fn");
        assert_eq!(json["range"]["start"]["line"], 1);
    }

    #[test]
    fn test_is_error() {
        let token = Token {
            token_type: ERROR_TOKEN_TYPE.to_string(),
            value: "~".to_string(),
            category: ERROR_CATEGORY.to_string(),
            range: Range::new(Position::origin(), Position::new(1, 1, 1)),
        };
        assert!(token.is_error());
    }
}
