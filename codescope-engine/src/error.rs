//! Engine error types
//!
//! Configuration problems (unknown states, unresolved character classes,
//! malformed matcher specifications) are fatal and surface when a profile is
//! compiled; no partial token output is produced for them. Unmatched input is
//! *not* an error: the lexer emits `error` tokens and keeps going.

use std::fmt;

/// A fatal problem in a profile, found while compiling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The initial state or a transition target does not exist.
    UnknownState(String),
    /// A named character class is missing from the profile's class table.
    UnknownCharClass(String),
    /// Named character classes refer back to themselves.
    CharClassCycle(String),
    /// A matcher specification that can never match anything.
    EmptyMatcher(&'static str),
    /// The regex escape hatch received an invalid pattern.
    InvalidRegex { pattern: String, message: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnknownState(name) => {
                write!(f, "profile references unknown lexer state '{}'", name)
            }
            CompileError::UnknownCharClass(name) => {
                write!(f, "profile references unknown character class '{}'", name)
            }
            CompileError::CharClassCycle(name) => {
                write!(f, "character class '{}' refers back to itself", name)
            }
            CompileError::EmptyMatcher(kind) => {
                write!(f, "{} matcher has no literals to match", kind)
            }
            CompileError::InvalidRegex { pattern, message } => {
                write!(f, "invalid regex pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors surfaced by the engine façade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No profile is registered under the given name or extension.
    UnknownLanguage {
        query: String,
        registered: Vec<String>,
    },
    /// The resolved profile failed to compile.
    Compile(CompileError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownLanguage { query, registered } => {
                write!(
                    f,
                    "unknown language '{}'; registered languages: {}",
                    query,
                    registered.join(", ")
                )
            }
            EngineError::Compile(err) => write!(f, "profile failed to compile: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Compile(err) => Some(err),
            EngineError::UnknownLanguage { .. } => None,
        }
    }
}

impl From<CompileError> for EngineError {
    fn from(err: CompileError) -> Self {
        EngineError::Compile(err)
    }
}
