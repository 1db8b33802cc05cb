//! Language profiles
//!
//! A profile is the complete declarative description of one language: the
//! character-class table, the token-type table, the named lexer states with
//! their ordered rules, the block pairs and the symbol patterns. Profiles
//! are data; the engine interprets them at runtime and never contains
//! language-specific scanning code.
//!
//! Profiles are immutable once registered. The engine compiles each profile
//! once and caches the compiled form keyed by profile identity.

use std::collections::HashMap;

use crate::blocks::BlockRule;
use crate::charclass::CharClass;
use crate::matcher::Matcher;
use crate::symbols::SymbolRule;

/// State transition attached to a lexer rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    None,
    Push(String),
    Pop,
    SwitchTo(String),
}

/// One lexer rule: a matcher, the token type it emits, and an optional
/// state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerRule {
    pub matcher: Matcher,
    pub token: String,
    pub transition: Transition,
}

impl LexerRule {
    pub fn emit(matcher: Matcher, token: impl Into<String>) -> Self {
        Self {
            matcher,
            token: token.into(),
            transition: Transition::None,
        }
    }

    /// Push a state after emitting.
    pub fn pushing(mut self, state: impl Into<String>) -> Self {
        self.transition = Transition::Push(state.into());
        self
    }

    /// Pop the state stack after emitting.
    pub fn popping(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// Replace the top state after emitting.
    pub fn switching(mut self, state: impl Into<String>) -> Self {
        self.transition = Transition::SwitchTo(state.into());
        self
    }
}

/// Indentation description carried by some profiles.
///
/// Accepted and stored for profile compatibility; the core does not
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationConfig {
    /// The indentation unit, e.g. four spaces or one tab.
    pub unit: String,
}

/// An embedded-language annotation carried by some profiles.
///
/// Accepted and stored for profile compatibility; the core does not
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedLanguage {
    /// The lexer state whose content belongs to another language.
    pub state: String,
    /// The registry name of that language.
    pub language: String,
}

/// The complete declarative description of one language.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Registry name, e.g. `javascript`.
    pub name: String,
    /// File extensions including the dot, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Named character classes referenced by matchers.
    pub classes: HashMap<String, CharClass>,
    /// Token type to highlighting category. Types missing here fall back to
    /// the reserved `plain` category.
    pub token_types: HashMap<String, String>,
    /// Named states, each an ordered rule list; first match wins.
    pub states: HashMap<String, Vec<LexerRule>>,
    /// Name of the state the lexer starts in.
    pub initial_state: String,
    /// Token types hidden from the structure parser.
    pub skip_types: Vec<String>,
    /// Optional indentation description (stored, not interpreted).
    pub indentation: Option<IndentationConfig>,
    /// Bracket pairs for the block tracker.
    pub blocks: Vec<BlockRule>,
    /// Symbol rules for the structure parser, tried in order.
    pub symbols: Vec<SymbolRule>,
    /// Parent profile name (stored, not interpreted by the core).
    pub inherits: Option<String>,
    /// Embedded-language annotations (stored, not interpreted by the core).
    pub embedded: Vec<EmbeddedLanguage>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_state: "root".to_string(),
            ..Self::default()
        }
    }
}
