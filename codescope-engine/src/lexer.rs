//! Lexer
//!
//! Compiling a profile validates it (states, transition targets, character
//! classes, regexes) and turns every rule's matcher into a scan function.
//! Tokenization then drives the reader through the current state's ordered
//! rules: the first rule whose scan returns a non-zero count wins, its token
//! is emitted and its transition applied. When no rule matches, exactly one
//! character is consumed as an `error` token, which guarantees forward
//! progress on any input.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CompileError;
use crate::location::Range;
use crate::matcher::{self, CompiledMatcher};
use crate::profile::{Profile, Transition};
use crate::reader::CharReader;
use crate::state::StateStack;
use crate::token::{Token, ERROR_CATEGORY, ERROR_TOKEN_TYPE, PLAIN_CATEGORY};

struct CompiledRule {
    matcher: CompiledMatcher,
    token: String,
    transition: Transition,
}

/// A profile compiled into scan functions, immutable and shareable.
pub struct CompiledLexer {
    profile: Arc<Profile>,
    states: HashMap<String, Vec<CompiledRule>>,
}

impl CompiledLexer {
    /// Compile `profile`, validating every state reference, class reference
    /// and matcher specification up front so tokenization cannot fail.
    pub fn compile(profile: Arc<Profile>) -> Result<Self, CompileError> {
        if !profile.states.contains_key(&profile.initial_state) {
            return Err(CompileError::UnknownState(profile.initial_state.clone()));
        }

        let mut states = HashMap::new();
        for (name, rules) in &profile.states {
            let mut compiled_rules = Vec::with_capacity(rules.len());
            for rule in rules {
                match &rule.transition {
                    Transition::Push(target) | Transition::SwitchTo(target) => {
                        if !profile.states.contains_key(target) {
                            return Err(CompileError::UnknownState(target.clone()));
                        }
                    }
                    Transition::None | Transition::Pop => {}
                }
                compiled_rules.push(CompiledRule {
                    matcher: matcher::compile(&rule.matcher, &profile.classes)?,
                    token: rule.token.clone(),
                    transition: rule.transition.clone(),
                });
            }
            states.insert(name.clone(), compiled_rules);
        }

        Ok(Self { profile, states })
    }

    /// The profile this lexer was compiled from.
    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    /// Tokenize `source` into a gap-free, non-overlapping token stream.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut reader = CharReader::new(source);
        let mut stack = StateStack::new(self.profile.initial_state.clone());
        let mut tokens = Vec::new();

        while !reader.is_eof() {
            // Every name on the stack was validated during compilation.
            let rules = self
                .states
                .get(stack.current())
                .expect("state names are validated at compile time");

            let matched = rules
                .iter()
                .find_map(|rule| match rule.matcher.measure(&reader) {
                    0 => None,
                    count => Some((rule, count)),
                });

            let start = reader.position();
            match matched {
                Some((rule, count)) => {
                    let value = reader.advance_by(count);
                    tokens.push(Token {
                        token_type: rule.token.clone(),
                        value: value.to_string(),
                        category: self.category_of(&rule.token),
                        range: Range::new(start, reader.position()),
                    });
                    stack.apply(&rule.transition);
                }
                None => {
                    let value = reader.advance_by(1);
                    tokens.push(Token {
                        token_type: ERROR_TOKEN_TYPE.to_string(),
                        value: value.to_string(),
                        category: ERROR_CATEGORY.to_string(),
                        range: Range::new(start, reader.position()),
                    });
                }
            }
        }
        tokens
    }

    fn category_of(&self, token_type: &str) -> String {
        self.profile
            .token_types
            .get(token_type)
            .cloned()
            .unwrap_or_else(|| PLAIN_CATEGORY.to_string())
    }
}
