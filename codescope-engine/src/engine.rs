//! Engine façade
//!
//! Resolves a language identifier through the registry, compiles (and
//! caches) the profile's lexer, and exposes the two entry points:
//! [`Engine::tokenize`] and [`Engine::extract_symbols`].
//!
//! The compiled-lexer cache is keyed by profile identity, never by deep
//! equality: registered profiles are immutable, so the pointer is the
//! identity. Entries live for the process; eviction is unnecessary.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::EngineError;
use crate::lexer::CompiledLexer;
use crate::profile::Profile;
use crate::registry::ProfileRegistry;
use crate::symbols::{detect_symbols, CodeSymbol};
use crate::token::Token;

/// The top-level engine: a profile registry plus a compile cache.
///
/// An `Engine` is safe to share across threads; registration serializes
/// writers behind an `RwLock` and readers never observe a partially
/// installed profile.
#[derive(Default)]
pub struct Engine {
    registry: RwLock<ProfileRegistry>,
    lexers: RwLock<HashMap<usize, Arc<CompiledLexer>>>,
}

impl Engine {
    /// Create an engine with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile, replacing any prior profile of the same name.
    pub fn register(&self, profile: Profile) {
        self.registry
            .write()
            .expect("registry lock poisoned")
            .register(profile);
    }

    /// Resolve a language name or extension to its profile.
    pub fn lookup(&self, name_or_extension: &str) -> Option<Arc<Profile>> {
        self.registry
            .read()
            .expect("registry lock poisoned")
            .lookup(name_or_extension)
    }

    /// All registered profile names (sorted).
    pub fn list_names(&self) -> Vec<String> {
        self.registry
            .read()
            .expect("registry lock poisoned")
            .list_names()
    }

    /// All registered extensions (sorted, lowercased).
    pub fn list_extensions(&self) -> Vec<String> {
        self.registry
            .read()
            .expect("registry lock poisoned")
            .list_extensions()
    }

    /// Tokenize `source` as the language behind `name_or_extension`.
    pub fn tokenize(
        &self,
        source: &str,
        name_or_extension: &str,
    ) -> Result<Vec<Token>, EngineError> {
        let lexer = self.lexer_for(name_or_extension)?;
        Ok(lexer.tokenize(source))
    }

    /// Extract structural symbols from `source` as the language behind
    /// `name_or_extension`.
    pub fn extract_symbols(
        &self,
        source: &str,
        name_or_extension: &str,
    ) -> Result<Vec<CodeSymbol>, EngineError> {
        let lexer = self.lexer_for(name_or_extension)?;
        let tokens = lexer.tokenize(source);
        Ok(detect_symbols(&tokens, lexer.profile()))
    }

    /// Resolve and compile (or fetch the cached lexer for) a language.
    pub fn lexer_for(&self, name_or_extension: &str) -> Result<Arc<CompiledLexer>, EngineError> {
        let profile =
            self.lookup(name_or_extension)
                .ok_or_else(|| EngineError::UnknownLanguage {
                    query: name_or_extension.to_string(),
                    registered: self.list_names(),
                })?;

        let key = Arc::as_ptr(&profile) as usize;
        if let Some(cached) = self
            .lexers
            .read()
            .expect("lexer cache lock poisoned")
            .get(&key)
        {
            return Ok(Arc::clone(cached));
        }

        let compiled = Arc::new(CompiledLexer::compile(profile)?);
        self.lexers
            .write()
            .expect("lexer cache lock poisoned")
            .insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::CharClass;
    use crate::matcher::Matcher;
    use crate::profile::LexerRule;

    fn toy_profile() -> Profile {
        let mut profile = Profile::new("toy");
        profile.extensions = vec![".toy".to_string()];
        profile.token_types.insert("word".into(), "identifier".into());
        profile.states.insert(
            "root".to_string(),
            vec![
                LexerRule::emit(
                    Matcher::chars_then(CharClass::Letter, CharClass::Letter),
                    "word",
                ),
                LexerRule::emit(
                    Matcher::chars_then(CharClass::Whitespace, CharClass::Whitespace),
                    "whitespace",
                ),
            ],
        );
        profile
    }

    #[test]
    fn test_unknown_language_error() {
        let engine = Engine::new();
        engine.register(toy_profile());
        let err = engine.tokenize("x", "cobol").unwrap_err();
        match err {
            EngineError::UnknownLanguage { query, registered } => {
                assert_eq!(query, "cobol");
                assert_eq!(registered, vec!["toy"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_by_name_and_extension() {
        let engine = Engine::new();
        engine.register(toy_profile());
        let by_name = engine.tokenize("hello there", "toy").unwrap();
        let by_ext = engine.tokenize("hello there", ".TOY").unwrap();
        assert_eq!(by_name, by_ext);
        assert_eq!(by_name.len(), 3);
    }

    #[test]
    fn test_compiled_lexer_is_cached_per_profile() {
        let engine = Engine::new();
        engine.register(toy_profile());
        let first = engine.lexer_for("toy").unwrap();
        let second = engine.lexer_for(".toy").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_reregistration_compiles_fresh_lexer() {
        let engine = Engine::new();
        engine.register(toy_profile());
        let first = engine.lexer_for("toy").unwrap();
        engine.register(toy_profile());
        let second = engine.lexer_for("toy").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_empty_source() {
        let engine = Engine::new();
        engine.register(toy_profile());
        assert!(engine.tokenize("", "toy").unwrap().is_empty());
        assert!(engine.extract_symbols("", "toy").unwrap().is_empty());
    }
}
