//! # codescope-profiles
//!
//! Built-in language profiles for the codescope engine. Profiles are pure
//! data: each module builds one [`Profile`] describing a language's lexer
//! states, matchers, block pairs and symbol patterns. The engine interprets
//! them at runtime; nothing here contains scanning code.
//!
//! [`register_defaults`] installs every built-in profile into an engine;
//! [`shared_engine`] exposes a process-wide engine with the defaults already
//! registered, for callers that do not need their own registry.

use codescope_engine::{Engine, Profile};
use once_cell::sync::Lazy;

pub mod javascript;
pub mod json;
pub mod markdown;
pub mod python;
pub mod rust;
pub mod toml;

mod support;

/// Register every built-in profile into `engine`.
pub fn register_defaults(engine: &Engine) {
    for profile in default_profiles() {
        engine.register(profile);
    }
}

/// All built-in profiles, freshly built.
pub fn default_profiles() -> Vec<Profile> {
    vec![
        javascript::profile(),
        python::profile(),
        markdown::profile(),
        toml::profile(),
        json::profile(),
        rust::profile(),
    ]
}

static SHARED: Lazy<Engine> = Lazy::new(|| {
    let engine = Engine::new();
    register_defaults(&engine);
    engine
});

/// A process-wide engine with the default profiles registered.
///
/// This is a convenience for front ends; code that registers its own
/// profiles should create its own [`Engine`].
pub fn shared_engine() -> &'static Engine {
    &SHARED
}
