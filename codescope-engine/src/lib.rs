//! # codescope-engine
//!
//! A data-driven source-code analysis engine. Every supported language is
//! described entirely by a declarative [`Profile`] — character classes,
//! matcher specifications, lexer states and token patterns — which the
//! engine interprets at runtime. No language-specific scanning code exists
//! anywhere in this crate; adding a language means adding data.
//!
//! Data flow:
//!
//! ```text
//! source text -> character reader -> lexer -> tokens -> block tracker
//!                                                    -> symbol detector -> symbols
//! ```
//!
//! The two entry points are [`Engine::tokenize`] and
//! [`Engine::extract_symbols`]. Profiles live in a [`ProfileRegistry`]
//! reachable by language name or file extension; compiled lexers are cached
//! per profile.
//!
//! Everything is synchronous and purely in-memory. Compiled lexers and
//! registered profiles are immutable and freely shareable across threads.

pub mod blocks;
pub mod charclass;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod location;
pub mod matcher;
pub mod profile;
pub mod reader;
pub mod registry;
mod state;
pub mod symbols;
pub mod token;

pub use blocks::{track_blocks, BlockRule, BlockSpan};
pub use charclass::CharClass;
pub use engine::Engine;
pub use error::{CompileError, EngineError};
pub use lexer::CompiledLexer;
pub use location::{Position, Range};
pub use matcher::{Matcher, NumberSyntax};
pub use profile::{EmbeddedLanguage, IndentationConfig, LexerRule, Profile, Transition};
pub use registry::ProfileRegistry;
pub use symbols::{detect_symbols, BodyStyle, CodeSymbol, PatternStep, SymbolRule};
pub use token::{Token, ERROR_CATEGORY, ERROR_TOKEN_TYPE, PLAIN_CATEGORY};
