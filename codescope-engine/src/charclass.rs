//! Character-class algebra
//!
//! Profiles describe sets of characters declaratively: predefined classes,
//! explicit sets, inclusive ranges, unions, negations and named references
//! into the profile's class table. Compilation resolves every reference and
//! yields a closed predicate that the matcher compiler can evaluate per
//! character.
//!
//! Class semantics:
//!
//! - `Letter` covers ASCII `A-Z` / `a-z` plus the Latin-1 Supplement and
//!   Latin Extended blocks (`\u{00C0}`..=`\u{024F}`).
//! - `Whitespace` is space and tab only; `Newline` is `\n` or `\r`.
//! - `Alphanumeric` is `Letter` plus ASCII digits.
//! - `Negate` matches any character not in the inner class; on empty input
//!   every class, including negations and `Any`, fails to match.

use std::collections::HashMap;

use crate::error::CompileError;

/// A declarative character-class expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClass {
    Letter,
    Upper,
    Lower,
    Digit,
    HexDigit,
    Alphanumeric,
    Whitespace,
    Newline,
    Any,
    /// An explicit set of characters.
    OneOf(String),
    /// An inclusive character range.
    Range(char, char),
    Union(Vec<CharClass>),
    Negate(Box<CharClass>),
    /// A reference resolved against the profile's class table.
    Named(String),
}

impl CharClass {
    /// Union of this class and `other`.
    pub fn or(self, other: CharClass) -> CharClass {
        match self {
            CharClass::Union(mut classes) => {
                classes.push(other);
                CharClass::Union(classes)
            }
            first => CharClass::Union(vec![first, other]),
        }
    }

    /// Negation of this class.
    pub fn negated(self) -> CharClass {
        CharClass::Negate(Box::new(self))
    }
}

/// A class with every named reference resolved, ready for evaluation.
#[derive(Debug, Clone)]
pub(crate) enum CompiledClass {
    Letter,
    Upper,
    Lower,
    Digit,
    HexDigit,
    Alphanumeric,
    Whitespace,
    Newline,
    Any,
    OneOf(Vec<char>),
    Range(char, char),
    Union(Vec<CompiledClass>),
    Negate(Box<CompiledClass>),
}

impl CompiledClass {
    pub fn matches(&self, ch: char) -> bool {
        match self {
            CompiledClass::Letter => is_letter(ch),
            CompiledClass::Upper => ch.is_ascii_uppercase(),
            CompiledClass::Lower => ch.is_ascii_lowercase(),
            CompiledClass::Digit => ch.is_ascii_digit(),
            CompiledClass::HexDigit => ch.is_ascii_hexdigit(),
            CompiledClass::Alphanumeric => is_letter(ch) || ch.is_ascii_digit(),
            CompiledClass::Whitespace => ch == ' ' || ch == '\t',
            CompiledClass::Newline => ch == '\n' || ch == '\r',
            CompiledClass::Any => true,
            CompiledClass::OneOf(chars) => chars.contains(&ch),
            CompiledClass::Range(lo, hi) => (*lo..=*hi).contains(&ch),
            CompiledClass::Union(classes) => classes.iter().any(|c| c.matches(ch)),
            CompiledClass::Negate(inner) => !inner.matches(ch),
        }
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&ch)
}

/// Resolve a class expression against `table`, rejecting unknown references
/// and reference cycles.
pub(crate) fn compile(
    class: &CharClass,
    table: &HashMap<String, CharClass>,
) -> Result<CompiledClass, CompileError> {
    resolve(class, table, &mut Vec::new())
}

fn resolve(
    class: &CharClass,
    table: &HashMap<String, CharClass>,
    in_progress: &mut Vec<String>,
) -> Result<CompiledClass, CompileError> {
    Ok(match class {
        CharClass::Letter => CompiledClass::Letter,
        CharClass::Upper => CompiledClass::Upper,
        CharClass::Lower => CompiledClass::Lower,
        CharClass::Digit => CompiledClass::Digit,
        CharClass::HexDigit => CompiledClass::HexDigit,
        CharClass::Alphanumeric => CompiledClass::Alphanumeric,
        CharClass::Whitespace => CompiledClass::Whitespace,
        CharClass::Newline => CompiledClass::Newline,
        CharClass::Any => CompiledClass::Any,
        CharClass::OneOf(chars) => CompiledClass::OneOf(chars.chars().collect()),
        CharClass::Range(lo, hi) => CompiledClass::Range(*lo, *hi),
        CharClass::Union(classes) => CompiledClass::Union(
            classes
                .iter()
                .map(|c| resolve(c, table, in_progress))
                .collect::<Result<_, _>>()?,
        ),
        CharClass::Negate(inner) => {
            CompiledClass::Negate(Box::new(resolve(inner, table, in_progress)?))
        }
        CharClass::Named(name) => {
            if in_progress.iter().any(|n| n == name) {
                return Err(CompileError::CharClassCycle(name.clone()));
            }
            let referenced = table
                .get(name)
                .ok_or_else(|| CompileError::UnknownCharClass(name.clone()))?;
            in_progress.push(name.clone());
            let compiled = resolve(referenced, table, in_progress)?;
            in_progress.pop();
            compiled
        }
    })
}
