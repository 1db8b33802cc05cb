//! Cross-language invariants
//!
//! Properties that must hold for every registered language and any input:
//! token coverage, adjacency of ranges, termination, empty-input behavior,
//! and name containment for symbols.

use codescope_profiles::shared_engine;
use proptest::prelude::*;
use rstest::rstest;

const LANGUAGES: &[&str] = &["javascript", "python", "markdown", "toml", "json", "rust"];

#[rstest]
#[case("javascript")]
#[case("python")]
#[case("markdown")]
#[case("toml")]
#[case("json")]
#[case("rust")]
fn empty_input_yields_empty_output(#[case] language: &str) {
    let engine = shared_engine();
    assert!(engine.tokenize("", language).unwrap().is_empty());
    assert!(engine.extract_symbols("", language).unwrap().is_empty());
}

/// Free-form source text: printable ASCII, newlines, the odd control and
/// non-ASCII character. Nothing here is required to be valid in any
/// language; the engine must still cover it with tokens.
fn arbitrary_source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[ -~]{0,12}",              // printable ASCII runs
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\t".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("`".to_string()),
            Just("#".to_string()),
            Just("λ→é".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_cover_any_source_for_every_language(source in arbitrary_source()) {
        let engine = shared_engine();
        for language in LANGUAGES {
            let tokens = engine.tokenize(&source, language).unwrap();
            let rebuilt: String = tokens.iter().map(|t| t.value.as_str()).collect();
            prop_assert_eq!(&rebuilt, &source, "coverage broke for {}", language);
        }
    }

    #[test]
    fn token_ranges_are_monotone(source in arbitrary_source()) {
        let engine = shared_engine();
        for language in LANGUAGES {
            let tokens = engine.tokenize(&source, language).unwrap();
            for token in &tokens {
                prop_assert!(token.range.end.offset >= token.range.start.offset);
            }
            for pair in tokens.windows(2) {
                prop_assert_eq!(pair[0].range.end.offset, pair[1].range.start.offset);
            }
        }
    }

    #[test]
    fn symbol_names_are_contained_in_content(source in arbitrary_source()) {
        let engine = shared_engine();
        for language in LANGUAGES {
            for symbol in engine.extract_symbols(&source, language).unwrap() {
                prop_assert!(
                    symbol.content_range.contains(&symbol.name_range),
                    "{}: {:?} outside {:?}",
                    language,
                    symbol.name_range,
                    symbol.content_range
                );
            }
        }
    }

    #[test]
    fn lines_start_at_one_and_only_grow(source in arbitrary_source()) {
        let engine = shared_engine();
        for language in LANGUAGES {
            let tokens = engine.tokenize(&source, language).unwrap();
            let mut last_line = 1;
            for token in &tokens {
                prop_assert!(token.range.start.line >= 1);
                prop_assert!(token.range.start.line >= last_line);
                last_line = token.range.start.line;
            }
        }
    }
}

/// Whitespace invariance: wrapping a source that neither starts nor ends
/// inside a multiline construct in blank lines must not change the symbols,
/// only shift their ranges.
#[rstest]
#[case("javascript", "function greet(name) { return name; }\n")]
#[case("javascript", "class Box {}\nconst id = (x) => x;\n")]
#[case("python", "class User:\n    def run(self):\n        return True\n")]
#[case("toml", "title = \"x\"\n[section]\nport = 5432\n")]
#[case("json", "{\"a\": 1, \"b\": [true]}\n")]
#[case("rust", "fn main() {\n    let x = 1;\n}\n")]
#[case("markdown", "# Title\nprose line\n")]
fn surrounding_blank_lines_shift_but_preserve_symbols(
    #[case] language: &str,
    #[case] source: &str,
) {
    let engine = shared_engine();
    let plain = engine.extract_symbols(source, language).unwrap();
    let padded_source = format!("\n{}\n", source);
    let padded = engine.extract_symbols(&padded_source, language).unwrap();

    assert_eq!(plain.len(), padded.len(), "symbol count changed");
    for (a, b) in plain.iter().zip(padded.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.content_range.start.line + 1, b.content_range.start.line);
        assert_eq!(a.content_range.start.column, b.content_range.start.column);
    }
}
