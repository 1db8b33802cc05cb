//! Command-line interface for codescope
//! Tokenizes a source file or extracts its structural symbols, printing a
//! single JSON object either way.
//!
//! Usage:
//!   codescope <source-file> <token|symbols> [--language <name-or-extension>]
//!
//! The language defaults to the source file's extension (lowercased,
//! including the dot). Successful runs print `{ok: true, ...}` on stdout and
//! exit 0; failures print `{ok: false, error: {code, message}}` on stderr
//! and exit 1 with a stable error code.

use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, Command};
use codescope_profiles::shared_engine;
use serde_json::{json, Value};

const CODE_INVALID_ARGS: &str = "INVALID_ARGS";
const CODE_INVALID_EXTRACT: &str = "INVALID_EXTRACT";
const CODE_LANGUAGE_REQUIRED: &str = "LANGUAGE_REQUIRED";
const CODE_UNKNOWN_LANGUAGE: &str = "UNKNOWN_LANGUAGE";
const CODE_EXECUTION_ERROR: &str = "EXECUTION_ERROR";

fn cli() -> Command {
    Command::new("codescope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize source files and extract their structural symbols")
        .disable_help_flag(true)
        .arg(
            Arg::new("source-file")
                .help("Path to the source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("extract")
                .help("What to extract: 'token' or 'symbols'")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Language name or extension (defaults to the file extension)"),
        )
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // No arguments or an explicit help flag: usage text, success.
    if args.len() <= 1 || args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", cli().render_help());
        return ExitCode::SUCCESS;
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("codescope {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(output) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).expect("output serializes")
            );
            ExitCode::SUCCESS
        }
        Err((code, message)) => {
            let error = json!({"ok": false, "error": {"code": code, "message": message}});
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).expect("error serializes")
            );
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<Value, (&'static str, String)> {
    let matches = cli()
        .try_get_matches_from(args)
        .map_err(|err| (CODE_INVALID_ARGS, err.to_string()))?;

    let source_file = matches
        .get_one::<String>("source-file")
        .expect("source-file is required")
        .clone();
    let extract = matches
        .get_one::<String>("extract")
        .expect("extract is required")
        .clone();

    if extract != "token" && extract != "symbols" {
        return Err((
            CODE_INVALID_EXTRACT,
            format!("expected 'token' or 'symbols', got '{}'", extract),
        ));
    }

    let language = match matches.get_one::<String>("language") {
        Some(language) => language.clone(),
        None => extension_of(&source_file).ok_or((
            CODE_LANGUAGE_REQUIRED,
            format!(
                "'{}' has no extension; pass --language <name-or-extension>",
                source_file
            ),
        ))?,
    };

    let source = std::fs::read_to_string(&source_file)
        .map_err(|err| (CODE_EXECUTION_ERROR, format!("{}: {}", source_file, err)))?;

    let engine = shared_engine();
    if engine.lookup(&language).is_none() {
        return Err((
            CODE_UNKNOWN_LANGUAGE,
            format!(
                "unknown language '{}'; registered languages: {}",
                language,
                engine.list_names().join(", ")
            ),
        ));
    }

    let (count, result) = match extract.as_str() {
        "token" => {
            let tokens = engine
                .tokenize(&source, &language)
                .map_err(|err| (CODE_EXECUTION_ERROR, err.to_string()))?;
            (
                tokens.len(),
                serde_json::to_value(&tokens).expect("tokens serialize"),
            )
        }
        _ => {
            let symbols = engine
                .extract_symbols(&source, &language)
                .map_err(|err| (CODE_EXECUTION_ERROR, err.to_string()))?;
            (
                symbols.len(),
                serde_json::to_value(&symbols).expect("symbols serialize"),
            )
        }
    };

    Ok(json!({
        "ok": true,
        "extract": extract,
        "sourceFile": source_file,
        "language": language,
        "count": count,
        "result": result,
    }))
}

/// The file's extension, lowercased and including the dot.
fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}
