//! End-to-end tests for the CLI's JSON contract
//!
//! Every invocation must print exactly one JSON object: the payload on
//! stdout for successes, an error object with a stable code on stderr for
//! failures.

use std::path::PathBuf;
use std::process::{Command, Output};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("codescope-cli-test-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("fixture written");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codescope"))
        .args(args)
        .output()
        .expect("binary runs")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON object")
}

fn stderr_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stderr).expect("stderr is one JSON object")
}

#[test]
fn symbols_from_a_markdown_file() {
    let path = write_fixture("section.md", "# Section One\nline one\nline two\n");
    let output = run(&[path.to_str().unwrap(), "symbols"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["ok"], true);
    assert_eq!(json["extract"], "symbols");
    assert_eq!(json["language"], ".md");
    assert_eq!(json["sourceFile"], path.to_str().unwrap());

    let result = json["result"].as_array().expect("result is an array");
    assert_eq!(json["count"], result.len());
    let heading = result
        .iter()
        .find(|symbol| symbol["kind"] == "heading")
        .expect("heading symbol present");
    assert_eq!(heading["nameRange"]["start"]["line"], 1);

    std::fs::remove_file(path).ok();
}

#[test]
fn tokens_from_a_javascript_file() {
    let path = write_fixture("app.js", "const x = 1;\n");
    let output = run(&[path.to_str().unwrap(), "token"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["ok"], true);
    assert_eq!(json["extract"], "token");
    assert_eq!(json["language"], ".js");
    let result = json["result"].as_array().unwrap();
    assert!(!result.is_empty());
    assert_eq!(result[0]["type"], "keyword");
    assert_eq!(result[0]["value"], "const");

    std::fs::remove_file(path).ok();
}

#[test]
fn explicit_language_flag_wins_over_extension() {
    let path = write_fixture("data.txt", "title = \"x\"\n");
    let output = run(&[path.to_str().unwrap(), "token", "--language", "toml"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["language"], "toml");

    std::fs::remove_file(path).ok();
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let output = run(&[]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("codescope"));
    assert!(text.contains("symbols"));
}

#[test]
fn help_flag_prints_usage_and_succeeds() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn invalid_extract_value_fails() {
    let path = write_fixture("x.js", "let a;\n");
    let output = run(&[path.to_str().unwrap(), "ast"]);
    assert!(!output.status.success());
    let json = stderr_json(&output);
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "INVALID_EXTRACT");

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_extension_without_flag_fails() {
    let path = write_fixture("noext", "let a;\n");
    let output = run(&[path.to_str().unwrap(), "token"]);
    assert!(!output.status.success());
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "LANGUAGE_REQUIRED");

    std::fs::remove_file(path).ok();
}

#[test]
fn unknown_language_fails_with_listing() {
    let path = write_fixture("prog.cbl", "DISPLAY 'HI'.\n");
    let output = run(&[path.to_str().unwrap(), "token"]);
    assert!(!output.status.success());
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "UNKNOWN_LANGUAGE");
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains(".cbl"));
    assert!(message.contains("javascript"));

    std::fs::remove_file(path).ok();
}

#[test]
fn unreadable_file_is_an_execution_error() {
    let output = run(&["/definitely/not/a/file.js", "token"]);
    assert!(!output.status.success());
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "EXECUTION_ERROR");
}

#[test]
fn unknown_flag_is_invalid_args() {
    let path = write_fixture("y.js", "let a;\n");
    let output = run(&[path.to_str().unwrap(), "token", "--frobnicate"]);
    assert!(!output.status.success());
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "INVALID_ARGS");

    std::fs::remove_file(path).ok();
}
