//! Integration tests for the `docs-value` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the parse and
//! tokens subcommands through the actual binary, including stdin/stdout
//! piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper: a scratch file path unique to this test process.
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("docs-value-{}-{}", std::process::id(), name))
}

fn cmd() -> Command {
    Command::cargo_bin("docs-value").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// parse subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_stdin_to_pretty_json() {
    let output = cmd()
        .arg("parse")
        .write_stdin("(ItemClass=Desc_Wire_C,Amount=8)\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"ItemClass": "Desc_Wire_C", "Amount": 8})
    );
    assert!(String::from_utf8(output).unwrap().contains("\n  \"Amount\": 8"));
}

#[test]
fn parse_compact_keeps_key_order() {
    cmd()
        .args(["parse", "--compact"])
        .write_stdin("(R=1,G=0.5,B=0,A=1)")
        .assert()
        .success()
        .stdout("{\"R\":1,\"G\":0.5,\"B\":0,\"A\":1}\n");
}

#[test]
fn parse_nested_lists() {
    cmd()
        .args(["parse", "--compact"])
        .write_stdin("((1,2),(3,4))\n")
        .assert()
        .success()
        .stdout("[[1,2],[3,4]]\n");
}

#[test]
fn parse_empty_input_is_null() {
    cmd()
        .arg("parse")
        .write_stdin("")
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn parse_file_to_file() {
    let input = scratch_path("in.txt");
    let output = scratch_path("out.json");
    std::fs::write(&input, "(Min=1,Max=2.5)").unwrap();

    cmd()
        .args(["parse", "--compact", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "{\"Min\":1,\"Max\":2.5}\n");

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn parse_mixed_shape_fails() {
    cmd()
        .arg("parse")
        .write_stdin("(1,Key=2)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse property value"))
        .stderr(predicate::str::contains("mixed keyed and unkeyed"));
}

#[test]
fn parse_unterminated_fails() {
    cmd()
        .arg("parse")
        .write_stdin("(1,2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of input"));
}

#[test]
fn parse_invalid_token_fails() {
    cmd()
        .arg("parse")
        .write_stdin("(1, 2)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid token at byte 3"));
}

#[test]
fn parse_missing_file_fails() {
    cmd()
        .args(["parse", "-i", "/nonexistent/property.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// tokens subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tokens_lists_offsets_and_kinds() {
    cmd()
        .arg("tokens")
        .write_stdin("(A=1.5,b)")
        .assert()
        .success()
        .stdout(
            "0\tOpenParen\t(\n\
             1\tKey\tA=\n\
             3\tFloat\t1.5\n\
             6\tSeparator\t,\n\
             7\tString\tb\n\
             8\tCloseParen\t)\n",
        );
}

#[test]
fn tokens_rejects_whitespace() {
    cmd()
        .arg("tokens")
        .write_stdin("(a b)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to tokenize property value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging and help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    cmd()
        .args(["--verbose", "parse", "--compact"])
        .write_stdin("(1,2)")
        .assert()
        .success()
        .stdout("[1,2]\n")
        .stderr(predicate::str::contains("parsing property value"));
}

#[test]
fn no_subcommand_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
