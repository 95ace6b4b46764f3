//! CLI argument parsing and driver tests
//!
//! Tests for verifying clap argument parsing and end-to-end file parsing

use clap::Parser as ClapParser;
use js_cli::{Cli, CliError, Driver, OutputMode};
use std::io::Write;

/// Test parsing no arguments (default behavior)
#[test]
fn cli_parse_no_args() {
    let cli = Cli::try_parse_from(["corten-parse"]).unwrap();

    assert_eq!(cli.file, None);
    assert_eq!(cli.eval, None);
    assert!(!cli.repl);
    assert!(!cli.tokens);
    assert!(!cli.compact);
    assert!(!cli.check);
    assert_eq!(cli.output_mode(), OutputMode::Ast);
}

/// Test parsing --file option
#[test]
fn cli_parse_file_long() {
    let cli = Cli::try_parse_from(["corten-parse", "--file", "script.js"]).unwrap();
    assert_eq!(cli.file, Some("script.js".to_string()));
}

/// Test parsing -f option (short form)
#[test]
fn cli_parse_file_short() {
    let cli = Cli::try_parse_from(["corten-parse", "-f", "script.js"]).unwrap();
    assert_eq!(cli.file, Some("script.js".to_string()));
}

/// Test parsing --eval option
#[test]
fn cli_parse_eval() {
    let cli = Cli::try_parse_from(["corten-parse", "-e", "a + b"]).unwrap();
    assert_eq!(cli.eval, Some("a + b".to_string()));
}

/// Test parsing -r option (short form)
#[test]
fn cli_parse_repl_short() {
    let cli = Cli::try_parse_from(["corten-parse", "-r"]).unwrap();
    assert!(cli.repl);
}

/// Test parsing output flags
#[test]
fn cli_parse_output_flags() {
    let cli = Cli::try_parse_from(["corten-parse", "-t", "--compact", "-e", "x"]).unwrap();
    assert!(cli.tokens);
    assert!(cli.compact);
    assert_eq!(cli.output_mode(), OutputMode::Tokens);
}

/// --file and --eval are mutually exclusive
#[test]
fn cli_parse_file_and_eval_conflict() {
    let result = Cli::try_parse_from(["corten-parse", "-f", "a.js", "-e", "x"]);
    assert!(result.is_err());
}

/// --check and --tokens are mutually exclusive
#[test]
fn cli_parse_check_and_tokens_conflict() {
    let result = Cli::try_parse_from(["corten-parse", "--check", "--tokens"]);
    assert!(result.is_err());
}

/// Test parsing an unknown flag
#[test]
fn cli_parse_unknown_flag() {
    let result = Cli::try_parse_from(["corten-parse", "--jit"]);
    assert!(result.is_err());
}

/// Parse a file from disk
#[test]
fn driver_run_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "export const answer = () => 42;").unwrap();

    let driver = Driver::new(OutputMode::Ast).with_compact(true);
    let output = driver.run_file(file.path().to_str().unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    let export = &json["body"][0];
    assert_eq!(export["type"], "ExportNamedDeclaration");
    assert_eq!(
        export["declaration"]["declarations"][0]["init"]["type"],
        "ArrowFunctionExpression"
    );
}

/// Syntax errors in a file surface with their location
#[test]
fn driver_run_file_syntax_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "let ok = 1;").unwrap();
    writeln!(file, "continue;").unwrap();

    let driver = Driver::new(OutputMode::Check);
    let err = driver.run_file(file.path().to_str().unwrap()).unwrap_err();
    match err {
        CliError::Syntax(e) => {
            assert_eq!(e.kind, core_types::ErrorKind::IllegalContinue);
            assert_eq!(e.location.start.row, 1);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

/// Check mode prints ok for valid input
#[test]
fn driver_check_mode() {
    let driver = Driver::new(OutputMode::Check);
    assert_eq!(driver.run_source("class A { static { } }").unwrap(), "ok");
}
