//! Parse orchestration for the CLI
//!
//! The Driver turns source text into printable output:
//! - Lexer for the token stream
//! - Parser for the syntax tree
//! - serde_json for rendering either one

use crate::error::{CliError, CliResult};
use serde::Serialize;
use tracing::debug;

/// What the driver prints for a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The syntax tree as JSON
    Ast,
    /// The token stream as JSON
    Tokens,
    /// Just `ok`
    Check,
}

/// Front-end driver shared by one-shot runs and the REPL
pub struct Driver {
    /// Selected output
    mode: OutputMode,
    /// Whether to print single-line JSON
    compact: bool,
}

impl Driver {
    /// Create a driver printing the syntax tree
    ///
    /// # Example
    /// ```
    /// use js_cli::{Driver, OutputMode};
    ///
    /// let driver = Driver::new(OutputMode::Ast);
    /// assert_eq!(driver.mode(), OutputMode::Ast);
    /// ```
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            compact: false,
        }
    }

    /// Enable single-line JSON
    pub fn with_compact(mut self, enabled: bool) -> Self {
        self.compact = enabled;
        self
    }

    /// Current output mode
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Switch the output mode
    pub fn set_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    /// Check if compact JSON is enabled
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Parse a JavaScript file
    ///
    /// # Errors
    /// Returns `CliError` if the file cannot be read or does not parse
    ///
    /// # Example
    /// ```no_run
    /// use js_cli::{Driver, OutputMode};
    ///
    /// let driver = Driver::new(OutputMode::Check);
    /// let output = driver.run_file("example.js").unwrap();
    /// ```
    pub fn run_file(&self, path: &str) -> CliResult<String> {
        debug!(path, "reading source file");
        let source = std::fs::read_to_string(path)?;
        self.run_source(&source)
    }

    /// Parse a JavaScript source string and render the output
    ///
    /// # Errors
    /// Returns `CliError` if lexing or parsing fails
    ///
    /// # Example
    /// ```
    /// use js_cli::{Driver, OutputMode};
    ///
    /// let driver = Driver::new(OutputMode::Check);
    /// assert_eq!(driver.run_source("let x = 42;").unwrap(), "ok");
    /// ```
    pub fn run_source(&self, source: &str) -> CliResult<String> {
        match self.mode {
            OutputMode::Ast => self.render(&parser::parse(source)?),
            OutputMode::Tokens => self.render(&parser::tokenize(source)?),
            OutputMode::Check => {
                parser::parse(source)?;
                Ok("ok".to_string())
            }
        }
    }

    /// Start the REPL
    ///
    /// # Errors
    /// Returns `CliError` if the line editor fails
    pub fn repl(&mut self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }

    fn render<T: Serialize>(&self, value: &T) -> CliResult<String> {
        let json = if self.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        };
        json.map_err(CliError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_builder() {
        let driver = Driver::new(OutputMode::Tokens).with_compact(true);
        assert_eq!(driver.mode(), OutputMode::Tokens);
        assert!(driver.is_compact());
    }

    #[test]
    fn test_run_source_ast() {
        let driver = Driver::new(OutputMode::Ast).with_compact(true);
        let output = driver.run_source("x;").unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["type"], "Program");
        assert_eq!(json["body"][0]["type"], "ExpressionStatement");
    }

    #[test]
    fn test_run_source_tokens() {
        let driver = Driver::new(OutputMode::Tokens);
        let output = driver.run_source("a + b").unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(3));
        assert_eq!(json[1]["raw_value"], "+");
    }

    #[test]
    fn test_run_source_compact_is_single_line() {
        let driver = Driver::new(OutputMode::Ast).with_compact(true);
        assert!(!driver.run_source("if (a) { b; }").unwrap().contains('\n'));
    }

    #[test]
    fn test_run_source_syntax_error() {
        let driver = Driver::new(OutputMode::Check);
        let err = driver.run_source("break;").unwrap_err();
        assert!(matches!(err, CliError::Syntax(_)));
    }

    #[test]
    fn test_run_file_missing() {
        let driver = Driver::new(OutputMode::Check);
        let err = driver.run_file("/nonexistent/input.js").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
