//! Error types for the CLI

use core_types::SyntaxError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Lexing or parsing failed
    #[error("SyntaxError: {0}")]
    Syntax(#[from] SyntaxError),

    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),
}

impl CliError {
    /// True when the error means the source stopped mid-construct
    pub fn is_incomplete_input(&self) -> bool {
        matches!(
            self,
            CliError::Syntax(err)
                if err.kind == core_types::ErrorKind::UnexpectedEndOfInput
                    || err.kind == core_types::ErrorKind::UnterminatedTemplate
                    || err.kind == core_types::ErrorKind::UnterminatedComment
        )
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
