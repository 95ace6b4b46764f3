//! Parser error types and helpers

use crate::lexer::{SyntaxKind, Token};
use core_types::{ErrorKind, SourceLocation, SyntaxError};

/// Create an error of `kind` at a given location
pub fn syntax_error(kind: ErrorKind, location: SourceLocation) -> SyntaxError {
    SyntaxError::new(kind, location)
}

/// Create an unexpected token error for `token`.
///
/// Running into `Eof` is reported as unexpected end of input.
pub fn unexpected_token(token: &Token) -> SyntaxError {
    if token.kind == SyntaxKind::Eof {
        return unexpected_eof(token.location);
    }
    SyntaxError::with_detail(
        ErrorKind::UnexpectedToken,
        format!("'{}'", token.raw_value),
        token.location,
    )
}

/// Create an unexpected end of input error
pub fn unexpected_eof(location: SourceLocation) -> SyntaxError {
    SyntaxError::new(ErrorKind::UnexpectedEndOfInput, location)
}
