//! Syntax error catalog shared by the lexer and the parser.
//!
//! Every failure is one [`SyntaxError`] carrying a symbolic [`ErrorKind`], the
//! catalog message for that kind and the location of the offending source.

use crate::SourceLocation;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The kind of syntax error.
///
/// The set is closed; each kind maps to exactly one message through
/// [`ErrorKind::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    // Lexical errors
    /// A character that cannot start any token
    UnexpectedCharacter,
    /// String literal without closing quote
    UnterminatedString,
    /// Template literal without closing backtick
    UnterminatedTemplate,
    /// Regular expression without closing slash
    UnterminatedRegex,
    /// Block comment without closing `*/`
    UnterminatedComment,
    /// Malformed numeric literal
    InvalidNumericLiteral,
    /// Malformed escape sequence in a string, template or identifier
    InvalidEscapeSequence,

    // Syntax errors
    /// A token that does not fit the current production
    UnexpectedToken,
    /// Input ended in the middle of a production
    UnexpectedEndOfInput,
    /// Left side of an assignment or update cannot be assigned
    InvalidAssignmentTarget,
    /// `return` outside of a function body
    IllegalReturn,
    /// `break` outside of a loop, switch or matching label
    IllegalBreak,
    /// `continue` outside of a loop
    IllegalContinue,
    /// Jump to a label that is not in scope
    UndefinedLabel,
    /// `{ a = 1 }` used as an expression rather than a pattern
    InvalidShorthandInitializer,
    /// `??` mixed with `||` or `&&` without parentheses
    MixedNullishAndLogical,
    /// Unary operator applied directly to the base of `**`
    UnaryBeforeExponentiation,

    // Restriction errors
    /// Getter declared with parameters
    GetterShouldNeverHasParams,
    /// Getter marked async or generator
    GetterCanNotBeAsyncOrGenerator,
    /// Setter marked async or generator
    SetterCanNotBeAsyncOrGenerator,
    /// Setter without exactly one parameter
    SetterShouldHasAtLastOneParams,
    /// Constructor marked async or generator
    ConstructorCanNotBeAsyncOrGenerator,
    /// Constructor declared as accessor or field
    ConstructorCanNotBeSpecialMember,
    /// Class body with two constructors
    DuplicateConstructor,
    /// Private name used outside a class body or as an object key
    PrivateFieldCanNotUseInObject,
    /// Rest element followed by another element
    RestElementShouldBeLastProperty,
    /// Rest element followed by a trailing comma
    RestElementCanNotEndWithComma,
    /// `new` callee containing `?.`
    NewExpressionCantUsingOptionalChain,
    /// Tagged template whose tag contains `?.`
    TagTemplateExpressionCanNotUseOptionChain,
}

impl ErrorKind {
    /// Fixed human-readable message for this kind
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedCharacter => "Unexpected character",
            ErrorKind::UnterminatedString => "Unterminated string literal",
            ErrorKind::UnterminatedTemplate => "Unterminated template literal",
            ErrorKind::UnterminatedRegex => "Unterminated regular expression",
            ErrorKind::UnterminatedComment => "Unterminated multi-line comment",
            ErrorKind::InvalidNumericLiteral => "Invalid numeric literal",
            ErrorKind::InvalidEscapeSequence => "Invalid escape sequence",
            ErrorKind::UnexpectedToken => "Unexpected token",
            ErrorKind::UnexpectedEndOfInput => "Unexpected end of input",
            ErrorKind::InvalidAssignmentTarget => "Invalid assignment target",
            ErrorKind::IllegalReturn => "Illegal return statement",
            ErrorKind::IllegalBreak => "Illegal break statement",
            ErrorKind::IllegalContinue => "Illegal continue statement",
            ErrorKind::UndefinedLabel => "Undefined label",
            ErrorKind::InvalidShorthandInitializer => "Invalid shorthand property initializer",
            ErrorKind::MixedNullishAndLogical => {
                "Nullish coalescing operator can not be mixed with || or && without parentheses"
            }
            ErrorKind::UnaryBeforeExponentiation => {
                "Unary operator used immediately before exponentiation expression"
            }
            ErrorKind::GetterShouldNeverHasParams => "Getter should never has params",
            ErrorKind::GetterCanNotBeAsyncOrGenerator => "Getter can not be async or generator",
            ErrorKind::SetterCanNotBeAsyncOrGenerator => "Setter can not be async or generator",
            ErrorKind::SetterShouldHasAtLastOneParams => "Setter should has exactly one param",
            ErrorKind::ConstructorCanNotBeAsyncOrGenerator => {
                "Constructor can not be async or generator"
            }
            ErrorKind::ConstructorCanNotBeSpecialMember => {
                "Constructor can not be a getter, setter or field"
            }
            ErrorKind::DuplicateConstructor => "A class may only have one constructor",
            ErrorKind::PrivateFieldCanNotUseInObject => {
                "Private field can not be used outside of a class body"
            }
            ErrorKind::RestElementShouldBeLastProperty => "RestElement should be the lastest property",
            ErrorKind::RestElementCanNotEndWithComma => "RestElement can not end with comma",
            ErrorKind::NewExpressionCantUsingOptionalChain => {
                "New expression can not use optional chain"
            }
            ErrorKind::TagTemplateExpressionCanNotUseOptionChain => {
                "Tagged template expression can not use optional chain"
            }
        }
    }

    /// True for kinds raised by the lexer
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            ErrorKind::UnexpectedCharacter
                | ErrorKind::UnterminatedString
                | ErrorKind::UnterminatedTemplate
                | ErrorKind::UnterminatedRegex
                | ErrorKind::UnterminatedComment
                | ErrorKind::InvalidNumericLiteral
                | ErrorKind::InvalidEscapeSequence
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A fatal lexing or parsing failure.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, SourceLocation, SyntaxError};
///
/// let err = SyntaxError::new(ErrorKind::IllegalReturn, SourceLocation::default());
/// assert_eq!(err.message, "Illegal return statement");
/// assert_eq!(err.to_string(), "Illegal return statement at 1:1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at {}", location.start)]
pub struct SyntaxError {
    /// Symbolic error kind
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Span of the offending token or construct
    pub location: SourceLocation,
}

impl SyntaxError {
    /// Create an error with the catalog message for `kind`
    pub fn new(kind: ErrorKind, location: SourceLocation) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            location,
        }
    }

    /// Create an error whose message adds detail to the catalog message
    pub fn with_detail(kind: ErrorKind, detail: impl fmt::Display, location: SourceLocation) -> Self {
        Self {
            kind,
            message: format!("{}: {}", kind.message(), detail),
            location,
        }
    }
}

/// Result alias used throughout the front-end
pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourcePosition;

    #[test]
    fn test_catalog_message() {
        assert_eq!(
            ErrorKind::RestElementShouldBeLastProperty.message(),
            "RestElement should be the lastest property"
        );
    }

    #[test]
    fn test_with_detail_keeps_kind() {
        let loc = SourceLocation::at(SourcePosition::new(1, 2, 7));
        let err = SyntaxError::with_detail(ErrorKind::UnexpectedToken, "'}'", loc);
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.message, "Unexpected token: '}'");
        assert_eq!(err.location, loc);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::GetterShouldNeverHasParams).unwrap();
        assert_eq!(json, "\"getter_should_never_has_params\"");
    }

    #[test]
    fn test_lexical_classification() {
        assert!(ErrorKind::UnterminatedString.is_lexical());
        assert!(!ErrorKind::DuplicateConstructor.is_lexical());
    }
}
