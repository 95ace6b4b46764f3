//! Unit tests for ErrorKind and SyntaxError

use core_types::{ErrorKind, SourceLocation, SourcePosition, SyntaxError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_restriction_messages_are_fixed() {
        assert_eq!(
            ErrorKind::GetterShouldNeverHasParams.message(),
            "Getter should never has params"
        );
        assert_eq!(
            ErrorKind::RestElementCanNotEndWithComma.message(),
            "RestElement can not end with comma"
        );
    }

    #[test]
    fn test_error_kind_display_uses_message() {
        let kind = ErrorKind::DuplicateConstructor;
        assert_eq!(kind.to_string(), kind.message());
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::IllegalBreak, ErrorKind::IllegalBreak);
        assert_ne!(ErrorKind::IllegalBreak, ErrorKind::IllegalContinue);
    }
}

#[cfg(test)]
mod syntax_error_tests {
    use super::*;

    #[test]
    fn test_syntax_error_carries_location() {
        let location = SourceLocation::new(SourcePosition::new(3, 4, 30), SourcePosition::new(3, 9, 35));
        let error = SyntaxError::new(ErrorKind::UnterminatedString, location);

        assert_eq!(error.kind, ErrorKind::UnterminatedString);
        assert_eq!(error.location, location);
        assert_eq!(error.to_string(), "Unterminated string literal at 4:5");
    }

    #[test]
    fn test_syntax_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        let error = SyntaxError::new(ErrorKind::UnexpectedToken, SourceLocation::default());
        takes_error(&error);
    }

    #[test]
    fn test_syntax_error_json_shape() {
        let error = SyntaxError::new(ErrorKind::IllegalReturn, SourceLocation::default());
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], "illegal_return");
        assert_eq!(json["message"], "Illegal return statement");
        assert_eq!(json["location"]["start"]["row"], 0);
    }
}
