//! Unit tests for the Lexer

use core_types::ErrorKind;
use parser::lexer::parse_numeric_value;
use parser::{tokenize, Lexer, Punctuator, SyntaxKind};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn slash_after_value_is_division() {
    assert_eq!(
        kinds("(a) / b"),
        vec![
            SyntaxKind::Punctuator(Punctuator::LParen),
            SyntaxKind::Identifier,
            SyntaxKind::Punctuator(Punctuator::RParen),
            SyntaxKind::Punctuator(Punctuator::Slash),
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn slash_after_operator_starts_regex() {
    assert_eq!(
        kinds("x = /ab+c/gi"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Punctuator(Punctuator::Assign),
            SyntaxKind::RegexLiteral,
        ]
    );
    assert_eq!(kinds("return /x/")[1], SyntaxKind::RegexLiteral);
}

#[test]
fn slash_after_closing_brace_is_division() {
    assert_eq!(kinds("} / 2")[1], SyntaxKind::Punctuator(Punctuator::Slash));
}

#[test]
fn newline_before_is_tracked() {
    let tokens = tokenize("a\nb c").unwrap();
    assert!(!tokens[0].newline_before);
    assert!(tokens[1].newline_before);
    assert!(!tokens[2].newline_before);

    let tokens = tokenize("a /* multi\nline */ b").unwrap();
    assert!(tokens[1].newline_before);
}

#[test]
fn rows_and_columns_advance() {
    let tokens = tokenize("a\n  bc").unwrap();
    assert_eq!(tokens[1].location.start.row, 1);
    assert_eq!(tokens[1].location.start.col, 2);
    assert_eq!(tokens[1].location.start.index, 4);
    assert_eq!(tokens[1].location.end.index, 6);
}

#[test]
fn eof_location_is_end_of_input() {
    let mut lexer = Lexer::new("ab  ");
    lexer.next_token().unwrap();
    let eof = lexer.next_token().unwrap();
    assert_eq!(eof.kind, SyntaxKind::Eof);
    assert_eq!(eof.location.start.index, 4);
    assert_eq!(eof.location.start, eof.location.end);
}

#[test]
fn numeric_forms() {
    assert_eq!(parse_numeric_value("0xff"), Some(255.0));
    assert_eq!(parse_numeric_value("0o17"), Some(15.0));
    assert_eq!(parse_numeric_value("0b101"), Some(5.0));
    assert_eq!(parse_numeric_value("1.5e3"), Some(1500.0));
    assert_eq!(parse_numeric_value(".5"), Some(0.5));
}

#[test]
fn numeric_separators_are_removed_from_value() {
    let mut lexer = Lexer::new("1_000_000");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, SyntaxKind::NumericLiteral);
    assert_eq!(token.raw_value, "1_000_000");
    assert_eq!(lexer.source_value(), "1000000");
}

#[test]
fn malformed_literals_fail() {
    let cases = [
        ("0x", ErrorKind::InvalidNumericLiteral),
        ("`open", ErrorKind::UnterminatedTemplate),
        ("/open", ErrorKind::UnterminatedRegex),
        ("/* open", ErrorKind::UnterminatedComment),
        ("'\\x4'", ErrorKind::InvalidEscapeSequence),
    ];
    for (source, kind) in cases {
        assert_eq!(tokenize(source).unwrap_err().kind, kind, "{}", source);
    }
}
