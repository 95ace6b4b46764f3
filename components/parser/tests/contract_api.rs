//! Contract tests for parser API
//!
//! These tests verify the parser component implements its contract correctly.

use core_types::{ErrorKind, SyntaxError};
use parser::ast::{LiteralValue, Statement};
use parser::{parse, tokenize, Keyword, Lexer, Parser, Program, Punctuator, SyntaxKind, Token};
use serde_json::Value;

// =============================================================================
// Lexer Contract Tests
// =============================================================================

#[test]
fn test_lexer_next_token_returns_result() {
    let mut lexer = Lexer::new("let x = 42;");
    let result: Result<Token, SyntaxError> = lexer.next_token();
    assert!(result.is_ok());
}

#[test]
fn test_lexer_token_kinds() {
    let kinds: Vec<SyntaxKind> = tokenize("const s = `a${b}` + 'c' + 1n;")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Keyword(Keyword::Const),
            SyntaxKind::Identifier,
            SyntaxKind::Punctuator(Punctuator::Assign),
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateTail,
            SyntaxKind::Punctuator(Punctuator::Plus),
            SyntaxKind::StringLiteral,
            SyntaxKind::Punctuator(Punctuator::Plus),
            SyntaxKind::BigIntLiteral,
            SyntaxKind::Punctuator(Punctuator::Semicolon),
        ]
    );
}

#[test]
fn test_lexer_source_value_decodes() {
    let mut lexer = Lexer::new(r#""a\x41\u{42}""#);
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, SyntaxKind::StringLiteral);
    assert_eq!(token.raw_value, r#""a\x41\u{42}""#);
    assert_eq!(lexer.source_value(), "aAB");
}

#[test]
fn test_lexer_eof_is_stable() {
    let mut lexer = Lexer::new("x");
    lexer.next_token().unwrap();
    let first = lexer.next_token().unwrap();
    let second = lexer.next_token().unwrap();
    assert_eq!(first.kind, SyntaxKind::Eof);
    assert_eq!(first, second);
}

#[test]
fn test_lexer_tokens_are_monotonic() {
    let tokens = tokenize("a = b / c;\nlet re = /x+/g;\nobj?.[k] ?? `t${1}t`").unwrap();
    for pair in tokens.windows(2) {
        assert!(pair[0].location.start <= pair[0].location.end);
        assert!(pair[0].location.end <= pair[1].location.start);
    }
}

#[test]
fn test_lexer_clone_is_independent() {
    let tokens = tokenize("foo").unwrap();
    let mut copy = tokens[0].clone();
    copy.raw_value.push('!');
    assert_eq!(tokens[0].raw_value, "foo");
}

#[test]
fn test_lexer_error_kind() {
    let err = tokenize("'open").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedString);
    assert!(err.kind.is_lexical());
}

// =============================================================================
// Parser Contract Tests
// =============================================================================

#[test]
fn test_parser_new_and_parse() {
    let mut parser = Parser::new("let x = 42;");
    let result: Result<Program, SyntaxError> = parser.parse();
    let program = result.unwrap();
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_parse_free_function_matches_parser() {
    let source = "function f(a, b = 1) { return a + b; }";
    assert_eq!(parse(source).unwrap(), Parser::new(source).parse().unwrap());
}

#[test]
fn test_parse_is_deterministic() {
    let source = "class A { #x = 1; static async *m() {} }\nexport default A;";
    let first = serde_json::to_string(&parse(source).unwrap()).unwrap();
    let second = serde_json::to_string(&parse(source).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_error_is_fail_fast() {
    let err = parse("let a = 1;\nreturn a;\nbreak;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalReturn);
    assert_eq!(err.location.start.row, 1);
    assert_eq!(err.to_string(), "Illegal return statement at 2:1");
}

#[test]
fn test_parse_restriction_messages() {
    let cases = [
        (
            "class A { get x(a) {} }",
            "Getter should never has params",
        ),
        (
            "let [...a, b] = c;",
            "RestElement should be the lastest property",
        ),
        (
            "new a?.b();",
            "New expression can not use optional chain",
        ),
    ];
    for (source, message) in cases {
        assert_eq!(parse(source).unwrap_err().message, message, "{}", source);
    }
}

#[test]
fn test_program_clone_is_independent() {
    let program = parse("let x = 1;").unwrap();
    let mut copy = program.clone();
    copy.body.clear();
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_literal_values() {
    let program = parse("'s'; 1.5; 0o17; 10n;").unwrap();
    let values: Vec<LiteralValue> = program
        .body
        .into_iter()
        .map(|stmt| match stmt {
            Statement::ExpressionStatement {
                expression: parser::Expression::Literal(lit),
                ..
            } => lit.value,
            other => panic!("expected literal statement, got {:?}", other),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            LiteralValue::String("s".to_string()),
            LiteralValue::Number(1.5),
            LiteralValue::Number(15.0),
            LiteralValue::BigInt("10".to_string()),
        ]
    );
}

// =============================================================================
// Serialization Contract Tests
// =============================================================================

#[test]
fn test_program_serializes_with_type_tags() {
    let json = serde_json::to_value(parse("let x = a + 1;").unwrap()).unwrap();
    assert_eq!(json["type"], "Program");
    let decl = &json["body"][0];
    assert_eq!(decl["type"], "VariableDeclaration");
    assert_eq!(decl["kind"], "let");
    let init = &decl["declarations"][0]["init"];
    assert_eq!(init["type"], "BinaryExpression");
    assert_eq!(init["operator"], "+");
    assert_eq!(init["left"]["type"], "Identifier");
    assert_eq!(init["left"]["name"], "a");
}

#[test]
fn test_error_serializes_snake_case_kind() {
    let err = parse("a ?? b || c;").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "mixed_nullish_and_logical");
}

fn index(position: &Value) -> u64 {
    position["index"].as_u64().unwrap()
}

/// Check that every located node has start <= end, lies within its parent,
/// and that located siblings in a list do not overlap
fn check_spans(value: &Value, parent: Option<(u64, u64)>) {
    match value {
        Value::Object(map) => {
            let mut span = parent;
            if let Some(location) = map.get("location") {
                let start = index(&location["start"]);
                let end = index(&location["end"]);
                assert!(start <= end, "inverted span in {}", value);
                if let Some((parent_start, parent_end)) = parent {
                    assert!(
                        parent_start <= start && end <= parent_end,
                        "span {}..{} escapes parent {}..{}",
                        start,
                        end,
                        parent_start,
                        parent_end
                    );
                }
                span = Some((start, end));
            }
            for (key, child) in map {
                if key != "location" {
                    check_spans(child, span);
                }
            }
        }
        Value::Array(items) => {
            let mut previous_end = 0;
            for item in items {
                if let Some(location) = item.get("location") {
                    let start = index(&location["start"]);
                    assert!(previous_end <= start, "siblings overlap at {}", start);
                    previous_end = index(&location["end"]);
                }
                check_spans(item, parent);
            }
        }
        _ => {}
    }
}

#[test]
fn test_node_spans_are_monotonic() {
    let source = r#"
import { a as b } from "mod";
const { x, y: [z = 1, ...rest] } = obj;
async function* gen(p, ...q) {
    for await (const item of p) {
        yield item?.value ?? q[0];
    }
}
class Point extends Base {
    #x = 0;
    static count = 0;
    constructor(x) { super(); this.#x = x; }
    get x() { return this.#x; }
    set x(v) { this.#x = v; }
    static { Point.count++; }
}
label: for (let i = 0; i < 10; i++) {
    if (i % 2) continue label;
    else break;
}
const f = (a, { b = 2 } = {}) => a + b;
[p, q] = [q, p];
tag`x${1}y${2}z`;
try { f(); } catch { } finally { }
switch (v) { case 1: break; default: v = new Point(1); }
export default class {}
"#;
    let program = parse(source).unwrap();
    let json = serde_json::to_value(&program).unwrap();
    check_spans(&json, None);
}
