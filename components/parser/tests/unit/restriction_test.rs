//! Unit tests for fail-fast restriction checks

use core_types::ErrorKind;
use parser::parse;

fn error_kind(source: &str) -> ErrorKind {
    match parse(source) {
        Ok(program) => panic!("expected {:?} to fail, got {:?}", source, program),
        Err(e) => e.kind,
    }
}

#[test]
fn getter_with_params_is_rejected() {
    assert_eq!(
        error_kind("class A { get x(a) {} }"),
        ErrorKind::GetterShouldNeverHasParams
    );
}

#[test]
fn setter_without_param_is_rejected() {
    assert_eq!(
        error_kind("class A { set x() {} }"),
        ErrorKind::SetterShouldHasAtLastOneParams
    );
}

#[test]
fn async_getter_is_rejected() {
    assert_eq!(
        error_kind("class A { async get x() {} }"),
        ErrorKind::GetterCanNotBeAsyncOrGenerator
    );
}

#[test]
fn async_constructor_is_rejected() {
    assert_eq!(
        error_kind("class A { async constructor() {} }"),
        ErrorKind::ConstructorCanNotBeAsyncOrGenerator
    );
}

#[test]
fn rest_element_must_be_last() {
    assert_eq!(
        error_kind("var [a, ...b, c] = x;"),
        ErrorKind::RestElementShouldBeLastProperty
    );
    assert_eq!(
        error_kind("var { ...a, b } = x;"),
        ErrorKind::RestElementShouldBeLastProperty
    );
    assert_eq!(
        error_kind("function f(...a, b) {}"),
        ErrorKind::RestElementShouldBeLastProperty
    );
}

#[test]
fn rest_element_trailing_comma_is_rejected() {
    assert_eq!(
        error_kind("var [a, ...b,] = x;"),
        ErrorKind::RestElementCanNotEndWithComma
    );
}

#[test]
fn rest_element_in_assignment_pattern() {
    assert_eq!(
        error_kind("[a, ...b, c] = x;"),
        ErrorKind::RestElementShouldBeLastProperty
    );
    assert!(parse("[a, ...b, c];").is_ok());
}

#[test]
fn new_callee_cannot_use_optional_chain() {
    assert_eq!(
        error_kind("new a?.b();"),
        ErrorKind::NewExpressionCantUsingOptionalChain
    );
}

#[test]
fn tagged_template_cannot_use_optional_chain() {
    assert_eq!(
        error_kind("a?.b`template`;"),
        ErrorKind::TagTemplateExpressionCanNotUseOptionChain
    );
}

#[test]
fn private_name_outside_class_is_rejected() {
    assert_eq!(error_kind("#x;"), ErrorKind::PrivateFieldCanNotUseInObject);
    assert_eq!(
        error_kind("({ #x: 1 });"),
        ErrorKind::PrivateFieldCanNotUseInObject
    );
}

#[test]
fn nested_function_resets_jump_context() {
    assert_eq!(
        error_kind("while (a) { function f() { break; } }"),
        ErrorKind::IllegalBreak
    );
    assert_eq!(
        error_kind("for (;;) { () => { continue; }; }"),
        ErrorKind::IllegalContinue
    );
    assert!(parse("function f() { while (a) { return; } }").is_ok());
}

#[test]
fn class_body_does_not_leak_private_scope() {
    assert_eq!(
        error_kind("class A { #x; } function f() { return this.#x; }"),
        ErrorKind::PrivateFieldCanNotUseInObject
    );
}

#[test]
fn error_carries_catalog_message() {
    let sources = [
        "class A { set x(a, b) {} }",
        "let [...a,] = b;",
        "return;",
        "a ?? b && c;",
        "-a ** 2;",
        "({ a = 1 });",
    ];
    for source in sources {
        let err = parse(source).unwrap_err();
        assert_eq!(err.message, err.kind.message(), "{}", source);
    }
}

#[test]
fn error_location_points_into_source() {
    let source = "let ok = 1;\nclass A {\n  get x(value) {}\n}";
    let err = parse(source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::GetterShouldNeverHasParams);
    assert_eq!(err.location.start.row, 2);
    assert!(err.location.start.index <= err.location.end.index);
    assert!(err.location.end.index <= source.chars().count());
}

#[test]
fn first_error_wins() {
    let err = parse("class A { get x(a) {} set y() {} }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::GetterShouldNeverHasParams);
}
