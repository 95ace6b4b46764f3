//! Unit tests for the shape of successfully parsed programs

use parser::ast::{
    ArrowFunctionBody, Class, ClassMember, ExportDefaultKind, ForHead, ImportSpecifier,
    MethodKind, PropertyKey,
};
use parser::{parse, Expression, Pattern, Statement};

fn class_declaration(source: &str) -> Class {
    match parse(source).unwrap().body.into_iter().next() {
        Some(Statement::ClassDeclaration(class)) => class,
        other => panic!("expected class declaration, got {:?}", other),
    }
}

#[test]
fn private_field_and_static_async_generator_method() {
    let class = class_declaration("class A { #x = 1; static async *m() {} }");
    assert_eq!(class.id.as_ref().map(|id| id.name.as_str()), Some("A"));
    assert_eq!(class.body.len(), 2);

    match &class.body[0] {
        ClassMember::PropertyDefinition {
            key: PropertyKey::PrivateName(name),
            value: Some(_),
            is_static: false,
            ..
        } => assert_eq!(name.name, "x"),
        other => panic!("expected private field, got {:?}", other),
    }

    match &class.body[1] {
        ClassMember::MethodDefinition {
            key: PropertyKey::Identifier(name),
            kind: MethodKind::Method,
            value,
            is_static: true,
            ..
        } => {
            assert_eq!(name.name, "m");
            assert!(value.is_async);
            assert!(value.is_generator);
        }
        other => panic!("expected static async generator method, got {:?}", other),
    }
}

#[test]
fn class_heritage_and_constructor() {
    let class = class_declaration("class B extends mix(A) { constructor() { super(); } }");
    assert!(matches!(
        class.super_class.as_deref(),
        Some(Expression::CallExpression { .. })
    ));
    assert!(matches!(
        &class.body[0],
        ClassMember::MethodDefinition {
            kind: MethodKind::Constructor,
            ..
        }
    ));
}

#[test]
fn for_of_with_destructuring_declaration() {
    let program = parse("for (const [k, v] of entries) {}").unwrap();
    match &program.body[0] {
        Statement::ForOfStatement {
            left: ForHead::VariableDeclaration(decl),
            is_await: false,
            ..
        } => assert!(matches!(
            decl.declarations[0].id,
            Pattern::ArrayPattern { .. }
        )),
        other => panic!("expected for-of, got {:?}", other),
    }
}

#[test]
fn import_specifier_forms() {
    let program = parse("import def, * as ns from 'm'; import { a, b as c } from 'n';").unwrap();
    let kinds: Vec<&str> = program
        .body
        .iter()
        .flat_map(|stmt| match stmt {
            Statement::ImportDeclaration { specifiers, .. } => specifiers.iter(),
            other => panic!("expected import, got {:?}", other),
        })
        .map(|specifier| match specifier {
            ImportSpecifier::ImportDefaultSpecifier { local, .. }
            | ImportSpecifier::ImportNamespaceSpecifier { local, .. }
            | ImportSpecifier::ImportSpecifier { local, .. } => local.name.as_str(),
        })
        .collect();
    assert_eq!(kinds, vec!["def", "ns", "a", "c"]);
}

#[test]
fn export_default_expression() {
    let program = parse("export default a + b;").unwrap();
    assert!(matches!(
        &program.body[0],
        Statement::ExportDefaultDeclaration {
            declaration: ExportDefaultKind::Expression {
                expression: Expression::BinaryExpression { .. }
            },
            ..
        }
    ));
}

#[test]
fn arrow_with_expression_and_block_bodies() {
    let program = parse("f = x => x * 2; g = async () => { await x; };").unwrap();
    let bodies: Vec<bool> = program
        .body
        .iter()
        .map(|stmt| match stmt {
            Statement::ExpressionStatement {
                expression: Expression::AssignmentExpression { right, .. },
                ..
            } => match right.as_ref() {
                Expression::ArrowFunctionExpression(arrow) => {
                    matches!(arrow.body, ArrowFunctionBody::Block(_))
                }
                other => panic!("expected arrow, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        })
        .collect();
    assert_eq!(bodies, vec![false, true]);
}

#[test]
fn node_location_spans_consumed_tokens() {
    let program = parse("  foo(1, 2);\n").unwrap();
    let location = program.body[0].location();
    assert_eq!(location.start.index, 2);
    assert_eq!(location.end.index, 12);
    match &program.body[0] {
        Statement::ExpressionStatement { expression, .. } => {
            assert_eq!(expression.location().end.index, 11);
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}
