//! JavaScript Parser Component
//!
//! Provides the lexer, the parser and the AST for ECMAScript source text.
//! Parsing is fail-fast: the first lexical, syntax or restriction error is
//! returned as a [`core_types::SyntaxError`].
//!
//! # Overview
//!
//! - [`Lexer`] - Context-aware tokenizer (regex vs division, templates, private names)
//! - [`Token`] - Token with kind, raw text, location and line-break flag
//! - [`Parser`] - Recursive descent parser producing a [`Program`]
//! - [`ast`] - Serializable syntax tree node types
//!
//! # Example
//!
//! ```
//! use parser::{parse, Statement};
//!
//! let program = parse("let x = 42;").unwrap();
//! assert!(matches!(program.body[0], Statement::VariableDeclaration(_)));
//!
//! let err = parse("class A { get x(a) {} }").unwrap_err();
//! assert_eq!(err.message, "Getter should never has params");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Expression, Pattern, Program, Statement};
pub use lexer::{tokenize, Keyword, Lexer, Punctuator, SyntaxKind, Token};
pub use parser::{parse, Parser};
