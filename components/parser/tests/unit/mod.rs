//! Unit tests for the parser component

mod lexer_test;
mod restriction_test;
mod shape_test;
