//! Shared value types for the JavaScript front-end.
//!
//! This crate provides the source location types stamped on every token and
//! syntax node, and the error catalog used by the lexer and the parser.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Row, column and offset of a single point
//! - [`SourceLocation`] - Start/end span of a token or node
//! - [`ErrorKind`] - Closed set of syntax error kinds
//! - [`SyntaxError`] - Fatal error value with kind, message and location
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, SourceLocation, SourcePosition, SyntaxError};
//!
//! let loc = SourceLocation::new(SourcePosition::new(0, 0, 0), SourcePosition::new(0, 5, 5));
//! let error = SyntaxError::new(ErrorKind::UnexpectedToken, loc);
//! assert_eq!(error.kind, ErrorKind::UnexpectedToken);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, SyntaxError, SyntaxResult};
pub use source::{SourceLocation, SourcePosition};
