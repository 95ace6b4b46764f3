//! JavaScript Parser CLI Library
//!
//! Provides the Driver struct and supporting modules for the `corten-parse`
//! command line tool.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod driver;
pub mod error;
pub mod repl;

pub use cli::Cli;
pub use driver::{Driver, OutputMode};
pub use error::{CliError, CliResult};
