//! SQLite DDL Parser
//!
//! A hand-written recursive descent parser with precedence-climbing
//! expression parsing.

mod error;
mod options;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::ParseError;
pub use options::ParseOptions;
pub use parser::Parser;

/// Result alias for parser operations.
pub type Result<T> = core::result::Result<T, ParseError>;
