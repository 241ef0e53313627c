//! SQL Lexer/Tokenizer
//!
//! [`Lexer`] turns source text into tokens on demand; [`Scanner`] wraps it
//! with the one-token pushback and token matching the parser relies on.

mod scanner;
mod span;
mod token;
mod tokenizer;

pub use scanner::{Matcher, Scanner};
pub use span::{Location, Span};
pub use token::{Keyword, Token, TokenKind, TokenValue};
pub use tokenizer::Lexer;
