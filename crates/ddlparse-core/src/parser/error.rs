//! Parser error types.

use crate::lexer::{Location, Token};

/// An error raised while scanning or parsing.
///
/// Malformed input surfaces as [`ParseError::Syntax`] or
/// [`ParseError::PrematureEnd`]; [`ParseError::Impossible`] means the parser
/// itself reached a state its grammar rules out and should be reported as a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not match the grammar.
    #[error("{message}{}", .location.map(|l| format!(" at {l}")).unwrap_or_default())]
    Syntax {
        /// What went wrong, including the expected and actual tokens.
        message: String,
        /// Position of the offending token, when known.
        location: Option<Location>,
    },

    /// The input ended where a token was required.
    #[error("premature end of input: expected {expected}")]
    PrematureEnd {
        /// Description of what was expected.
        expected: String,
    },

    /// The parser reached a branch its own grammar rules out.
    #[error("internal parser error: {0}")]
    Impossible(String),

    /// The statement form is recognised but not supported.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Expression nesting exceeded [`crate::ParseOptions::max_depth`].
    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}

impl ParseError {
    /// Creates a syntax error positioned at `location`.
    #[must_use]
    pub fn syntax(message: impl Into<String>, location: Location) -> Self {
        Self::Syntax {
            message: message.into(),
            location: Some(location),
        }
    }

    /// Creates a syntax error with no position.
    #[must_use]
    pub fn syntax_unlocated(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            location: None,
        }
    }

    /// Creates an "expected X, got Y" error for `found`.
    ///
    /// Reaching the end of input yields [`ParseError::PrematureEnd`] instead.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected = expected.into();
        if found.is_eof() {
            Self::PrematureEnd { expected }
        } else {
            Self::syntax(
                format!("expected {expected}, got {}", found.describe()),
                found.location,
            )
        }
    }

    /// Creates an internal-consistency error.
    #[must_use]
    pub fn impossible(message: impl Into<String>) -> Self {
        Self::Impossible(message.into())
    }

    /// Returns true for errors that indicate a parser bug rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Impossible(_))
    }

    /// Returns the source position of the error, when known.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::Syntax { location, .. } => *location,
            _ => None,
        }
    }
}
