//! Token cursor with one token of pushback, used by the parser.

use core::fmt;

use super::{Keyword, Lexer, Token, TokenKind, TokenValue};
use crate::parser::ParseError;

/// Describes a token the parser is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// A keyword token with this keyword.
    Keyword(Keyword),
    /// Any token of this kind.
    Kind(TokenKind),
    /// A token of this kind whose text equals the value (ASCII
    /// case-insensitive), e.g. the identifier `ROWID`.
    Exact(TokenKind, &'static str),
}

impl Matcher {
    /// Returns true if `token` satisfies this matcher.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::Keyword(keyword) => token.is_keyword(*keyword),
            Self::Kind(kind) => token.kind == *kind,
            Self::Exact(kind, value) => {
                token.kind == *kind && token.text().is_some_and(|t| t.eq_ignore_ascii_case(value))
            }
        }
    }
}

impl From<Keyword> for Matcher {
    fn from(keyword: Keyword) -> Self {
        Self::Keyword(keyword)
    }
}

impl From<TokenKind> for Matcher {
    fn from(kind: TokenKind) -> Self {
        Self::Kind(kind)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::Kind(kind) => f.write_str(kind.description()),
            Self::Exact(_, value) => f.write_str(value),
        }
    }
}

/// Joins matchers into an "A or B or C" description.
fn describe(expecting: &[Matcher]) -> String {
    expecting
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Pulls tokens from a [`Lexer`] on demand.
///
/// The scanner always holds the token under the cursor and can hold one
/// extra token pushed back in front of it. A scanner is single-use: build a
/// new one for every source string.
pub struct Scanner<'a> {
    lexer: Lexer<'a>,
    current: Token,
    pushed: Option<Token>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the first token of `source`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the first token is malformed.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            pushed: None,
        })
    }

    /// Returns the source text being scanned.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// Returns the token under the cursor without advancing.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.pushed.as_ref().unwrap_or(&self.current)
    }

    /// Consumes and returns the current token. At the end of input this keeps
    /// returning the end-of-input sentinel.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if scanning the following token fails.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        if let Some(token) = self.pushed.take() {
            return Ok(token);
        }
        if self.current.is_eof() {
            return Ok(self.current.clone());
        }
        let next = self.lexer.next_token()?;
        Ok(core::mem::replace(&mut self.current, next))
    }

    /// Consumes the current token, which must satisfy one of `expecting`.
    ///
    /// # Errors
    ///
    /// Fails as [`Scanner::check`] does, or if scanning the next token fails.
    pub fn expect(&mut self, expecting: &[Matcher]) -> Result<Token, ParseError> {
        self.check(expecting)?;
        self.advance()
    }

    /// Consumes the current token, which must be `keyword`.
    ///
    /// # Errors
    ///
    /// Fails as [`Scanner::expect`] does.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        self.expect(&[Matcher::Keyword(keyword)])
    }

    /// Consumes the current token, which must be of `kind`.
    ///
    /// # Errors
    ///
    /// Fails as [`Scanner::expect`] does.
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.expect(&[Matcher::Kind(kind)])
    }

    /// Checks that the current token satisfies one of `expecting`, without
    /// consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::PrematureEnd`] at end of input, and a syntax
    /// error naming the expected set for a mismatch or an unknown token.
    pub fn check(&self, expecting: &[Matcher]) -> Result<&Token, ParseError> {
        let token = self.current();
        if token.kind == TokenKind::Unknown {
            return Err(ParseError::syntax(
                format!("unknown token {}", token.describe()),
                token.location,
            ));
        }
        if expecting.iter().any(|m| m.matches(token)) {
            return Ok(token);
        }
        Err(ParseError::unexpected(describe(expecting), token))
    }

    /// Returns true if the current token satisfies `matcher`.
    #[must_use]
    pub fn peek_is(&self, matcher: impl Into<Matcher>) -> bool {
        matcher.into().matches(self.current())
    }

    /// Consumes the current token if it satisfies `matcher`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if scanning the next token fails.
    pub fn eat(&mut self, matcher: impl Into<Matcher>) -> Result<Option<Token>, ParseError> {
        if self.peek_is(matcher) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Places `token` back in front of the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Impossible`] if a token is already pushed back:
    /// the grammar never needs more than one token of lookahead.
    pub fn push(&mut self, token: Token) -> Result<(), ParseError> {
        if self.pushed.is_some() {
            return Err(ParseError::impossible("token already pushed"));
        }
        self.pushed = Some(token);
        Ok(())
    }

    /// Returns true when the cursor is at end of input with nothing pushed back.
    #[must_use]
    pub fn done(&self) -> bool {
        self.pushed.is_none() && self.current.is_eof()
    }

    /// Captures the source text from the current token up to the end of the
    /// enclosing expression (the first unnested `)` or `;`, or end of input)
    /// and returns it as a string-literal token. The cursor is left on the
    /// terminator.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for unbalanced parentheses or unterminated
    /// literals inside the captured text.
    pub fn capture_verbatim(&mut self) -> Result<Token, ParseError> {
        let start = self.pushed.take().unwrap_or_else(|| self.current.clone());
        let span = self.lexer.scan_balanced(start.span.start, start.location)?;
        let text = span.slice(self.lexer.source());
        let token = Token::new(
            TokenKind::StringLiteral,
            TokenValue::Text(String::from(text)),
            span,
            start.location,
        );
        self.current = self.lexer.next_token()?;
        Ok(token)
    }
}
