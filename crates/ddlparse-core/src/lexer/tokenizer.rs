//! Character-level SQL tokenizer.

use super::{Keyword, Location, Span, Token, TokenKind, TokenValue};
use crate::parser::ParseError;

/// A lexer that turns SQL source into tokens, one at a time.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Line/column of `pos`.
    location: Location,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line/column of `start`.
    start_location: Location,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            location: Location::new(1, 1),
            start: 0,
            start_location: Location::new(1, 1),
        }
    }

    /// Returns the source text being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Moves the cursor back (or forward) to a previously seen position.
    pub(crate) fn reset(&mut self, offset: usize, location: Location) {
        self.pos = offset;
        self.location = location;
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }
            if !self.skip_comment() {
                break;
            }
        }
    }

    /// Skips one comment starting at the cursor, if there is one.
    fn skip_comment(&mut self) -> bool {
        // -- line comment
        if self.peek() == Some('-') && self.peek_next() == Some('-') {
            while self.peek().is_some_and(|c| c != '\n') {
                self.advance();
            }
            return true;
        }

        // /* block comment */, unterminated runs to end of input
        if self.peek() == Some('/') && self.peek_next() == Some('*') {
            self.advance();
            self.advance();
            loop {
                match self.advance() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance();
                        break;
                    }
                    None => break,
                    _ => {}
                }
            }
            return true;
        }

        false
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn make_token(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token::new(kind, value, self.make_span(), self.start_location)
    }

    /// Makes a punctuation token whose value is its own source text.
    fn symbol_token(&self, kind: TokenKind) -> Token {
        let text = &self.input[self.start..self.pos];
        self.make_token(kind, TokenValue::Text(String::from(text)))
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, self.start_location)
    }

    /// Scans an identifier or keyword.
    fn scan_symbol(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        Keyword::from_str(text).map_or_else(
            || self.make_token(TokenKind::Identifier, TokenValue::Text(String::from(text))),
            |keyword| {
                let mut token = self.make_token(TokenKind::Keyword, TokenValue::Keyword(keyword));
                token.original_text = Some(String::from(text));
                token
            },
        )
    }

    /// Scans an integer literal.
    fn scan_integer(&mut self) -> Result<Token, ParseError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        let value = text
            .parse::<u64>()
            .map_err(|_| self.error_here(format!("integer literal out of range: {text}")))?;
        Ok(self.make_token(TokenKind::IntegerLiteral, TokenValue::Integer(value)))
    }

    /// Reads the body of a literal delimited by `close`, collapsing a doubled
    /// `close` into a single character when `doubling` is set. The opening
    /// delimiter has already been consumed.
    fn read_delimited(&mut self, close: char, doubling: bool) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == close => {
                    if doubling && self.peek() == Some(close) {
                        value.push(close);
                        self.advance();
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => {
                    let what = if close == '\'' {
                        "string literal"
                    } else {
                        "quoted identifier"
                    };
                    return Err(self.error_here(format!("unterminated {what}")));
                }
            }
        }
    }

    /// Scans a blob literal (X'...' or x'...'). The cursor is on the `X`.
    fn scan_blob(&mut self) -> Result<Token, ParseError> {
        self.advance(); // X
        self.advance(); // '

        let mut bytes = Vec::new();
        loop {
            let high = match self.advance() {
                Some('\'') => break,
                Some(c) => c,
                None => return Err(self.error_here("unterminated blob literal")),
            };
            let low = match self.advance() {
                Some('\'') => {
                    return Err(self.error_here("blob literal has an odd number of hex digits"))
                }
                Some(c) => c,
                None => return Err(self.error_here("unterminated blob literal")),
            };
            bytes.push((self.hex_digit(high)? << 4) | self.hex_digit(low)?);
        }

        Ok(self.make_token(TokenKind::BlobLiteral, TokenValue::Bytes(bytes)))
    }

    fn hex_digit(&self, c: char) -> Result<u8, ParseError> {
        c.to_digit(16)
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| self.error_here(format!("invalid hex digit in blob literal: {c:?}")))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for unterminated literals, malformed blobs and
    /// integers that do not fit in an `i64`.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;
        self.start_location = self.location;

        let Some(c) = self.peek() else {
            return Ok(Token::end_of_input(self.pos, self.location));
        };

        if matches!(c, 'x' | 'X') && self.peek_next() == Some('\'') {
            return self.scan_blob();
        }
        if c.is_alphabetic() || c == '_' {
            return Ok(self.scan_symbol());
        }
        if c.is_ascii_digit() {
            return self.scan_integer();
        }

        self.advance();
        let token = match c {
            '\'' => {
                let value = self.read_delimited('\'', true)?;
                self.make_token(TokenKind::StringLiteral, TokenValue::Text(value))
            }
            '"' | '`' => {
                let value = self.read_delimited(c, true)?;
                self.make_token(TokenKind::Identifier, TokenValue::Text(value))
            }
            '[' => {
                let value = self.read_delimited(']', false)?;
                self.make_token(TokenKind::Identifier, TokenValue::Text(value))
            }

            '(' => self.symbol_token(TokenKind::LeftParen),
            ')' => self.symbol_token(TokenKind::RightParen),
            ',' => self.symbol_token(TokenKind::Comma),
            ';' => self.symbol_token(TokenKind::Semicolon),
            '.' => self.symbol_token(TokenKind::Dot),
            '+' => self.symbol_token(TokenKind::Plus),
            '-' => self.symbol_token(TokenKind::Minus),
            '*' => self.symbol_token(TokenKind::Star),
            '/' => self.symbol_token(TokenKind::Slash),
            '%' => self.symbol_token(TokenKind::Percent),
            '&' => self.symbol_token(TokenKind::Ampersand),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                }
                self.symbol_token(TokenKind::Equal)
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.symbol_token(TokenKind::NotEqual)
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.symbol_token(TokenKind::Concat)
                } else {
                    self.symbol_token(TokenKind::Pipe)
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.symbol_token(TokenKind::LessOrEqual)
                }
                Some('>') => {
                    self.advance();
                    self.symbol_token(TokenKind::NotEqual)
                }
                Some('<') => {
                    self.advance();
                    self.symbol_token(TokenKind::ShiftLeft)
                }
                _ => self.symbol_token(TokenKind::LessThan),
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.symbol_token(TokenKind::GreaterOrEqual)
                }
                Some('>') => {
                    self.advance();
                    self.symbol_token(TokenKind::ShiftRight)
                }
                _ => self.symbol_token(TokenKind::GreaterThan),
            },

            _ => self.symbol_token(TokenKind::Unknown),
        };
        Ok(token)
    }

    /// Scans forward from `offset` to the end of a balanced expression: the
    /// first `)` or `;` outside any parentheses, or the end of input. Quoted
    /// literals and comments are skipped so their contents never affect
    /// nesting.
    ///
    /// Returns the covered span, which ends at the last character that is
    /// neither whitespace nor part of a comment, and leaves the cursor at the
    /// terminator.
    pub(crate) fn scan_balanced(
        &mut self,
        offset: usize,
        location: Location,
    ) -> Result<Span, ParseError> {
        self.reset(offset, location);
        self.start = offset;
        self.start_location = location;

        let mut depth = 0_usize;
        let mut end = offset;
        loop {
            if self.skip_comment() {
                continue;
            }
            match self.peek() {
                None if depth > 0 => {
                    return Err(self.error_here("unbalanced parentheses in expression"));
                }
                None => break,
                Some(')' | ';') if depth == 0 => break,
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(c) => {
                    self.advance();
                    match c {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        '\'' | '"' | '`' => {
                            self.read_delimited(c, true)?;
                        }
                        '[' => {
                            self.read_delimited(']', false)?;
                        }
                        _ => {}
                    }
                    end = self.pos;
                }
            }
        }

        Ok(Span::new(offset, end))
    }

    /// Tokenizes the entire input and returns all tokens, ending with the
    /// end-of-input sentinel.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Lexer::next_token`] reports.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
