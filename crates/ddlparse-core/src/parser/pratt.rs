//! Operator precedence for expression parsing.
//!
//! The parser climbs precedence: it consumes an infix operator only while
//! the operator's precedence is strictly greater than the current floor,
//! which starts at [`LOWEST`]. Equal precedence stops the climb, so every
//! operator is left-associative.

use crate::ast::BinaryOp;
use crate::lexer::{Keyword, Token, TokenKind, TokenValue};

/// The floor an expression starts from; below every operator.
pub const LOWEST: i16 = -1;

/// Precedence of a call's `(` after an identifier: above every binary operator.
pub const CALL: i16 = 8;

/// Precedence of `NOT IN`, `NOT LIKE` and friends.
pub const NEGATED: i16 = 2;

/// Returns the precedence of `op` on the parser's scale.
#[must_use]
pub fn precedence(op: BinaryOp) -> i16 {
    i16::from(op.precedence())
}

/// Returns the operator a keyword stands for in infix position.
#[must_use]
pub const fn keyword_to_binary_op(keyword: Keyword) -> Option<BinaryOp> {
    match keyword {
        Keyword::Or => Some(BinaryOp::Or),
        Keyword::And => Some(BinaryOp::And),
        Keyword::Is => Some(BinaryOp::Is),
        Keyword::In => Some(BinaryOp::In),
        Keyword::Like => Some(BinaryOp::Like),
        Keyword::Glob => Some(BinaryOp::Glob),
        Keyword::Match => Some(BinaryOp::Match),
        Keyword::Regexp => Some(BinaryOp::Regexp),
        _ => None,
    }
}

/// Converts a token in infix position to a binary operator.
///
/// `NOT` is not an operator on its own; the parser combines it with the
/// keyword that follows.
#[must_use]
pub const fn token_to_binary_op(token: &Token) -> Option<BinaryOp> {
    match token.kind {
        TokenKind::Keyword => match &token.value {
            TokenValue::Keyword(keyword) => keyword_to_binary_op(*keyword),
            _ => None,
        },
        TokenKind::Equal => Some(BinaryOp::Eq),
        TokenKind::NotEqual => Some(BinaryOp::NotEq),
        TokenKind::LessThan => Some(BinaryOp::Lt),
        TokenKind::LessOrEqual => Some(BinaryOp::LtEq),
        TokenKind::GreaterThan => Some(BinaryOp::Gt),
        TokenKind::GreaterOrEqual => Some(BinaryOp::GtEq),
        TokenKind::ShiftLeft => Some(BinaryOp::LeftShift),
        TokenKind::ShiftRight => Some(BinaryOp::RightShift),
        TokenKind::Ampersand => Some(BinaryOp::BitAnd),
        TokenKind::Pipe => Some(BinaryOp::BitOr),
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Concat => Some(BinaryOp::Concat),
        _ => None,
    }
}
