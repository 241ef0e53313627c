//! Expression AST types.

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Literal {
    /// String literal, with `''` escapes already collapsed.
    String(String),
    /// Blob literal, decoded to bytes.
    Blob(Vec<u8>),
    /// Integer literal.
    Integer(i64),
    /// Boolean literal (`TRUE`/`FALSE`).
    Boolean(bool),
    /// NULL literal.
    Null,
}

/// Binary (infix) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison and pattern matching
    Eq,
    NotEq,
    Is,
    IsNot,
    In,
    NotIn,
    Like,
    NotLike,
    Glob,
    NotGlob,
    Match,
    NotMatch,
    Regexp,
    NotRegexp,

    // Ordering
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    LeftShift,
    RightShift,
    BitAnd,
    BitOr,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String
    Concat,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Glob => "GLOB",
            Self::NotGlob => "NOT GLOB",
            Self::Match => "MATCH",
            Self::NotMatch => "NOT MATCH",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 0,
            Self::And => 1,
            Self::Eq
            | Self::NotEq
            | Self::Is
            | Self::IsNot
            | Self::In
            | Self::NotIn
            | Self::Like
            | Self::NotLike
            | Self::Glob
            | Self::NotGlob
            | Self::Match
            | Self::NotMatch
            | Self::Regexp
            | Self::NotRegexp => 2,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::LeftShift | Self::RightShift | Self::BitAnd | Self::BitOr => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
            Self::Concat => 7,
        }
    }

    /// Returns the negated form of a pattern or membership operator
    /// (`IN` becomes `NOT IN`), or `None` if `NOT` cannot precede it.
    #[must_use]
    pub const fn negated(&self) -> Option<Self> {
        match self {
            Self::In => Some(Self::NotIn),
            Self::Like => Some(Self::NotLike),
            Self::Glob => Some(Self::NotGlob),
            Self::Match => Some(Self::NotMatch),
            Self::Regexp => Some(Self::NotRegexp),
            _ => None,
        }
    }
}

/// A bare or quoted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identifier {
    /// The unquoted name.
    pub value: String,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// An infix expression such as `a + b` or `x IS NOT NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Infix {
    /// Left operand.
    pub left: Box<Expr>,
    /// Operator.
    pub op: BinaryOp,
    /// Right operand.
    pub right: Box<Expr>,
}

/// A function call expression.
///
/// `COUNT(*)` sets `star` and has no arguments; `COUNT(DISTINCT x)` sets
/// `distinct` and has exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// The function name.
    pub name: Identifier,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether the argument list was `*`.
    pub star: bool,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

impl FunctionCall {
    /// Creates a call with the given arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: Identifier::new(name),
            args,
            star: false,
            distinct: false,
        }
    }

    /// Creates a `name(*)` call.
    #[must_use]
    pub fn star(name: impl Into<String>) -> Self {
        Self {
            star: true,
            ..Self::new(name, vec![])
        }
    }

    /// Creates a `name(DISTINCT arg)` call.
    #[must_use]
    pub fn distinct(name: impl Into<String>, arg: Expr) -> Self {
        Self {
            distinct: true,
            ..Self::new(name, vec![arg])
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column or other name reference.
    Identifier(Identifier),

    /// A binary expression.
    Infix(Infix),

    /// A function call.
    Call(FunctionCall),

    /// A parenthesized, comma-separated list: `(1, 2, 3)`.
    List(Vec<Expr>),

    /// Source text captured without parsing its structure.
    Verbatim(String),
}

impl Expr {
    /// Creates a new identifier reference.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new blob literal.
    #[must_use]
    pub fn blob(value: impl Into<Vec<u8>>) -> Self {
        Self::Literal(Literal::Blob(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a verbatim expression.
    #[must_use]
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self::Verbatim(text.into())
    }

    /// Creates a function call.
    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call(FunctionCall::new(name, args))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Infix(Infix {
            left: Box::new(self),
            op,
            right: Box::new(right),
        })
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Returns true for literal values, which render without parentheses in
    /// a `DEFAULT` clause.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<FunctionCall> for Expr {
    fn from(call: FunctionCall) -> Self {
        Self::Call(call)
    }
}
