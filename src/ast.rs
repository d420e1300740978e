use std::{fmt, rc::Rc};

use crate::interpreter::lexer::Position;

/// Renders a syntax tree as an indented outline.
pub mod printer;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code. Strings are reference counted so that evaluating a literal
/// does not copy its text.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A numeric literal. Integers and reals share one representation.
    Number(f64),
    /// A string literal.
    Str(Rc<str>),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every construct is an expression and evaluates to exactly one value. Each
/// variant carries the source position used in error reports.
///
/// The bodies of `if` branches and `while` loops are always
/// [`Expr::Block`] nodes; the parser wraps single-expression bodies, so every
/// branch and every iteration gets its own scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal {
        value:    LiteralValue,
        position: Position,
    },
    /// A variable reference.
    Identifier {
        name:     String,
        position: Position,
    },
    /// `target := value` or `target =: value`.
    Assignment {
        target:   AssignTarget,
        op:       AssignOperator,
        value:    Box<Expr>,
        position: Position,
    },
    /// A binary operation such as `a + b` or `a and b`.
    BinaryOp {
        left:     Box<Expr>,
        op:       BinaryOperator,
        right:    Box<Expr>,
        position: Position,
    },
    /// A chain of two or more comparisons of one precedence level, such as
    /// `a < b <= c`. It holds if every adjacent pair holds, and each operand
    /// is evaluated at most once.
    Comparison {
        first:    Box<Expr>,
        links:    Vec<ComparisonLink>,
        position: Position,
    },
    /// `-x`, `+x` or `not x`.
    UnaryOp {
        op:       UnaryOperator,
        operand:  Box<Expr>,
        position: Position,
    },
    /// `#x`, the length of a string or list.
    Length {
        operand:  Box<Expr>,
        position: Position,
    },
    /// `...x`, only valid as an element of a list literal or argument list.
    Spread {
        operand:  Box<Expr>,
        position: Position,
    },
    /// `{ a; b; c }`, evaluated in a fresh scope.
    Block {
        body:     Vec<Expr>,
        position: Position,
    },
    /// `if (c1) b1 elif (c2) b2 else b3`.
    If {
        branches:    Vec<ConditionalBranch>,
        else_branch: Option<Box<Expr>>,
        position:    Position,
    },
    /// `while (condition) body`.
    While {
        condition: Box<Expr>,
        body:      Box<Expr>,
        position:  Position,
    },
    /// `function(a, b) body`. Parameters and body are shared with every
    /// closure created from this literal.
    Function {
        params:   Rc<[String]>,
        body:     Rc<Expr>,
        position: Position,
    },
    /// `callee(arguments)`.
    Call {
        callee:    Box<Expr>,
        arguments: Vec<Expr>,
        position:  Position,
    },
    /// `collection[index]`.
    Index {
        collection: Box<Expr>,
        index:      Box<Expr>,
        position:   Position,
    },
    /// `[a, b, ...c]`.
    List {
        elements: Vec<Expr>,
        position: Position,
    },
}

impl Expr {
    /// Returns the source position of this node.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Assignment { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Comparison { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::Length { position, .. }
            | Self::Spread { position, .. }
            | Self::Block { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::Function { position, .. }
            | Self::Call { position, .. }
            | Self::Index { position, .. }
            | Self::List { position, .. } => *position,
        }
    }

    /// Short human readable name of the construct, used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "a literal",
            Self::Identifier { .. } => "a variable",
            Self::Assignment { .. } => "an assignment",
            Self::BinaryOp { .. } => "a binary expression",
            Self::Comparison { .. } => "a comparison chain",
            Self::UnaryOp { .. } => "a unary expression",
            Self::Length { .. } => "a length expression",
            Self::Spread { .. } => "a spread expression",
            Self::Block { .. } => "a block",
            Self::If { .. } => "an if expression",
            Self::While { .. } => "a while loop",
            Self::Function { .. } => "a function literal",
            Self::Call { .. } => "a function call",
            Self::Index { .. } => "an index expression",
            Self::List { .. } => "a list literal",
        }
    }
}

/// One `condition => body` arm of an [`Expr::If`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body:      Expr,
}

/// One `op operand` step of an [`Expr::Comparison`], compared against the
/// operand before it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonLink {
    pub op:       BinaryOperator,
    pub operand:  Expr,
    pub position: Position,
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// A plain variable name.
    Name(String),
    /// An element of a list, `collection[index]`.
    Index {
        collection: Box<Expr>,
        index:      Box<Expr>,
    },
    /// A destructuring pattern such as `[a, ...rest, b]`. With `=:` the
    /// pattern is first read back as a list to produce the old value.
    Pattern(Vec<PatternElement>),
}

/// One element of a destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// Receives exactly one value.
    Single(AssignTarget),
    /// `...target`, receives the surplus values as a new list.
    Rest(AssignTarget),
}

/// The two assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    /// `:=`, evaluates to the new value.
    Define,
    /// `=:`, evaluates to the value being replaced.
    Swap,
}

/// Represents all supported binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `<<`, on integers
    ShiftLeft,
    /// `>>`, on integers
    ShiftRight,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `and`
    And,
    /// `or`
    Or,
}

/// Represents all supported prefix operators except `#` and `...`, which have
/// their own nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `+`, the identity on numbers
    Plus,
    /// `not`
    Not,
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Define => ":=",
                        Self::Swap => "=:",
                    })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Add => "+",
                        Self::Sub => "-",
                        Self::Mul => "*",
                        Self::Div => "/",
                        Self::FloorDiv => "//",
                        Self::Mod => "%",
                        Self::Pow => "**",
                        Self::ShiftLeft => "<<",
                        Self::ShiftRight => ">>",
                        Self::Equal => "==",
                        Self::NotEqual => "!=",
                        Self::Less => "<",
                        Self::LessEqual => "<=",
                        Self::Greater => ">",
                        Self::GreaterEqual => ">=",
                        Self::And => "and",
                        Self::Or => "or",
                    })
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Negate => "-",
                        Self::Plus => "+",
                        Self::Not => "not",
                    })
    }
}
