//! Formula AST types

/// Binary operators, in evaluation (not precedence) form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
///
/// Unary plus is a no-op and is dropped by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

/// A parsed formula expression
///
/// The bracket form `[a, b]` is sugar for `triangular(a, b)` and is desugared
/// to a [`Expr::Function`] node at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Variable reference (a cell id, resolved through the evaluation context)
    Variable(String),
    /// Function call
    Function { name: String, args: Vec<Expr> },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}
