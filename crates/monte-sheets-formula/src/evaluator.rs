//! Formula evaluator
//!
//! Evaluates formula ASTs to sample vectors against a per-call environment.
//!
//! The environment (variable resolver and function registry) is passed
//! explicitly on every call via [`EvaluationContext`]; the evaluator keeps no
//! state of its own, so recursive evaluations (cell A referencing cell B
//! referencing cell C) cannot interfere with each other.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse_expression;
use crate::value::{apply_binary, apply_unary, Samples};

/// A variable resolver: maps a name to its sample vector.
///
/// `Ok(None)` means the name is unknown (the evaluator turns this into
/// [`FormulaError::UnknownVariable`]); an `Err` propagates unchanged, which is
/// how cycle errors travel up from a recursive cell evaluation.
pub type VariableResolver<'a> = dyn Fn(&str) -> FormulaResult<Option<Samples>> + 'a;

/// Per-call environment for formula evaluation
pub struct EvaluationContext<'a> {
    /// Resolver for variable references; `None` means no variables resolve
    pub variables: Option<&'a VariableResolver<'a>>,
    /// Function table for call expressions; `None` means no functions resolve
    pub functions: Option<&'a FunctionRegistry>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context with a variable resolver and function registry
    pub fn new(
        variables: &'a VariableResolver<'a>,
        functions: &'a FunctionRegistry,
    ) -> Self {
        Self {
            variables: Some(variables),
            functions: Some(functions),
        }
    }

    /// Create a context in which no variables or functions resolve
    /// (pure arithmetic only)
    pub fn empty() -> Self {
        Self {
            variables: None,
            functions: None,
        }
    }
}

/// Evaluate a parsed expression to a sample vector
pub fn evaluate(expr: &Expr, ctx: &EvaluationContext) -> FormulaResult<Samples> {
    match expr {
        Expr::Number(n) => Ok(vec![*n]),

        Expr::Variable(name) => evaluate_variable(name, ctx),

        Expr::Function { name, args } => evaluate_function(name, args, ctx),

        Expr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx),

        Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),
    }
}

/// Parse and evaluate an expression string in one step
pub fn evaluate_text(expr: &str, ctx: &EvaluationContext) -> FormulaResult<Samples> {
    let ast = parse_expression(expr)?;
    evaluate(&ast, ctx)
}

fn evaluate_variable(name: &str, ctx: &EvaluationContext) -> FormulaResult<Samples> {
    let resolver = ctx
        .variables
        .ok_or_else(|| FormulaError::UnknownVariable(name.to_string()))?;

    resolver(name)?.ok_or_else(|| FormulaError::UnknownVariable(name.to_string()))
}

fn evaluate_unary_op(
    op: UnaryOperator,
    operand: &Expr,
    ctx: &EvaluationContext,
) -> FormulaResult<Samples> {
    let val = evaluate(operand, ctx)?;
    Ok(apply_unary(op, &val))
}

fn evaluate_binary_op(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    ctx: &EvaluationContext,
) -> FormulaResult<Samples> {
    let left_val = evaluate(left, ctx)?;
    let right_val = evaluate(right, ctx)?;
    apply_binary(op, &left_val, &right_val)
}

fn evaluate_function(
    name: &str,
    args: &[Expr],
    ctx: &EvaluationContext,
) -> FormulaResult<Samples> {
    let registry = ctx
        .functions
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    let func = registry
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    // Check argument count
    if args.len() < func.min_args {
        return Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(FormulaError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {}", max),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate(arg, ctx)?);
    }

    // Call the function; failures inside it are wrapped with its name
    (func.implementation)(&evaluated_args).map_err(|e| FormulaError::in_function(name, e))
}
