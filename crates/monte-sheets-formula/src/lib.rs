//! # monte-sheets-formula
//!
//! Formula parser and evaluator for monte-sheets.
//!
//! This crate provides:
//! - Expression parsing (text → AST)
//! - Expression evaluation (AST → sample vector), with per-call variable and
//!   function environments
//! - The vector value model with length-1 broadcasting
//! - The built-in distribution sampling functions (triangular, uniform, beta,
//!   normal, lognormal)
//!
//! ## Example
//!
//! ```rust
//! use monte_sheets_formula::{evaluate_text, EvaluationContext};
//!
//! let result = evaluate_text("(1 + 2) * (3 + 4)", &EvaluationContext::empty()).unwrap();
//! assert_eq!(result, vec![21.0]);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod value;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_text, EvaluationContext, VariableResolver};
pub use functions::{sampling_registry, FunctionDef, FunctionRegistry, SAMPLE_COUNT};
pub use parser::parse_expression;
pub use value::{Samples, Value};
