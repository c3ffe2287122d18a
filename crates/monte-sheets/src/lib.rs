//! # monte-sheets
//!
//! A Monte Carlo spreadsheet engine. Cells hold small arithmetic formulas
//! over vector-valued results: plain numbers are length-1 sample vectors, and
//! the built-in distribution functions (`triangular`, `uniform`, `beta`,
//! `normal`, `lognormal`) draw fresh 10,000-sample vectors on every
//! evaluation. Arithmetic is element-wise with length-1 broadcasting.
//!
//! Cells reference each other by id (`A1`, `B2`, ...); evaluation is
//! pull-based and recursive, with per-call cycle detection.
//!
//! ## Example
//!
//! ```rust
//! use monte_sheets::prelude::*;
//!
//! let mut ns = Namespace::new(10, 8);
//! let a1 = CellId::parse("A1").unwrap();
//! let a2 = CellId::parse("A2").unwrap();
//! let a3 = CellId::parse("A3").unwrap();
//!
//! ns.set_formula(&a1, "100").unwrap();
//! ns.set_formula(&a2, "=A1*2").unwrap();
//! ns.set_formula(&a3, "=triangular(A1, A2)").unwrap();
//!
//! assert_eq!(ns.display_value(&a2).unwrap(), "200");
//!
//! // A3 is a fresh Monte Carlo draw on [100, 200]
//! let samples = match ns.evaluate_cell(&a3).unwrap() {
//!     Value::Samples(v) => v,
//!     other => panic!("expected samples, got {:?}", other),
//! };
//! assert_eq!(samples.len(), 10_000);
//! ```

pub mod engine;
pub mod prelude;

pub use engine::{format_number, NamespaceEvaluationExt};

// Re-export core types
pub use monte_sheets_core::{Cell, CellId, CellKind, DisplayOptions, Namespace};

// Re-export formula types
pub use monte_sheets_formula::{
    evaluate, evaluate_text, parse_expression, sampling_registry, EvaluationContext, Expr,
    FormulaError, FormulaResult, FunctionRegistry, Samples, Value, SAMPLE_COUNT,
};
