//! Commonly used types, importable in one line:
//!
//! ```rust
//! use monte_sheets::prelude::*;
//! ```

pub use crate::engine::NamespaceEvaluationExt;
pub use monte_sheets_core::{Cell, CellId, CellKind, DisplayOptions, Namespace};
pub use monte_sheets_formula::{FormulaError, FormulaResult, Value, SAMPLE_COUNT};
