//! Cell evaluation engine
//!
//! Pull-based evaluation of cells against their namespace, with cycle
//! detection. A cell's value is recomputed from its formula text on every
//! read; formula cells are evaluated with a variable resolver that recursively
//! evaluates the referenced cells.
//!
//! Cycle safety: the top-level call owns an in-progress set of cell ids on the
//! active recursive path. Re-entering an id already in the set fails with
//! [`FormulaError::CycleDetected`] instead of recursing further. The set is
//! created per call and discarded when the top-level evaluation returns, so
//! separately initiated evaluations never share guard state.
//!
//! # Example
//!
//! ```rust
//! use monte_sheets::prelude::*;
//!
//! let mut ns = Namespace::new(10, 8);
//! ns.set_formula(&CellId::parse("A1").unwrap(), "10").unwrap();
//! ns.set_formula(&CellId::parse("A2").unwrap(), "=A1*2+1").unwrap();
//!
//! let value = ns.evaluate_cell(&CellId::parse("A2").unwrap()).unwrap();
//! assert_eq!(value, Value::Samples(vec![21.0]));
//! ```

use std::cell::RefCell;

use ahash::AHashSet;
use monte_sheets_core::{Cell, CellId, CellKind, DisplayOptions, Namespace};
use monte_sheets_formula::{
    evaluate_text, sampling_registry, EvaluationContext, FormulaError, FormulaResult, Samples,
    Value,
};

/// Rendered form of a cycle failure, surfaced verbatim by `display_value`
const CYCLE_MESSAGE: &str = "Error: Cycle detected";

/// Extension trait adding cell evaluation to [`Namespace`]
pub trait NamespaceEvaluationExt {
    /// Evaluate the cell with the given id.
    ///
    /// Fails with [`FormulaError::UnknownCell`] if the id is not present and
    /// [`FormulaError::CycleDetected`] if evaluation re-enters a cell already
    /// on the active path. All other formula failures fold into
    /// [`Value::Error`] so that one broken cell never stops its neighbors
    /// from evaluating.
    fn evaluate_cell(&self, id: &CellId) -> FormulaResult<Value>;

    /// The display string for a cell: blank for empty values, text unchanged,
    /// numeric values reduced to the arithmetic mean of their samples and
    /// formatted per the cell's display options.
    ///
    /// Cycles render as `"Error: Cycle detected"`. Fails only for unknown
    /// ids.
    fn display_value(&self, id: &CellId) -> FormulaResult<String>;
}

impl NamespaceEvaluationExt for Namespace {
    fn evaluate_cell(&self, id: &CellId) -> FormulaResult<Value> {
        let in_progress = RefCell::new(AHashSet::new());
        evaluate_cell_guarded(self, id, &in_progress)
    }

    fn display_value(&self, id: &CellId) -> FormulaResult<String> {
        let options = self
            .get(id)
            .map(|cell| cell.display_options.clone())
            .ok_or_else(|| FormulaError::UnknownCell(id.to_string()))?;

        match self.evaluate_cell(id) {
            Ok(value) => Ok(render_value(&value, &options)),
            Err(FormulaError::CycleDetected(_)) => Ok(CYCLE_MESSAGE.to_string()),
            Err(e) => Err(e),
        }
    }
}

/// Evaluate a cell while tracking the active recursive path in `in_progress`.
fn evaluate_cell_guarded(
    ns: &Namespace,
    id: &CellId,
    in_progress: &RefCell<AHashSet<CellId>>,
) -> FormulaResult<Value> {
    let cell = ns
        .get(id)
        .ok_or_else(|| FormulaError::UnknownCell(id.to_string()))?;

    if !in_progress.borrow_mut().insert(id.clone()) {
        return Err(FormulaError::CycleDetected(id.to_string()));
    }

    let result = derive_value(ns, cell, in_progress);
    in_progress.borrow_mut().remove(id);
    result
}

/// Derive a cell's value from its formula text.
fn derive_value(
    ns: &Namespace,
    cell: &Cell,
    in_progress: &RefCell<AHashSet<CellId>>,
) -> FormulaResult<Value> {
    match cell.kind() {
        CellKind::Empty => Ok(Value::Empty),
        CellKind::Number => match cell.as_number() {
            Some(n) => Ok(Value::scalar(n)),
            None => Ok(Value::Text(cell.formula().to_string())),
        },
        CellKind::Text => Ok(Value::Text(cell.formula().to_string())),
        CellKind::Formula => {
            let body = cell.formula().strip_prefix('=').unwrap_or(cell.formula());
            evaluate_formula(ns, body, in_progress)
        }
    }
}

/// Evaluate a formula body with cell references resolving through the
/// namespace and the sampling functions in scope.
fn evaluate_formula(
    ns: &Namespace,
    body: &str,
    in_progress: &RefCell<AHashSet<CellId>>,
) -> FormulaResult<Value> {
    let resolve = |name: &str| resolve_reference(ns, name, in_progress);
    let ctx = EvaluationContext::new(&resolve, sampling_registry());

    match evaluate_text(body, &ctx) {
        Ok(samples) => Ok(Value::Samples(samples)),
        // Cycles propagate structurally so the top-level caller sees the kind
        Err(e @ FormulaError::CycleDetected(_)) => Err(e),
        // Everything else becomes an error value
        Err(e) => Ok(Value::Error(render_error(&e))),
    }
}

/// Resolve a variable reference to the referenced cell's sample vector.
fn resolve_reference(
    ns: &Namespace,
    name: &str,
    in_progress: &RefCell<AHashSet<CellId>>,
) -> FormulaResult<Option<Samples>> {
    // Names that are not well-formed cell ids are simply unknown variables
    let id = match CellId::parse(name) {
        Ok(id) => id,
        Err(_) => return Ok(None),
    };

    match evaluate_cell_guarded(ns, &id, in_progress) {
        Ok(Value::Samples(v)) if !v.is_empty() => Ok(Some(v)),
        // Empty referenced cells count as zero
        Ok(Value::Samples(_)) | Ok(Value::Empty) => Ok(Some(vec![0.0])),
        Ok(Value::Text(_)) | Ok(Value::Error(_)) => Err(FormulaError::Evaluation(format!(
            "cell {} is not a number",
            name
        ))),
        Err(FormulaError::UnknownCell(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn render_error(e: &FormulaError) -> String {
    match e {
        FormulaError::CycleDetected(_) => CYCLE_MESSAGE.to_string(),
        other => format!("Error: {}", other),
    }
}

fn render_value(value: &Value, options: &DisplayOptions) -> String {
    match value {
        Value::Empty => String::new(),
        Value::Text(s) => s.clone(),
        Value::Error(s) => s.clone(),
        Value::Samples(v) if v.is_empty() => String::new(),
        Value::Samples(v) => {
            let mean = v.iter().sum::<f64>() / v.len() as f64;
            format_number(mean, options.decimal_places)
        }
    }
}

/// Format a number for display.
///
/// With `decimal_places` set, ties round half away from zero (`f64::round`
/// semantics), so `2.5` at zero decimal places displays as `"3"`. Without it,
/// the shortest round-trip form of the number is used.
pub fn format_number(n: f64, decimal_places: Option<u32>) -> String {
    match decimal_places {
        Some(dp) => {
            let scale = 10f64.powi(dp as i32);
            let rounded = (n * scale).round() / scale;
            format!("{:.*}", dp as usize, rounded)
        }
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_number_rounding() {
        assert_eq!(format_number(2.5, Some(1)), "2.5");
        assert_eq!(format_number(2.5, Some(0)), "3");
        assert_eq!(format_number(-2.5, Some(0)), "-3");
        assert_eq!(format_number(2.4449, Some(2)), "2.44");
        assert_eq!(format_number(2.5, None), "2.5");
        assert_eq!(format_number(7.0, None), "7");
    }

    #[test]
    fn test_render_value() {
        let plain = DisplayOptions::default();
        assert_eq!(render_value(&Value::Empty, &plain), "");
        assert_eq!(render_value(&Value::Text("hi".into()), &plain), "hi");
        assert_eq!(
            render_value(&Value::Samples(vec![1.0, 2.0, 3.0]), &plain),
            "2"
        );

        let one_dp = DisplayOptions {
            decimal_places: Some(1),
        };
        assert_eq!(
            render_value(&Value::Samples(vec![1.0, 2.0]), &one_dp),
            "1.5"
        );
    }
}
