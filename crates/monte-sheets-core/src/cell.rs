//! Cell data structures
//!
//! A [`Cell`] holds only its raw formula text and display options; everything
//! else (its kind, its value) is derived. The value derivation itself lives in
//! the `monte-sheets` crate, which owns the evaluation engine.

/// The kind of content in a cell, computed from its formula text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Empty formula text
    Empty,
    /// Formula text parses as a finite number
    Number,
    /// Formula text starts with '='
    Formula,
    /// Anything else
    Text,
}

/// Display options for a cell, set by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayOptions {
    /// Number of decimal places to round the displayed value to.
    /// `None` means the unrounded default textual form.
    pub decimal_places: Option<u32>,
}

/// A cell in the grid: raw formula text plus display options.
///
/// The formula text is the single source of truth; `kind()` re-classifies it
/// on every call, so there is no state to keep in sync when the UI mutates
/// the formula.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    formula: String,
    /// Display options (decimal places), owned by the UI layer.
    pub display_options: DisplayOptions,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with the given formula text
    pub fn with_formula(formula: &str) -> Self {
        Self {
            formula: formula.to_string(),
            display_options: DisplayOptions::default(),
        }
    }

    /// The raw formula text
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Replace the formula text
    pub fn set_formula(&mut self, formula: &str) {
        self.formula = formula.to_string();
    }

    /// Classify the cell from its formula text:
    /// empty string, finite number, `=`-prefixed formula, or plain text.
    pub fn kind(&self) -> CellKind {
        if self.formula.is_empty() {
            return CellKind::Empty;
        }
        if self.formula.starts_with('=') {
            return CellKind::Formula;
        }
        match self.formula.parse::<f64>() {
            Ok(n) if n.is_finite() => CellKind::Number,
            _ => CellKind::Text,
        }
    }

    /// The formula text parsed as a number, if this is a number cell
    pub fn as_number(&self) -> Option<f64> {
        match self.kind() {
            CellKind::Number => self.formula.parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Cell::with_formula("").kind(), CellKind::Empty);
        assert_eq!(Cell::with_formula("42").kind(), CellKind::Number);
        assert_eq!(Cell::with_formula("3.25").kind(), CellKind::Number);
        assert_eq!(Cell::with_formula("-1.5").kind(), CellKind::Number);
        assert_eq!(Cell::with_formula("=A1+1").kind(), CellKind::Formula);
        assert_eq!(Cell::with_formula("hello").kind(), CellKind::Text);
        assert_eq!(Cell::with_formula("1.2.3").kind(), CellKind::Text);
    }

    #[test]
    fn test_infinite_literal_is_text() {
        // f64 parses "inf", but a cell holding it is not a number cell
        assert_eq!(Cell::with_formula("inf").kind(), CellKind::Text);
        assert_eq!(Cell::with_formula("NaN").kind(), CellKind::Text);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cell::with_formula("42").as_number(), Some(42.0));
        assert_eq!(Cell::with_formula("=42").as_number(), None);
        assert_eq!(Cell::with_formula("abc").as_number(), None);
    }

    #[test]
    fn test_set_formula_reclassifies() {
        let mut cell = Cell::with_formula("42");
        assert_eq!(cell.kind(), CellKind::Number);
        cell.set_formula("=B1");
        assert_eq!(cell.kind(), CellKind::Formula);
    }
}
