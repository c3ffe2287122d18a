//! # monte-sheets-core
//!
//! Core data structures for the monte-sheets spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout monte-sheets:
//! - [`CellId`] - Cell addressing (A1 notation ↔ row/column indices)
//! - [`Cell`] and [`CellKind`] - A cell's raw formula text and its derived kind
//! - [`Namespace`] - The grid of cells, keyed by [`CellId`]
//!
//! Evaluation lives in the `monte-sheets-formula` and `monte-sheets` crates;
//! this crate is purely the data model.
//!
//! ## Example
//!
//! ```rust
//! use monte_sheets_core::{CellId, CellKind, Namespace};
//!
//! let mut ns = Namespace::new(10, 8);
//! ns.set_formula(&CellId::parse("A1").unwrap(), "42").unwrap();
//! ns.set_formula(&CellId::parse("B1").unwrap(), "=A1*2").unwrap();
//!
//! let cell = ns.get(&CellId::parse("B1").unwrap()).unwrap();
//! assert_eq!(cell.kind(), CellKind::Formula);
//! ```

pub mod cell;
pub mod cell_id;
pub mod error;
pub mod namespace;

// Re-exports for convenience
pub use cell::{Cell, CellKind, DisplayOptions};
pub use cell_id::CellId;
pub use error::{Error, Result};
pub use namespace::Namespace;
