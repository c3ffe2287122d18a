//! The namespace: a fixed-size grid of cells keyed by [`CellId`]
//!
//! Cells can reference other cells in the same namespace by id. Every
//! (row, column) pair in range is present from construction; cells live for
//! the lifetime of the namespace.

use ahash::AHashMap;

use crate::cell::Cell;
use crate::cell_id::CellId;
use crate::error::{Error, Result};

/// A grid of cells addressable by [`CellId`].
#[derive(Debug)]
pub struct Namespace {
    row_count: u32,
    column_count: u16,
    cells: AHashMap<CellId, Cell>,
}

impl Namespace {
    /// Create a namespace with all cells in range present and empty.
    pub fn new(row_count: u32, column_count: u16) -> Self {
        let mut cells =
            AHashMap::with_capacity(row_count as usize * column_count as usize);
        for row in 0..row_count {
            for col in 0..column_count {
                cells.insert(CellId::new(row, col), Cell::new());
            }
        }
        Self {
            row_count,
            column_count,
            cells,
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> u16 {
        self.column_count
    }

    /// Look up a cell by id
    pub fn get(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Look up a cell mutably by id
    pub fn get_mut(&mut self, id: &CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    /// Whether the namespace contains the given id
    pub fn contains(&self, id: &CellId) -> bool {
        self.cells.contains_key(id)
    }

    /// Set the formula text of a cell
    pub fn set_formula(&mut self, id: &CellId, formula: &str) -> Result<()> {
        let cell = self
            .cells
            .get_mut(id)
            .ok_or_else(|| Error::UnknownCell(id.to_string()))?;
        cell.set_formula(formula);
        Ok(())
    }

    /// Iterate over all cell ids (order unspecified)
    pub fn cell_ids(&self) -> impl Iterator<Item = &CellId> {
        self.cells.keys()
    }
}
