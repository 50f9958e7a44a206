use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::geometry::{self, CellCoord, TOTAL_ROWS};

/// Jagged grid of bubbles, one `Vec` per row.
///
/// A grid built with [`Grid::empty`] always has [`TOTAL_ROWS`] rows of the
/// parity-determined length, and none of the setters resize it. Grids read
/// from JSON are checked by `Pattern::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Grid with every bubble empty.
    pub fn empty() -> Self {
        let rows = (0..TOTAL_ROWS)
            .map(|row| vec![Cell::Empty; geometry::row_length(row)])
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.rows.get(coord.row)?.get(coord.col).copied()
    }

    /// Iterates `(coord, cell)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (CellCoord::new(row, col), *cell))
        })
    }

    /// Sets one bubble. Returns `false` if the coordinate is off the grid.
    pub fn set(&mut self, coord: CellCoord, cell: Cell) -> bool {
        match self
            .rows
            .get_mut(coord.row)
            .and_then(|r| r.get_mut(coord.col))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Sets every bubble of `row`. Returns `false` if the row does not exist.
    pub fn fill_row(&mut self, row: usize, cell: Cell) -> bool {
        match self.rows.get_mut(row) {
            Some(cells) => {
                cells.fill(cell);
                true
            }
            None => false,
        }
    }

    /// Replaces every occurrence of `from` with `to`, returning the count.
    pub fn replace_all(&mut self, from: Cell, to: Cell) -> usize {
        let mut replaced = 0;
        for slot in self.rows.iter_mut().flatten() {
            if *slot == from {
                *slot = to;
                replaced += 1;
            }
        }
        replaced
    }

    /// All bubbles reachable from `start` through neighbours holding the same
    /// value as `start`, in breadth-first order. Empty if `start` is off the
    /// grid.
    pub fn connected_region(&self, start: CellCoord) -> Vec<CellCoord> {
        let Some(target) = self.cell(start) else {
            return Vec::new();
        };

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut region = Vec::new();

        while let Some(coord) = queue.pop_front() {
            region.push(coord);
            for next in geometry::neighbors(coord.row, coord.col) {
                if self.cell(next) == Some(target) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        region
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
