//! Fixed hexagonal grid geometry.
//!
//! The bubble layout has [`TOTAL_ROWS`] rows. Even rows hold nine bubbles,
//! odd rows hold eight and sit half a bubble to the right, so every row
//! nests into the gaps of its neighbours.

use serde::{Deserialize, Serialize};

/// Number of rows in every pattern.
pub const TOTAL_ROWS: usize = 27;

/// Bubbles in an even row.
pub const EVEN_ROW_LENGTH: usize = 9;

/// Bubbles in an odd row.
pub const ODD_ROW_LENGTH: usize = 8;

/// Length of the widest row.
pub const MAX_ROW_LENGTH: usize = EVEN_ROW_LENGTH;

/// Neighbour offsets `(d_row, d_col)` for cells in even rows.
const EVEN_ROW_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Neighbour offsets `(d_row, d_col)` for cells in odd rows.
const ODD_ROW_OFFSETS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// A `(row, col)` position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate lies on the grid.
    pub fn is_valid(&self) -> bool {
        is_valid_cell(self.row, self.col)
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of bubbles in `row`.
///
/// Only rows below [`TOTAL_ROWS`] exist; callers must check the row first
/// (or use [`try_row_length`]).
pub fn row_length(row: usize) -> usize {
    debug_assert!(row < TOTAL_ROWS, "row {row} outside 0..{TOTAL_ROWS}");
    if row % 2 == 0 {
        EVEN_ROW_LENGTH
    } else {
        ODD_ROW_LENGTH
    }
}

/// Number of bubbles in `row`, or `None` for rows that do not exist.
pub fn try_row_length(row: usize) -> Option<usize> {
    (row < TOTAL_ROWS).then(|| row_length(row))
}

/// Total number of bubbles on the grid (230).
pub fn total_cell_count() -> usize {
    (0..TOTAL_ROWS).map(row_length).sum()
}

/// Whether `(row, col)` addresses an existing bubble.
pub fn is_valid_cell(row: usize, col: usize) -> bool {
    try_row_length(row).is_some_and(|len| col < len)
}

/// Cells adjacent to `(row, col)`, in offset-table order.
///
/// Interior cells have six neighbours; cells on the edge have fewer since
/// the grid does not wrap. Returns an empty list for coordinates that are
/// not on the grid.
pub fn neighbors(row: usize, col: usize) -> Vec<CellCoord> {
    if !is_valid_cell(row, col) {
        return Vec::new();
    }

    let offsets = if row % 2 == 0 {
        &EVEN_ROW_OFFSETS
    } else {
        &ODD_ROW_OFFSETS
    };

    offsets
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            is_valid_cell(r, c).then_some(CellCoord::new(r, c))
        })
        .collect()
}

/// Iterates every coordinate on the grid in row-major order.
pub fn all_cells() -> impl Iterator<Item = CellCoord> {
    (0..TOTAL_ROWS).flat_map(|row| (0..row_length(row)).map(move |col| CellCoord::new(row, col)))
}
