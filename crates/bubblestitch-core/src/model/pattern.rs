use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cell::{Cell, ColorId};
use super::grid::Grid;
use super::palette::{default_palette, PaletteColor};
use crate::error::{PatternError, Result};
use crate::geometry::{self, CellCoord, TOTAL_ROWS};

/// Name given to freshly created patterns.
pub const DEFAULT_PATTERN_NAME: &str = "My Pattern";

/// Work-mode progress through the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Row being crocheted, in `0..TOTAL_ROWS`.
    pub current_row: usize,
    /// One flag per row, set when the row was finished.
    pub completed_rows: Vec<bool>,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            current_row: 0,
            completed_rows: vec![false; TOTAL_ROWS],
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// A bubble pattern document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub total_rows: usize,
    pub palette: Vec<PaletteColor>,
    pub grid: Grid,
    pub progress: Progress,
}

impl Pattern {
    /// Creates an empty pattern with the given palette, stamped with the
    /// current time.
    pub fn new(palette: Vec<PaletteColor>) -> Self {
        Self::new_at(palette, Utc::now())
    }

    /// Creates an empty pattern with the given palette and creation time.
    pub fn new_at(palette: Vec<PaletteColor>, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(now),
            name: DEFAULT_PATTERN_NAME.to_string(),
            created_at: now,
            modified_at: now,
            total_rows: TOTAL_ROWS,
            palette,
            grid: Grid::empty(),
            progress: Progress::new(),
        }
    }

    /// Parses a persisted pattern and validates its shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let pattern: Self = serde_json::from_str(json)?;
        pattern.validate()?;
        Ok(pattern)
    }

    /// Serializes the pattern to its persisted form.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the fixed grid shape, the progress bounds and that every
    /// colored cell refers to a palette entry.
    pub fn validate(&self) -> std::result::Result<(), PatternError> {
        if self.total_rows != TOTAL_ROWS {
            return Err(PatternError::TotalRows {
                expected: TOTAL_ROWS,
                actual: self.total_rows,
            });
        }

        let rows = self.grid.rows();
        if rows.len() != TOTAL_ROWS {
            return Err(PatternError::RowCount {
                expected: TOTAL_ROWS,
                actual: rows.len(),
            });
        }
        for (row, cells) in rows.iter().enumerate() {
            let expected = geometry::row_length(row);
            if cells.len() != expected {
                return Err(PatternError::RowLength {
                    row,
                    expected,
                    actual: cells.len(),
                });
            }
        }

        if self.progress.completed_rows.len() != TOTAL_ROWS {
            return Err(PatternError::CompletedRowsLength {
                expected: TOTAL_ROWS,
                actual: self.progress.completed_rows.len(),
            });
        }
        if self.progress.current_row >= TOTAL_ROWS {
            return Err(PatternError::CurrentRowOutOfRange {
                row: self.progress.current_row,
                last: TOTAL_ROWS - 1,
            });
        }

        let mut ids = HashSet::with_capacity(self.palette.len());
        for color in &self.palette {
            if !ids.insert(color.id) {
                return Err(PatternError::DuplicateColorId(color.id));
            }
        }

        for (coord, cell) in self.grid.cells() {
            if let Cell::Colored(color_id) = cell {
                if !ids.contains(&color_id) {
                    return Err(PatternError::UnknownColor {
                        row: coord.row,
                        col: coord.col,
                        color_id,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn color(&self, id: ColorId) -> Option<&PaletteColor> {
        self.palette.iter().find(|c| c.id == id)
    }

    pub fn has_color(&self, id: ColorId) -> bool {
        self.color(id).is_some()
    }

    /// Id the next added color receives: one past the largest id in use,
    /// or `None` once `ColorId::MAX` is taken.
    pub fn next_color_id(&self) -> Option<ColorId> {
        match self.palette.iter().map(|c| c.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.grid.cell(coord)
    }

    /// Number of bubbles of each color in `row`, by ascending color id.
    /// Empty bubbles are not counted.
    pub fn color_counts(&self, row: usize) -> Vec<(ColorId, usize)> {
        let mut counts = BTreeMap::new();
        for cell in self.grid.row(row).unwrap_or_default() {
            if let Cell::Colored(id) = cell {
                *counts.entry(*id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    /// Marks the pattern content as changed at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now;
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(default_palette())
    }
}

/// Unique pattern id: creation time in milliseconds plus a random suffix.
fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &suffix[..9])
}
