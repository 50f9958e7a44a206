//! Read-only helpers for the presentation layer.

use bubblestitch_core::{geometry, Cell, CellCoord, PaletteColor, Pattern, TOTAL_ROWS};

use crate::action::Action;
use crate::state::ApplicationState;

/// Bubble counts for one row, as shown above the current row in work mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSummary {
    pub row: usize,
    pub length: usize,
    /// `(color name, count)` by ascending color id; unknown ids are named "Unknown".
    pub colors: Vec<(String, usize)>,
}

impl std::fmt::Display for RowSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.colors.is_empty() {
            return write!(f, "{} empty", self.length);
        }
        let parts: Vec<String> = self
            .colors
            .iter()
            .map(|(name, count)| format!("{} {}", count, name))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl ApplicationState {
    /// Action for a tap on a bubble: clear it if it already has the selected
    /// color, paint it otherwise.
    pub fn toggle_action(&self, row: usize, col: usize) -> Action {
        let current = self.pattern.cell(CellCoord::new(row, col));
        match (current, self.selected_color_id) {
            (Some(Cell::Colored(id)), Some(selected)) if id == selected => {
                Action::ClearCell { row, col }
            }
            _ => Action::SetCellColor { row, col },
        }
    }

    pub fn selected_color(&self) -> Option<&PaletteColor> {
        self.selected_color_id.and_then(|id| self.pattern.color(id))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Work progress as a whole percentage of rows passed.
    pub fn progress_percent(&self) -> u8 {
        let ratio = self.pattern.progress.current_row as f64 / TOTAL_ROWS as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn is_last_row(&self) -> bool {
        self.pattern.progress.current_row == TOTAL_ROWS - 1
    }

    /// Summary of `row` of the current pattern, or `None` if the row does
    /// not exist.
    pub fn row_summary(&self, row: usize) -> Option<RowSummary> {
        summarize_row(&self.pattern, row)
    }
}

fn summarize_row(pattern: &Pattern, row: usize) -> Option<RowSummary> {
    let length = geometry::try_row_length(row)?;
    let colors = pattern
        .color_counts(row)
        .into_iter()
        .map(|(id, count)| {
            let name = pattern
                .color(id)
                .map_or_else(|| "Unknown".to_string(), |c| c.name.clone());
            (name, count)
        })
        .collect();
    Some(RowSummary { row, length, colors })
}
