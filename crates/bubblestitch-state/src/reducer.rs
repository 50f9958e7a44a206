//! The pattern reducer.
//!
//! Every call returns a new [`ApplicationState`]; the input is left as is.
//! Actions whose guard fails return an unchanged copy of the input.

use std::sync::Arc;

use bubblestitch_core::{
    default_palette, Cell, CellCoord, ColorId, PaletteColor, Pattern, TOTAL_ROWS,
};
use chrono::{DateTime, Utc};

use crate::action::Action;
use crate::state::ApplicationState;

/// Applies `action` to `state`, stamping edits with the current time.
pub fn reduce(state: &ApplicationState, action: Action) -> ApplicationState {
    reduce_at(state, action, Utc::now())
}

/// Applies `action` to `state`, stamping edits with `now`.
pub fn reduce_at(state: &ApplicationState, action: Action, now: DateTime<Utc>) -> ApplicationState {
    let name = action.name();
    match action {
        Action::SetCellColor { row, col } => {
            let Some(color_id) = paint_color(state) else {
                return ignore(state, name, "no palette color selected");
            };
            edit(state, name, now, |p| {
                p.grid.set(CellCoord::new(row, col), Cell::Colored(color_id))
            })
        }

        Action::ClearCell { row, col } => edit(state, name, now, |p| {
            p.grid.set(CellCoord::new(row, col), Cell::Empty)
        }),

        Action::FillRow { row } => {
            let Some(color_id) = paint_color(state) else {
                return ignore(state, name, "no palette color selected");
            };
            edit(state, name, now, |p| {
                p.grid.fill_row(row, Cell::Colored(color_id))
            })
        }

        Action::FloodFill { row, col } => {
            let Some(color_id) = paint_color(state) else {
                return ignore(state, name, "no palette color selected");
            };
            edit(state, name, now, |p| {
                let region = p.grid.connected_region(CellCoord::new(row, col));
                for coord in &region {
                    p.grid.set(*coord, Cell::Colored(color_id));
                }
                !region.is_empty()
            })
        }

        Action::SetSelectedColor { color_id } => ApplicationState {
            selected_color_id: color_id,
            ..state.clone()
        },

        Action::AddColor { name: color_name, display_value } => {
            if color_name.trim().is_empty() {
                return ignore(state, name, "empty color name");
            }
            let Some(id) = state.pattern.next_color_id() else {
                return ignore(state, name, "color ids exhausted");
            };
            let mut pattern = (*state.pattern).clone();
            let display_order = pattern.palette.len() as u32;
            tracing::debug!("Added color {} ({})", id, color_name);
            pattern
                .palette
                .push(PaletteColor::new(id, color_name, display_value, display_order));
            pattern.touch(now);
            ApplicationState {
                pattern: Arc::new(pattern),
                selected_color_id: Some(id),
                ..state.clone()
            }
        }

        Action::RemoveColor { color_id } => {
            if !state.pattern.has_color(color_id) {
                return ignore(state, name, "color not in palette");
            }
            let mut next = edit(state, name, now, |p| {
                p.palette.retain(|c| c.id != color_id);
                p.grid.replace_all(Cell::Colored(color_id), Cell::Empty);
                true
            });
            if next.selected_color_id == Some(color_id) {
                next.selected_color_id = next.pattern.palette.first().map(|c| c.id);
            }
            next
        }

        Action::SetMode { mode } => ApplicationState {
            mode,
            ..state.clone()
        },

        Action::AdvanceRow => {
            if state.pattern.progress.current_row >= TOTAL_ROWS - 1 {
                return ignore(state, name, "already on the last row");
            }
            edit(state, name, now, |p| {
                let row = p.progress.current_row;
                let Some(done) = p.progress.completed_rows.get_mut(row) else {
                    return false;
                };
                *done = true;
                p.progress.current_row = row + 1;
                true
            })
        }

        Action::DecrementRow => {
            if state.pattern.progress.current_row == 0 {
                return ignore(state, name, "already on the first row");
            }
            edit(state, name, now, |p| {
                let row = p.progress.current_row - 1;
                let Some(done) = p.progress.completed_rows.get_mut(row) else {
                    return false;
                };
                *done = false;
                p.progress.current_row = row;
                true
            })
        }

        Action::Undo => {
            let mut history = state.history.clone();
            match history.undo(state.pattern_arc()) {
                Some(previous) => {
                    tracing::debug!(
                        "Undo: {} undo / {} redo left",
                        history.undo_count(),
                        history.redo_count()
                    );
                    ApplicationState {
                        pattern: previous,
                        history,
                        ..state.clone()
                    }
                }
                None => ignore(state, name, "undo stack is empty"),
            }
        }

        Action::Redo => {
            let mut history = state.history.clone();
            match history.redo(state.pattern_arc()) {
                Some(next) => {
                    tracing::debug!(
                        "Redo: {} undo / {} redo left",
                        history.undo_count(),
                        history.redo_count()
                    );
                    ApplicationState {
                        pattern: next,
                        history,
                        ..state.clone()
                    }
                }
                None => ignore(state, name, "redo stack is empty"),
            }
        }

        Action::SetPatternName { name: new_name } => {
            let mut pattern = (*state.pattern).clone();
            pattern.name = new_name;
            pattern.touch(now);
            ApplicationState {
                pattern: Arc::new(pattern),
                ..state.clone()
            }
        }

        Action::Restore { pattern } | Action::LoadPattern { pattern } => {
            if let Err(e) = pattern.validate() {
                tracing::warn!("Ignoring {}: invalid pattern {}: {}", name, pattern.id, e);
                return state.clone();
            }
            replace(state, *pattern)
        }

        Action::NewPattern => replace(state, Pattern::new_at(default_palette(), now)),
    }
}

/// Selected color, if it can be painted with.
fn paint_color(state: &ApplicationState) -> Option<ColorId> {
    state
        .selected_color_id
        .filter(|id| state.pattern.has_color(*id))
}

/// Runs an undoable edit on a copy of the current pattern.
///
/// `apply` returns `false` when the edit does not apply (for example an
/// off-grid coordinate); the state is then returned unchanged and no
/// history is recorded.
fn edit<F>(state: &ApplicationState, name: &str, now: DateTime<Utc>, apply: F) -> ApplicationState
where
    F: FnOnce(&mut Pattern) -> bool,
{
    let mut pattern = (*state.pattern).clone();
    if !apply(&mut pattern) {
        return ignore(state, name, "target is outside the pattern");
    }
    pattern.touch(now);

    let mut history = state.history.clone();
    history.record(state.pattern_arc());

    ApplicationState {
        pattern: Arc::new(pattern),
        history,
        ..state.clone()
    }
}

/// Swaps in a whole, already validated pattern and starts a new history.
fn replace(state: &ApplicationState, pattern: Pattern) -> ApplicationState {
    let selected_color_id = state
        .selected_color_id
        .filter(|id| pattern.has_color(*id))
        .or_else(|| pattern.palette.first().map(|c| c.id));

    let mut history = state.history.clone();
    history.clear();

    ApplicationState {
        pattern: Arc::new(pattern),
        selected_color_id,
        history,
        ..state.clone()
    }
}

fn ignore(state: &ApplicationState, action: &str, reason: &str) -> ApplicationState {
    tracing::debug!("Ignoring {}: {}", action, reason);
    state.clone()
}
