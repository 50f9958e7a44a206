//! Actions accepted by the state machine.
//!
//! The serialized form is the dispatch vocabulary shared with the UI:
//! `{"type": "SET_CELL_COLOR", "row": 0, "col": 3}`.

use bubblestitch_core::{ColorId, Pattern};
use serde::{Deserialize, Serialize};

use crate::state::AppMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Paint one bubble with the selected color.
    SetCellColor { row: usize, col: usize },
    ClearCell { row: usize, col: usize },
    /// Paint a whole row with the selected color.
    FillRow { row: usize },
    /// Paint the connected same-valued region around a bubble.
    FloodFill { row: usize, col: usize },
    SetSelectedColor {
        #[serde(default)]
        color_id: Option<ColorId>,
    },
    AddColor {
        name: String,
        #[serde(alias = "hexValue")]
        display_value: String,
    },
    /// Remove a palette color and clear every bubble using it.
    RemoveColor { color_id: ColorId },
    SetMode { mode: AppMode },
    /// Finish the current row and move to the next.
    AdvanceRow,
    /// Step back to the previous row and un-mark it.
    DecrementRow,
    Undo,
    Redo,
    SetPatternName { name: String },
    /// Replace the pattern with a persisted one at session start.
    Restore { pattern: Box<Pattern> },
    NewPattern,
    /// Switch to another saved pattern.
    LoadPattern { pattern: Box<Pattern> },
}

impl Action {
    /// Decodes a wire action.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Wire name of the action, e.g. `"ADVANCE_ROW"`.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCellColor { .. } => "SET_CELL_COLOR",
            Action::ClearCell { .. } => "CLEAR_CELL",
            Action::FillRow { .. } => "FILL_ROW",
            Action::FloodFill { .. } => "FLOOD_FILL",
            Action::SetSelectedColor { .. } => "SET_SELECTED_COLOR",
            Action::AddColor { .. } => "ADD_COLOR",
            Action::RemoveColor { .. } => "REMOVE_COLOR",
            Action::SetMode { .. } => "SET_MODE",
            Action::AdvanceRow => "ADVANCE_ROW",
            Action::DecrementRow => "DECREMENT_ROW",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::SetPatternName { .. } => "SET_PATTERN_NAME",
            Action::Restore { .. } => "RESTORE",
            Action::NewPattern => "NEW_PATTERN",
            Action::LoadPattern { .. } => "LOAD_PATTERN",
        }
    }

    pub fn restore(pattern: Pattern) -> Self {
        Action::Restore {
            pattern: Box::new(pattern),
        }
    }

    pub fn load_pattern(pattern: Pattern) -> Self {
        Action::LoadPattern {
            pattern: Box::new(pattern),
        }
    }
}
