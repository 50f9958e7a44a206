//! Application state owned by the state machine.

use std::sync::Arc;

use bubblestitch_core::{ColorId, Pattern};
use serde::{Deserialize, Serialize};

use crate::history::History;

/// Editing versus row-by-row crocheting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Design,
    Work,
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Design => write!(f, "Design"),
            Self::Work => write!(f, "Work"),
        }
    }
}

/// Root of the in-memory model.
///
/// Only the reducer produces new states; everything else reads through the
/// accessors. Cloning is cheap since patterns are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationState {
    pub(crate) pattern: Arc<Pattern>,
    pub(crate) selected_color_id: Option<ColorId>,
    pub(crate) mode: AppMode,
    pub(crate) history: History,
}

impl ApplicationState {
    /// Session start state: a fresh default pattern in design mode with the
    /// first palette color selected.
    pub fn new() -> Self {
        Self::with_pattern(Pattern::default())
    }

    /// Start state around an existing pattern.
    pub fn with_pattern(pattern: Pattern) -> Self {
        let selected_color_id = pattern.palette.first().map(|c| c.id);
        Self {
            pattern: Arc::new(pattern),
            selected_color_id,
            mode: AppMode::Design,
            history: History::new(),
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Shared handle to the current pattern, for persistence.
    pub fn pattern_arc(&self) -> Arc<Pattern> {
        Arc::clone(&self.pattern)
    }

    pub fn selected_color_id(&self) -> Option<ColorId> {
        self.selected_color_id
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_count()
    }

    /// Whether `other` holds the very same pattern value (not just an equal one).
    pub fn shares_pattern(&self, other: &ApplicationState) -> bool {
        Arc::ptr_eq(&self.pattern, &other.pattern)
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new()
    }
}
