//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Application state transitions
    State(StateEvent),
    /// Persistence outcomes
    Storage(StorageEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::State(_) => EventCategory::State,
            AppEvent::Storage(_) => EventCategory::Storage,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::State(e) => e.description(),
            AppEvent::Storage(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// State transition events.
    State,
    /// Storage events.
    Storage,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::State => write!(f, "State"),
            EventCategory::Storage => write!(f, "Storage"),
        }
    }
}

/// State transition events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateEvent {
    /// An action was applied.
    Changed {
        /// Wire name of the applied action.
        action: String,
        /// Whether the pattern itself changed (as opposed to selection/mode).
        pattern_changed: bool,
        /// Undo stack depth after the action.
        undo_depth: usize,
        /// Redo stack depth after the action.
        redo_depth: usize,
    },
    /// A persisted pattern replaced the default one at startup.
    Restored {
        /// Id of the restored pattern.
        pattern_id: String,
    },
    /// A wire action could not be decoded and was dropped.
    Ignored {
        /// Why the action was dropped.
        reason: String,
    },
}

impl StateEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            StateEvent::Changed {
                action,
                undo_depth,
                redo_depth,
                ..
            } => format!("{} (undo {}, redo {})", action, undo_depth, redo_depth),
            StateEvent::Restored { pattern_id } => format!("Restored pattern {}", pattern_id),
            StateEvent::Ignored { reason } => format!("Ignored action: {}", reason),
        }
    }
}

/// Persistence events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEvent {
    /// The current pattern was written.
    Saved {
        /// Id of the saved pattern.
        pattern_id: String,
    },
    /// Writing the current pattern failed.
    SaveFailed {
        /// Id of the pattern that was not saved.
        pattern_id: String,
        /// Error message.
        reason: String,
    },
    /// Reading from storage failed.
    LoadFailed {
        /// Error message.
        reason: String,
    },
    /// A saved pattern was deleted.
    Deleted {
        /// Id of the deleted pattern.
        pattern_id: String,
    },
}

impl StorageEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            StorageEvent::Saved { pattern_id } => format!("Saved pattern {}", pattern_id),
            StorageEvent::SaveFailed { pattern_id, reason } => {
                format!("Failed to save pattern {}: {}", pattern_id, reason)
            }
            StorageEvent::LoadFailed { reason } => format!("Failed to load: {}", reason),
            StorageEvent::Deleted { pattern_id } => format!("Deleted pattern {}", pattern_id),
        }
    }
}
