//! Bubble Stitch pattern state machine.
//!
//! [`reduce`] turns the current [`ApplicationState`] and an [`Action`] into
//! the next state. Edits keep whole-pattern snapshots in a bounded linear
//! undo/redo history.

pub mod action;
pub mod history;
pub mod reducer;
pub mod state;
pub mod views;

pub use action::Action;
pub use history::{History, MAX_HISTORY_DEPTH};
pub use reducer::{reduce, reduce_at};
pub use state::{AppMode, ApplicationState};
pub use views::RowSummary;
