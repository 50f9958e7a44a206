//! # Bubble Stitch Core
//!
//! Core types and utilities for Bubble Stitch.
//! Provides the fixed hexagonal grid geometry, the pattern data model,
//! error types and the event bus used to observe state changes.

pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod model;

pub use error::{Error, PatternError, Result};

pub use event_bus::{
    AppEvent, EventBus, EventCategory, EventFilter, StateEvent, StorageEvent, SubscriptionId,
    RECEIVER_CAPACITY,
};

pub use geometry::{
    is_valid_cell, neighbors, row_length, total_cell_count, try_row_length, CellCoord,
    MAX_ROW_LENGTH, TOTAL_ROWS,
};

pub use model::{
    default_palette, Cell, ColorId, Grid, PaletteColor, Pattern, Progress, DEFAULT_PATTERN_NAME,
};
