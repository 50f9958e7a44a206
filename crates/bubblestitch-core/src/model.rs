//! Pattern data model.
//!
//! A [`Pattern`] is the full document: grid, palette, work progress and
//! metadata. Its serialized form is the persisted form.

mod cell;
mod grid;
mod palette;
mod pattern;

pub use cell::{Cell, ColorId};
pub use grid::Grid;
pub use palette::{default_palette, PaletteColor};
pub use pattern::{Pattern, Progress, DEFAULT_PATTERN_NAME};
