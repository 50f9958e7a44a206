//! Bubble Stitch Session Crate
//!
//! [`StateHost`] owns the live application state, applies actions in
//! dispatch order, notifies observers and persists the current pattern in
//! the background.

pub mod host;
mod writer;

pub use host::StateHost;
