//! Bounded snapshot history for undo/redo.

use std::collections::VecDeque;
use std::sync::Arc;

use bubblestitch_core::Pattern;

/// Maximum number of snapshots kept on each stack.
pub const MAX_HISTORY_DEPTH: usize = 20;

/// Undo and redo stacks of whole-pattern snapshots.
///
/// Both stacks hold at most `max_depth` entries; pushing past that evicts
/// the oldest snapshot. Snapshots are shared `Arc`s and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    undo_stack: VecDeque<Arc<Pattern>>,
    redo_stack: VecDeque<Arc<Pattern>>,
    max_depth: usize,
}

impl History {
    /// Create a history with the default depth (20)
    pub fn new() -> Self {
        Self::with_depth(MAX_HISTORY_DEPTH)
    }

    /// Create with custom maximum depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth + 1),
            redo_stack: VecDeque::with_capacity(max_depth + 1),
            max_depth,
        }
    }

    /// Record the pattern an edit replaced. Invalidates the redo branch.
    pub fn record(&mut self, previous: Arc<Pattern>) {
        self.redo_stack.clear();
        push_bounded(&mut self.undo_stack, previous, self.max_depth);
    }

    /// Step back: returns the snapshot to make current, keeping `current`
    /// for redo. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Arc<Pattern>) -> Option<Arc<Pattern>> {
        let previous = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.max_depth);
        Some(previous)
    }

    /// Step forward again after an undo. `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Arc<Pattern>) -> Option<Arc<Pattern>> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo snapshots, oldest first.
    pub fn undo_stack(&self) -> impl Iterator<Item = &Pattern> {
        self.undo_stack.iter().map(Arc::as_ref)
    }

    /// Redo snapshots, oldest first.
    pub fn redo_stack(&self) -> impl Iterator<Item = &Pattern> {
        self.redo_stack.iter().map(Arc::as_ref)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(stack: &mut VecDeque<Arc<Pattern>>, pattern: Arc<Pattern>, max_depth: usize) {
    stack.push_back(pattern);
    while stack.len() > max_depth {
        stack.pop_front();
    }
}
