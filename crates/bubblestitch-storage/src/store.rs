//! Pattern store interface
//!
//! Storage backends keep one "current" pattern slot plus one slot per
//! pattern id.

use async_trait::async_trait;
use bubblestitch_core::Pattern;

use crate::error::StorageResult;

/// Persistence collaborator for patterns.
#[async_trait]
pub trait PatternStore: Send + Sync {
    /// Overwrite the current slot and the slot keyed by `pattern.id`.
    async fn save_current(&self, pattern: &Pattern) -> StorageResult<()>;

    /// The pattern last saved as current, if any.
    async fn load_current(&self) -> StorageResult<Option<Pattern>>;

    /// A saved pattern by id.
    async fn load(&self, id: &str) -> StorageResult<Option<Pattern>>;

    /// Every saved pattern, most recently modified first.
    async fn load_all(&self) -> StorageResult<Vec<Pattern>>;

    /// Remove a saved pattern. Returns whether it existed.
    ///
    /// The current slot is left alone even if it holds the same pattern.
    async fn delete(&self, id: &str) -> StorageResult<bool>;
}

/// Sort patterns newest first by modification time.
pub(crate) fn sort_newest_first(patterns: &mut [Pattern]) {
    patterns.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
}
