//! In-memory pattern store.

use std::collections::HashMap;

use async_trait::async_trait;
use bubblestitch_core::Pattern;
use parking_lot::RwLock;

use crate::error::StorageResult;
use crate::store::{sort_newest_first, PatternStore};

/// Pattern store backed by process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryPatternStore {
    current: RwLock<Option<Pattern>>,
    patterns: RwLock<HashMap<String, Pattern>>,
}

impl MemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `pattern` as the current pattern.
    pub fn with_current(pattern: Pattern) -> Self {
        let store = Self::new();
        store
            .patterns
            .write()
            .insert(pattern.id.clone(), pattern.clone());
        *store.current.write() = Some(pattern);
        store
    }

    /// Number of id-keyed patterns held.
    pub fn len(&self) -> usize {
        self.patterns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.read().is_empty()
    }
}

#[async_trait]
impl PatternStore for MemoryPatternStore {
    async fn save_current(&self, pattern: &Pattern) -> StorageResult<()> {
        self.patterns
            .write()
            .insert(pattern.id.clone(), pattern.clone());
        *self.current.write() = Some(pattern.clone());
        Ok(())
    }

    async fn load_current(&self) -> StorageResult<Option<Pattern>> {
        Ok(self.current.read().clone())
    }

    async fn load(&self, id: &str) -> StorageResult<Option<Pattern>> {
        Ok(self.patterns.read().get(id).cloned())
    }

    async fn load_all(&self) -> StorageResult<Vec<Pattern>> {
        let mut patterns: Vec<Pattern> = self.patterns.read().values().cloned().collect();
        sort_newest_first(&mut patterns);
        Ok(patterns)
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        Ok(self.patterns.write().remove(id).is_some())
    }
}
