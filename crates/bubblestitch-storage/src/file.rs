//! JSON file pattern store.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/current-pattern.json
//! <data_dir>/patterns/<id>.json
//! ```
//!
//! Files are written to a sibling `.tmp` file first and renamed into place,
//! so a crash mid-write leaves the previous version intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bubblestitch_core::Pattern;
use tokio::fs;

use crate::error::{StorageError, StorageResult};
use crate::store::{sort_newest_first, PatternStore};

const CURRENT_FILE: &str = "current-pattern.json";
const PATTERNS_DIR: &str = "patterns";
const EXTENSION: &str = "json";

/// Pattern store writing one JSON document per slot.
#[derive(Debug, Clone)]
pub struct FilePatternStore {
    root: PathBuf,
}

impl FilePatternStore {
    /// Store rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    fn patterns_dir(&self) -> PathBuf {
        self.root.join(PATTERNS_DIR)
    }

    fn pattern_path(&self, id: &str) -> StorageResult<PathBuf> {
        validate_id(id)?;
        Ok(self.patterns_dir().join(format!("{}.{}", id, EXTENSION)))
    }
}

/// Ids become file names, so only a conservative character set is allowed.
fn validate_id(id: &str) -> StorageResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

async fn write_atomic(path: &Path, content: &str) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Reads and validates a pattern, treating a missing file as `None`.
async fn read_pattern(path: &Path) -> StorageResult<Option<Pattern>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let pattern: Pattern = serde_json::from_str(&content)?;
    pattern.validate()?;
    Ok(Some(pattern))
}

#[async_trait]
impl PatternStore for FilePatternStore {
    async fn save_current(&self, pattern: &Pattern) -> StorageResult<()> {
        let path = self.pattern_path(&pattern.id)?;
        let content = serde_json::to_string_pretty(pattern)?;
        write_atomic(&path, &content).await?;
        write_atomic(&self.current_path(), &content).await?;
        tracing::debug!("Saved pattern {} to {}", pattern.id, self.root.display());
        Ok(())
    }

    async fn load_current(&self) -> StorageResult<Option<Pattern>> {
        read_pattern(&self.current_path()).await
    }

    async fn load(&self, id: &str) -> StorageResult<Option<Pattern>> {
        read_pattern(&self.pattern_path(id)?).await
    }

    async fn load_all(&self) -> StorageResult<Vec<Pattern>> {
        let mut entries = match fs::read_dir(self.patterns_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut patterns = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            match read_pattern(&path).await {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping unreadable pattern {}: {}", path.display(), e),
            }
        }
        sort_newest_first(&mut patterns);
        Ok(patterns)
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        match fs::remove_file(self.pattern_path(id)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
