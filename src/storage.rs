//! # Record Collection Storage
//!
//! Persists the accumulated question records as one pretty-printed JSON
//! document. Every save is a full snapshot that replaces the previous one: the
//! snapshot is written to a sibling temporary file first and then renamed over
//! the target, so readers never observe a half-written collection.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::question::Question;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the snapshot file
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("questions.json"),
        }
    }
}

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, StorageError>;

/// Snapshot storage for question records
#[derive(Debug, Clone, Default)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new storage with custom configuration
    pub fn with_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create a new storage writing to `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::with_config(StorageConfig { path: path.into() })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Sibling file the snapshot is staged in before the rename
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "questions.json".into());
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }

    /// Creates necessary directories for storage
    async fn ensure_directories(&self) -> io::Result<()> {
        let parent = self
            .config
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Replace the snapshot with the given records
    pub async fn save(&self, questions: &[Question]) -> Result<()> {
        self.ensure_directories().await?;

        let json = serde_json::to_string_pretty(questions)?;
        let staging = self.staging_path();
        fs::write(&staging, json).await?;
        fs::rename(&staging, &self.config.path).await?;

        debug!(
            "Saved {} questions to {}",
            questions.len(),
            self.config.path.display()
        );
        Ok(())
    }

    /// Load the current snapshot
    pub async fn load(&self) -> Result<Vec<Question>> {
        let json = fs::read_to_string(&self.config.path).await?;
        Ok(serde_json::from_str(&json)?)
    }
}
