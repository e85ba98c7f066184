use async_trait::async_trait;
use scribe_common::protocol::Action;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access action store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid action log: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence for the action log. The recorder never depends on one.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Load the stored log. An absent log loads as empty.
    async fn load(&self) -> Result<Vec<Action>, StoreError>;

    /// Replace the stored log with `actions`.
    async fn save(&self, actions: &[Action]) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Stores the log as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct FileActionStore {
    path: PathBuf,
}

impl FileActionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ActionStore for FileActionStore {
    async fn load(&self) -> Result<Vec<Action>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let actions: Vec<Action> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = actions.len(), "Loaded action log");
        Ok(actions)
    }

    async fn save(&self, actions: &[Action]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(actions)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), count = actions.len(), "Saved action log");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
