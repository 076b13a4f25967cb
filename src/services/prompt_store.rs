// src/services/prompt_store.rs
// Saved prompts, kept as one JSON array under a fixed namespace.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::message::{NewPrompt, SavedPrompt};

pub const PROMPTS_NAMESPACE: &str = "ai-buddy-prompts";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt prompt blob at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct PromptStore {
    path: PathBuf,
    // Serialises read-modify-write cycles.
    lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for PromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStore")
            .field("path", &self.path)
            .finish()
    }
}

impl PromptStore {
    /// Store living at `<data_dir>/ai-buddy-prompts.json`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::at(data_dir.as_ref().join(format!("{PROMPTS_NAMESPACE}.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every saved prompt, in insertion order.
    pub async fn list(&self) -> Result<Vec<SavedPrompt>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// Case-insensitive match on title or content, optionally narrowed to a
    /// category. A category of `"all"` matches everything.
    pub async fn search(
        &self,
        term: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<SavedPrompt>, StoreError> {
        let term = term.map(str::to_lowercase).unwrap_or_default();
        let category = category.filter(|c| !c.is_empty() && *c != "all");

        let prompts = self.list().await?;
        Ok(prompts
            .into_iter()
            .filter(|p| {
                term.is_empty()
                    || p.title.to_lowercase().contains(&term)
                    || p.content.to_lowercase().contains(&term)
            })
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect())
    }

    /// Append a prompt with a fresh id and creation time.
    pub async fn save(&self, prompt: NewPrompt) -> Result<SavedPrompt, StoreError> {
        let _guard = self.lock.lock().await;
        let mut prompts = self.read_all().await?;

        let saved = SavedPrompt {
            id: Uuid::new_v4().to_string(),
            category: prompt.category().to_string(),
            title: prompt.title,
            content: prompt.content,
            created_at: Utc::now(),
        };
        prompts.push(saved.clone());
        self.write_all(&prompts).await?;

        debug!(id = %saved.id, total = prompts.len(), "prompt saved");
        Ok(saved)
    }

    /// Remove the prompt with this id. Returns false if there was none.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut prompts = self.read_all().await?;

        let before = prompts.len();
        prompts.retain(|p| p.id != id);
        if prompts.len() == before {
            return Ok(false);
        }
        self.write_all(&prompts).await?;

        debug!(%id, total = prompts.len(), "prompt deleted");
        Ok(true)
    }

    async fn read_all(&self) -> Result<Vec<SavedPrompt>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, prompts: &[SavedPrompt]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_vec_pretty(prompts).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the blob, then swap it in.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
