//! File-backed session store
//!
//! Each conversation is one JSON file under the store directory. Every write
//! goes to its own temporary file in the same directory and is renamed into
//! place, so concurrent writes to one conversation never share a file and the
//! last rename wins.

use super::session::{Session, SessionStore};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sessions persisted as `<dir>/<conversation>.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Store sessions under `dir`, created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `conversation_id`
    ///
    /// Characters outside `[A-Za-z0-9-]` are replaced by `_`, so `-100:42`
    /// lives in `-100_42.json`.
    pub fn path_for(&self, conversation_id: &str) -> PathBuf {
        let stem: String = conversation_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, conversation_id: &str) -> Result<Option<Session>> {
        let path = self.path_for(conversation_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BotError::Session(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| BotError::Session(format!("Corrupted session {}: {e}", path.display())))
    }

    async fn set(&self, conversation_id: &str, session: &Session) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            BotError::Session(format!("Failed to create session directory: {e}"))
        })?;

        let path = self.path_for(conversation_id);
        let content = serde_json::to_vec_pretty(session)?;
        let dir = self.dir.clone();

        let saved = tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &content))
            .await
            .map_err(|e| BotError::Session(format!("Session write task failed: {e}")))??;

        debug!(path = %saved.display(), "Session saved");
        Ok(())
    }
}

/// Write `content` to a fresh temporary file in `dir`, then rename it to `path`
fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> Result<PathBuf> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| BotError::Session(format!("Failed to create temp file: {e}")))?;
    tmp.write_all(content)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| BotError::Session(format!("Failed to write {}: {e}", tmp.path().display())))?;
    tmp.persist(path)
        .map_err(|e| BotError::Session(format!("Failed to replace {}: {e}", path.display())))?;
    Ok(path.to_path_buf())
}
