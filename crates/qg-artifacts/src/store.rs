use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::InputError;

/// File boundary of the pipeline. Relative paths resolve against the store root.
pub trait ArtifactStore: Send + Sync {
    fn resolve(&self, path: &Path) -> PathBuf;
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> std::result::Result<String, InputError>;
    /// Creates parent directories and replaces the file wholesale.
    fn write_text(&self, path: &Path, text: &str) -> Result<PathBuf>;
    fn append_text(&self, path: &Path, text: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct FsArtifactStore {
    pub root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ArtifactStore for FsArtifactStore {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_text(&self, path: &Path) -> std::result::Result<String, InputError> {
        let full = self.resolve(path);
        match std::fs::read_to_string(&full) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(InputError::Missing { path: full }),
            Err(source) => Err(InputError::Io { path: full, source }),
        }
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<PathBuf> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
        }
        std::fs::write(&full, text).with_context(|| format!("write {}", full.display()))?;
        debug!(path = %full.display(), bytes = text.len(), "artifact written");
        Ok(full)
    }

    fn append_text(&self, path: &Path, text: &str) -> Result<()> {
        let full = self.resolve(path);
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .with_context(|| format!("open {} for append", full.display()))?;
        f.write_all(text.as_bytes()).with_context(|| format!("append {}", full.display()))?;
        Ok(())
    }
}

pub fn read_json_value(store: &dyn ArtifactStore, path: &Path) -> std::result::Result<Value, InputError> {
    read_json(store, path)
}

pub fn read_json<T: DeserializeOwned>(store: &dyn ArtifactStore, path: &Path) -> std::result::Result<T, InputError> {
    let text = store.read_text(path)?;
    serde_json::from_str(&text).map_err(|e| InputError::Parse { path: store.resolve(path), message: e.to_string() })
}

/// `None` when the file is absent; other input errors propagate.
pub fn read_json_optional<T: DeserializeOwned>(
    store: &dyn ArtifactStore,
    path: &Path,
) -> std::result::Result<Option<T>, InputError> {
    match read_json(store, path) {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_missing() => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn write_json<T: Serialize + ?Sized>(store: &dyn ArtifactStore, path: &Path, value: &T) -> Result<PathBuf> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    store.write_text(path, &text)
}
