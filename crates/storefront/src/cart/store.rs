//! File-backed durable cart storage.
//!
//! A single serialized line-item sequence lives under a fixed path. The
//! public [`CartStore::load`] and [`CartStore::save`] never raise: a missing
//! file, unreadable storage, or corrupt payload degrades to an empty cart or
//! a skipped write, logged via `tracing`. The fallible `try_*` variants
//! exist for tests and diagnostics.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::aggregate::LineItem;

/// Errors that can occur while reading or writing the cart file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage is unavailable or the I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored payload is not a valid line-item sequence.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value slot holding the cart across sessions.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored item sequence.
    ///
    /// Returns an empty sequence if the file is absent, storage is
    /// unavailable, or the payload fails to parse. Never raises.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        match self.try_load() {
            Ok(items) => items,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to load stored cart, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Serialize and write `items` under the store's path.
    ///
    /// Best-effort: failures are logged and swallowed so a broken disk never
    /// surfaces through a cart operation.
    pub fn save(&self, items: &[LineItem]) {
        if let Err(e) = self.try_save(items) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to persist cart, contents will not survive restart"
            );
        }
    }

    /// Fallible load.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub fn try_load(&self) -> Result<Vec<LineItem>, StoreError> {
        let payload = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&payload)?)
    }

    /// Fallible save. Writes to a temp file in the same directory, then
    /// renames over the target so readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or any I/O step fails.
    pub fn try_save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(items)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
