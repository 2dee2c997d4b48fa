//! # cadence-store — JSON file-backed state persistence.
//!
//! Implements [`StateStore`] over a single pretty-printed JSON file, the
//! format the rendering site reads directly. Saves go through a temp file
//! in the target directory followed by a rename, so a crash mid-write
//! leaves the previous state intact.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use cadence_core::error::StoreError;
use cadence_core::traits::StateStore;

/// File-backed store for one serializable state value.
///
/// The type parameter fixes the schema at the call site; a missing file
/// reads as `None` (first run), while a file that exists but fails to
/// deserialize is an error — history is never silently discarded.
pub struct JsonFileStore<S> {
    path: PathBuf,
    _state: PhantomData<fn() -> S>,
}

impl<S> JsonFileStore<S> {
    /// Create a store for the given file path. Nothing is touched on disk
    /// until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _state: PhantomData }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.display().to_string(), source }
    }

    /// Sibling temp path used during save; same directory so the final
    /// rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<S> StateStore<S> for JsonFileStore<S>
where
    S: Serialize + DeserializeOwned + Send + Sync,
{
    fn load(&self) -> Result<Option<S>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted state yet");
                return Ok(None);
            }
            Err(e) => return Err(self.io_err(e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                path: self.path.display().to_string(),
                detail: e.to_string(),
            })
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        let mut bytes = serde_json::to_vec_pretty(state).map_err(|e| StoreError::Malformed {
            path: self.path.display().to_string(),
            detail: e.to_string(),
        })?;
        bytes.push(b'\n');

        let temp = self.temp_path();
        fs::write(&temp, &bytes).map_err(|e| self.io_err(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_err(e))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "state saved");
        Ok(())
    }
}
