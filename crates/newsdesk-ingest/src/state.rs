//! Processed-entry state, persisted as a JSON array of entry ids.
//!
//! The file is the pipeline's only memory between runs. Loading is
//! forgiving (a missing or corrupt file just means every entry looks
//! new), while saving is strict: the list is written to a sibling temp
//! file and renamed into place, so a crash mid-save never leaves a
//! truncated state file behind.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::IngestError;

/// Loads and replaces the processed-entry id list.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the processed-entry ids.
    ///
    /// A missing file is the normal first-run case and yields an empty
    /// list with a warning. A file that exists but does not parse as a
    /// JSON string array also yields an empty list, logged as an error
    /// because the next save will overwrite whatever was there.
    pub fn load(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<Vec<String>>(&text) {
                Ok(ids) => ids,
                Err(error) => {
                    tracing::error!(
                        path = %self.path.display(),
                        %error,
                        "state file is malformed, treating every entry as new"
                    );
                    Vec::new()
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "state file not found, starting with empty state"
                );
                Vec::new()
            }
            Err(error) => {
                tracing::error!(
                    path = %self.path.display(),
                    %error,
                    "state file unreadable, treating every entry as new"
                );
                Vec::new()
            }
        }
    }

    /// Replaces the state file with the given ids.
    ///
    /// Duplicates are dropped while preserving first-seen order. The
    /// write goes to `<file>.tmp` first and is renamed over the real
    /// path, so concurrent readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::State`] if the temp file cannot be written
    /// or renamed, or [`IngestError::StateEncode`] if the ids cannot be
    /// serialized.
    pub fn save(&self, ids: &[String]) -> Result<(), IngestError> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();
        let body = serde_json::to_vec_pretty(&unique)?;

        let tmp = self.temp_path();
        fs::write(&tmp, &body).map_err(|source| IngestError::State {
            path: tmp.display().to_string(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| IngestError::State {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut tmp_name = name.to_os_string();
                tmp_name.push(".tmp");
                self.path.with_file_name(tmp_name)
            }
            None => self.path.with_extension("tmp"),
        }
    }
}
