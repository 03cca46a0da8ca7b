mod model;

#[cfg(test)]
mod tests;

pub use model::{RecurrenceEntry, RecurrenceList};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data file path is empty")]
    EmptyPath,
    #[error("failed to read data file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse data file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Stateless reader for the recurrence list. Reloaded from disk on every day
/// rollover; nothing is cached between cycles.
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<RecurrenceList, StoreError> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }
        let path_str = self.path.display().to_string();
        log::info!("loading recurrence data from {}", path_str);
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: path_str.clone(),
            source,
        })?;
        let list: RecurrenceList =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path_str.clone(),
                source,
            })?;
        log::info!("loaded {} recurrence entries from {}", list.list.len(), path_str);
        Ok(list)
    }
}
