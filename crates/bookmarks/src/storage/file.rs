use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use super::{ChangeBus, OverlayStore, StorageChange};
use crate::error::{BookmarksError, Result};

/// Overlay store keeping one JSON file per key under `root`.
///
/// Change notifications only cover writes made through this handle; share
/// one `Arc<FileOverlayStore>` between indexes that must observe each other.
#[derive(Debug, Clone)]
pub struct FileOverlayStore {
    root: PathBuf,
    bus: ChangeBus,
}

impl FileOverlayStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            bus: ChangeBus::default(),
        }
    }

    fn build_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        let mut filename = key.to_string();
        if !filename.ends_with(".json") {
            filename.push_str(".json");
        }
        Ok(self.root.join(filename))
    }

    async fn read_path(path: &Path) -> Result<Option<Value>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(BookmarksError::SourceUnavailable(format!(
                    "failed to read overlay file {}: {error}",
                    path.display()
                )))
            }
        };
        let value = serde_json::from_slice(&bytes).map_err(|error| {
            BookmarksError::Serialization(format!(
                "failed to parse overlay file {}: {error}",
                path.display()
            ))
        })?;
        Ok(Some(value))
    }
}

#[async_trait]
impl OverlayStore for FileOverlayStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.build_path(key)?;
        Self::read_path(&path).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.build_path(key)?;
        let old_value = Self::read_path(&path).await.unwrap_or_else(|error| {
            log::warn!("replacing unreadable overlay file: {error}");
            None
        });

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|error| {
                BookmarksError::SourceUnavailable(format!(
                    "failed to create overlay directory {}: {error}",
                    self.root.display()
                ))
            })?;
        let serialized = serde_json::to_vec_pretty(&value)?;
        tokio::fs::write(&path, serialized)
            .await
            .map_err(|error| {
                BookmarksError::SourceUnavailable(format!(
                    "failed to write overlay file {}: {error}",
                    path.display()
                ))
            })?;

        self.bus.publish(StorageChange {
            key: key.to_string(),
            old_value,
            new_value: Some(value),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.bus.subscribe()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(BookmarksError::InvalidInput(format!(
            "invalid storage key {key}"
        )));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(BookmarksError::InvalidInput(format!(
            "invalid storage key {key}"
        )));
    }
    Ok(())
}
