//! In-memory overlay store.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::{ChangeBus, OverlayStore, StorageChange};
use crate::error::Result;

/// In-memory key-value store that broadcasts every write.
///
/// Several indexes sharing one `Arc<MemoryOverlayStore>` behave like several
/// windows sharing one synced store.
#[derive(Debug, Default)]
pub struct MemoryOverlayStore {
    data: Mutex<HashMap<String, Value>>,
    bus: ChangeBus,
}

impl MemoryOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without publishing a change.
    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.data.lock().insert(key.to_string(), value);
        self
    }

    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.data.lock().get(key).cloned()
    }
}

#[async_trait]
impl OverlayStore for MemoryOverlayStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let old_value = self.data.lock().insert(key.to_string(), value.clone());
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
