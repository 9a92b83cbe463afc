//! Key-value overlay store interface and implementations.

mod bus;
mod file;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::Result;

pub use bus::ChangeBus;
pub use file::FileOverlayStore;
pub use memory::MemoryOverlayStore;

/// A change to one key of an overlay store.
///
/// Delivered for every write, including writes made by the subscriber itself.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

#[async_trait]
pub trait OverlayStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    fn subscribe(&self) -> broadcast::Receiver<StorageChange>;
}

pub type SharedOverlayStore = Arc<dyn OverlayStore>;
