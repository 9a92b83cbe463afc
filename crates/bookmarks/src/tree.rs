//! Hierarchical bookmark tree interface.

mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::TreeNode;

pub use memory::MemoryBookmarkTree;

/// Reader and mutation sink for the bookmark tree.
#[async_trait]
pub trait BookmarkTree: Send + Sync {
    /// Returns the root of the tree.
    async fn get_tree(&self) -> Result<TreeNode>;
    async fn rename(&self, id: &str, title: &str) -> Result<()>;
    async fn remove_leaf(&self, id: &str) -> Result<()>;
}

pub type SharedBookmarkTree = Arc<dyn BookmarkTree>;
