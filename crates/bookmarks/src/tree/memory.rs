use async_trait::async_trait;
use parking_lot::Mutex;

use super::BookmarkTree;
use crate::error::{BookmarksError, Result};
use crate::types::TreeNode;

/// Bookmark tree held in memory.
#[derive(Debug, Default)]
pub struct MemoryBookmarkTree {
    root: Mutex<TreeNode>,
}

impl MemoryBookmarkTree {
    pub fn new(root: TreeNode) -> Self {
        Self {
            root: Mutex::new(root),
        }
    }

    /// Parses a tree from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self> {
        let root: TreeNode = serde_json::from_str(raw)?;
        Ok(Self::new(root))
    }

    pub fn snapshot(&self) -> TreeNode {
        self.root.lock().clone()
    }
}

#[async_trait]
impl BookmarkTree for MemoryBookmarkTree {
    async fn get_tree(&self) -> Result<TreeNode> {
        Ok(self.snapshot())
    }

    async fn rename(&self, id: &str, title: &str) -> Result<()> {
        let mut root = self.root.lock();
        let node = find_node_mut(&mut root, id)
            .ok_or_else(|| BookmarksError::BookmarkNotFound(id.to_string()))?;
        node.title = Some(title.to_string());
        Ok(())
    }

    async fn remove_leaf(&self, id: &str) -> Result<()> {
        let mut root = self.root.lock();
        let mut stack = vec![&mut *root];
        while let Some(node) = stack.pop() {
            let Some(children) = node.children.as_mut() else {
                continue;
            };
            if let Some(position) = children.iter().position(|child| child.id == id) {
                if !children[position].is_leaf() {
                    return Err(BookmarksError::InvalidInput(format!(
                        "bookmark {id} is a folder"
                    )));
                }
                children.remove(position);
                return Ok(());
            }
            stack.extend(children.iter_mut());
        }
        Err(BookmarksError::BookmarkNotFound(id.to_string()))
    }
}

fn find_node_mut<'a>(root: &'a mut TreeNode, id: &str) -> Option<&'a mut TreeNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            stack.extend(children.iter_mut());
        }
    }
    None
}
