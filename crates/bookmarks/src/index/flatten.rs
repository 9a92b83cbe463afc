//! Tree flattening with folder-path tags.

use std::rc::Rc;

use crate::overlay::CustomTagOverlay;
use crate::types::{BookmarkRecord, Tag, TreeNode};

/// Flattens a bookmark tree into records in document order.
///
/// Every titled folder on the path from the root contributes one folder tag,
/// root first. Overlay tags for the leaf's URL follow. The traversal uses an
/// explicit stack, so tree depth is bounded only by memory. Cloning or
/// deserializing a `TreeNode` still recurses once per level.
pub fn flatten_tree(root: &TreeNode, overlay: &CustomTagOverlay) -> Vec<BookmarkRecord> {
    let mut records = Vec::new();
    let mut stack: Vec<(&TreeNode, Rc<[String]>)> = vec![(root, Rc::from(Vec::<String>::new()))];

    while let Some((node, ancestors)) = stack.pop() {
        if let Some(url) = node.url.as_ref() {
            let mut record = BookmarkRecord {
                id: node.id.clone(),
                title: node.title.clone().unwrap_or_default(),
                url: url.clone(),
                date: node.date_added,
                tag: ancestors.iter().map(Tag::folder).collect(),
            };
            record.push_custom_tags(overlay.tags_for(url));
            records.push(record);
            continue;
        }

        let Some(children) = node.children.as_ref() else {
            continue;
        };
        let path = match node.title.as_deref() {
            Some(title) if !title.is_empty() => {
                let mut path = ancestors.to_vec();
                path.push(title.to_string());
                Rc::from(path)
            }
            _ => ancestors,
        };
        // Reversed so that the first child is popped first.
        for child in children.iter().rev() {
            stack.push((child, path.clone()));
        }
    }

    records
}
