//! Bookmark record types shared by the index and the query matcher.

use serde::{Deserialize, Serialize};

/// A single tag attached to a bookmark.
///
/// Folder-derived tags have `custom == false` and are regenerated on every
/// rebuild. Tags with `custom == true` come from the overlay store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    pub custom: bool,
}

impl Tag {
    pub fn folder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            custom: false,
        }
    }

    pub fn custom(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            custom: true,
        }
    }
}

/// A flattened bookmark leaf with its tag list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Creation time in epoch milliseconds, when the tree source reports one.
    pub date: Option<u64>,
    pub tag: Vec<Tag>,
}

impl BookmarkRecord {
    /// Drops every custom tag, keeping folder-derived tags in order.
    pub fn retain_folder_tags(&mut self) {
        self.tag.retain(|tag| !tag.custom);
    }

    /// Appends the given overlay tags as custom tags.
    pub fn push_custom_tags<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>) {
        self.tag.extend(tags.into_iter().map(Tag::custom));
    }

    /// Replaces the custom portion of the tag list.
    pub fn replace_custom_tags(&mut self, tags: &[String]) {
        self.retain_folder_tags();
        self.push_custom_tags(tags);
    }

    pub fn custom_tags(&self) -> impl Iterator<Item = &str> {
        self.tag
            .iter()
            .filter(|tag| tag.custom)
            .map(|tag| tag.text.as_str())
    }
}

/// A node of the hierarchical bookmark tree as the tree source reports it.
///
/// A node is a leaf iff `url` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn folder(id: impl Into<String>, title: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: None,
            date_added: None,
            children: Some(children),
        }
    }

    pub fn leaf(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: Some(url.into()),
            date_added: None,
            children: None,
        }
    }

    pub fn with_date_added(mut self, date_added: u64) -> Self {
        self.date_added = Some(date_added);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.url.is_some()
    }
}

// Drops descendants from an explicit stack so that deep trees do not
// exhaust the thread stack. The derived `Clone` and serde impls still
// recurse per level.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let Some(children) = self.children.take() else {
            return;
        };
        let mut stack = children;
        while let Some(mut node) = stack.pop() {
            if let Some(children) = node.children.take() {
                stack.extend(children);
            }
        }
    }
}

/// Sort order applied to a filtered record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Title,
    Date,
    Url,
}
