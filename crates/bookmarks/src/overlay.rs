//! The custom-tag overlay: bookmark URL to ordered custom tag list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{BookmarksError, Result};

/// Custom tags keyed by bookmark URL.
///
/// Persisted as a JSON object of `url -> [tag, ...]`. Bookmarks sharing a
/// URL share one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomTagOverlay {
    entries: BTreeMap<String, Vec<String>>,
}

impl CustomTagOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a stored value. An absent or null value is an empty overlay.
    pub fn from_value(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value).map_err(|error| {
                BookmarksError::Serialization(format!("invalid custom tag overlay: {error}"))
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(url, tags)| (url.clone(), Value::from(tags.clone())))
                .collect(),
        )
    }

    /// Tags for a URL, empty when the URL has no entry.
    pub fn tags_for(&self, url: &str) -> &[String] {
        self.entries.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Stores tags for a URL. An empty list removes the entry.
    pub fn set(&mut self, url: &str, tags: Vec<String>) {
        if tags.is_empty() {
            self.entries.remove(url);
        } else {
            self.entries.insert(url.to_string(), tags);
        }
    }

    pub fn remove(&mut self, url: &str) -> Option<Vec<String>> {
        self.entries.remove(url)
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for CustomTagOverlay {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
