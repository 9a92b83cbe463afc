use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BookmarksError, Result};
use crate::types::SortOrder;

/// Well-known overlay store key holding the custom tag mapping.
pub const DEFAULT_OVERLAY_KEY: &str = "customTags";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Store key of the custom tag overlay.
    pub overlay_key: String,
    /// Persist the overlay after `remove`, as `remove_tags` always does.
    pub write_back_on_remove: bool,
    pub case_sensitive: bool,
    pub default_order: SortOrder,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            overlay_key: DEFAULT_OVERLAY_KEY.to_string(),
            write_back_on_remove: false,
            case_sensitive: false,
            default_order: SortOrder::Title,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.overlay_key.trim().is_empty() {
            return Err(BookmarksError::InvalidInput(
                "overlay_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the index config from a JSON file, falling back to defaults when
/// the file does not exist.
pub fn load_index_config(path: &Path) -> Result<IndexConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(IndexConfig::default())
        }
        Err(error) => return Err(error.into()),
    };
    let config: IndexConfig = serde_json::from_str(&data).map_err(|error| {
        BookmarksError::Serialization(format!(
            "failed to parse index config {}: {error}",
            path.display()
        ))
    })?;
    config.validate()?;
    Ok(config)
}
