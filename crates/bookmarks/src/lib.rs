//! Searchable, tag-augmented view over a bookmark tree.
//!
//! This crate provides:
//! - Field-qualified search parsing (`tag:rust docs`) and record matching
//! - Flattening of a bookmark tree into records tagged by folder path
//! - A custom-tag overlay kept in a key-value store and synchronized
//!   across instances through change notifications

pub mod config;
pub mod error;
pub mod index;
pub mod overlay;
pub mod query;
pub mod storage;
pub mod tree;
pub mod types;

// Re-export main types
pub use config::{load_index_config, IndexConfig, DEFAULT_OVERLAY_KEY};
pub use error::{BookmarksError, Result};
pub use index::{BookmarkChanges, BookmarkIndex, IndexState, IndexStatus};
pub use overlay::CustomTagOverlay;
pub use query::{filter_bookmarks, tag_query, QueryExpression, QueryParser, SearchQueryMatcher};
pub use storage::{
    FileOverlayStore, MemoryOverlayStore, OverlayStore, SharedOverlayStore, StorageChange,
};
pub use tree::{BookmarkTree, MemoryBookmarkTree, SharedBookmarkTree};
pub use types::{BookmarkRecord, SortOrder, Tag, TreeNode};
