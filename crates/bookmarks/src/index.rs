//! Bookmark index: the flat, tag-annotated record set.
//!
//! ## Module Structure
//!
//! - `flatten` - Tree traversal producing records with folder and overlay tags
//! - `manager` - Main API (`BookmarkIndex`) and overlay synchronization
//! - `state` - Index lifecycle state

mod flatten;
mod manager;
mod state;


pub use flatten::flatten_tree;
pub use manager::{BookmarkChanges, BookmarkIndex, IndexStatus};
pub use state::IndexState;
