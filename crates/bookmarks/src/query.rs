//! Field-qualified search over bookmark records.
//!
//! This module provides:
//! - Expression types (unscoped text or a field-to-pattern mapping)
//! - The backward-scan parser for `field:pattern` search strings
//! - Matching of expressions against records
//! - Ordering of filtered records

mod context;
mod expression;
mod matcher;
mod order;
mod parser;

pub use expression::{QueryExpression, IMPLICIT_FIELD};
pub use matcher::SearchQueryMatcher;
pub use order::{filter_bookmarks, sort_records};
pub use parser::{tag_query, QueryParser};
