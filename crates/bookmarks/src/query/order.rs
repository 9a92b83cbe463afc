//! Ordering of filtered bookmark records.

use std::cmp::Ordering;

use crate::types::{BookmarkRecord, SortOrder};

use super::matcher::SearchQueryMatcher;

/// Sorts records in place.
///
/// Title and url compare case-insensitively in ascending order. Date is
/// numeric and newest first, with undated records last. The sort is stable,
/// so ties keep tree order.
pub fn sort_records(records: &mut [BookmarkRecord], order: SortOrder) {
    match order {
        SortOrder::Title => {
            records.sort_by_cached_key(|record| record.title.to_lowercase());
        }
        SortOrder::Url => {
            records.sort_by_cached_key(|record| record.url.to_lowercase());
        }
        SortOrder::Date => records.sort_by(|left, right| compare_dates(left.date, right.date)),
    }
}

fn compare_dates(left: Option<u64>, right: Option<u64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters records with a raw search string and orders the result.
pub fn filter_bookmarks(
    records: &[BookmarkRecord],
    search: &str,
    order: SortOrder,
    case_sensitive: bool,
) -> Vec<BookmarkRecord> {
    let matcher = SearchQueryMatcher::compile(search, case_sensitive);
    let mut matched = records
        .iter()
        .filter(|record| matcher.matches(record))
        .cloned()
        .collect::<Vec<_>>();
    sort_records(&mut matched, order);
    matched
}
