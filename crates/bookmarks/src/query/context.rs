//! Per-record match context.

use crate::types::BookmarkRecord;

/// Searchable field values computed once per record.
///
/// Values are lowercased when matching is case-insensitive so that the
/// already-lowercased expression can be compared by plain containment.
pub struct RecordQueryContext {
    id: String,
    title: String,
    url: String,
    date: Option<String>,
    tags: Vec<String>,
}

impl RecordQueryContext {
    pub fn new(record: &BookmarkRecord, case_sensitive: bool) -> Self {
        let fold = |value: &str| {
            if case_sensitive {
                value.to_string()
            } else {
                value.to_lowercase()
            }
        };
        Self {
            id: fold(&record.id),
            title: fold(&record.title),
            url: fold(&record.url),
            date: record.date.map(|date| date.to_string()),
            tags: record.tag.iter().map(|tag| fold(&tag.text)).collect(),
        }
    }

    /// Checks one named field. Returns `None` for a field records do not have.
    pub fn field_contains(&self, field: &str, pattern: &str) -> Option<bool> {
        let matched = match field {
            "id" => self.id.contains(pattern),
            "title" => self.title.contains(pattern),
            "url" => self.url.contains(pattern),
            "date" => self
                .date
                .as_deref()
                .is_some_and(|date| date.contains(pattern)),
            "tag" => self.tags.iter().any(|tag| tag.contains(pattern)),
            _ => return None,
        };
        Some(matched)
    }

    pub fn any_contains(&self, pattern: &str) -> bool {
        ["id", "title", "url", "date", "tag"]
            .iter()
            .any(|field| self.field_contains(field, pattern) == Some(true))
    }
}
