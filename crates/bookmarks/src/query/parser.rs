//! Backward-scan parser for field-qualified search strings.

use std::collections::BTreeMap;

use super::expression::{QueryExpression, IMPLICIT_FIELD};

/// Parser for `field:pattern` search strings.
///
/// The scan runs from the last character to the first. A `:` means that
/// everything accumulated so far is a field pattern and that the characters
/// to its left, up to the next space, name the field. Leftover text becomes
/// the `title` pattern once any qualifier exists, otherwise the whole input
/// is an unscoped pattern.
///
/// Parsing is total: every input string yields an expression.
pub struct QueryParser {
    fields: BTreeMap<String, String>,
    // Both buffers hold characters in reverse order.
    pattern: Vec<char>,
    field: Option<Vec<char>>,
    has_expressions: bool,
}

impl QueryParser {
    pub fn parse(input: &str) -> QueryExpression {
        let mut parser = Self {
            fields: BTreeMap::new(),
            pattern: Vec::new(),
            field: None,
            has_expressions: false,
        };
        for ch in input.chars().rev() {
            parser.push(ch);
        }
        parser.finish()
    }

    fn push(&mut self, ch: char) {
        if ch == ':' {
            // A second ':' before a space restarts the field name.
            self.field = Some(Vec::new());
            return;
        }

        if ch == ' ' && self.field.is_some() {
            self.commit_field();
            return;
        }

        match self.field.as_mut() {
            Some(name) => name.push(ch),
            None => self.pattern.push(ch),
        }
    }

    fn commit_field(&mut self) {
        let Some(name) = self.field.take() else {
            return;
        };
        // Later captures sit further left in the input and overwrite.
        self.fields
            .insert(collect_reversed(&name), collect_reversed(&self.pattern));
        self.pattern.clear();
        self.has_expressions = true;
    }

    fn finish(mut self) -> QueryExpression {
        if self.field.is_some() {
            self.commit_field();
            return QueryExpression::Fields(self.fields);
        }

        let leftover = collect_reversed(&self.pattern);
        if self.has_expressions {
            self.fields.insert(IMPLICIT_FIELD.to_string(), leftover);
            QueryExpression::Fields(self.fields)
        } else {
            QueryExpression::Unscoped(leftover)
        }
    }
}

fn collect_reversed(chars: &[char]) -> String {
    chars.iter().rev().collect()
}

/// Builds the search string that selects bookmarks carrying `tag`.
pub fn tag_query(tag: &str) -> String {
    format!("tag:{tag}")
}
