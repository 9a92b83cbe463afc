//! Query matcher for bookmark records.

use crate::types::BookmarkRecord;

use super::context::RecordQueryContext;
use super::expression::{lowercase_query_expression, QueryExpression};
use super::parser::QueryParser;

/// A compiled search matcher.
#[derive(Debug, Clone)]
pub struct SearchQueryMatcher {
    expression: QueryExpression,
    case_sensitive: bool,
}

impl SearchQueryMatcher {
    /// Compiles a raw search string into a matcher.
    pub fn compile(raw_query: &str, case_sensitive: bool) -> Self {
        Self::from_expression(QueryParser::parse(raw_query), case_sensitive)
    }

    pub fn from_expression(expression: QueryExpression, case_sensitive: bool) -> Self {
        let expression = if case_sensitive {
            expression
        } else {
            lowercase_query_expression(expression)
        };
        Self {
            expression,
            case_sensitive,
        }
    }

    pub fn matches(&self, record: &BookmarkRecord) -> bool {
        if self.expression.is_empty() {
            return true;
        }

        let context = RecordQueryContext::new(record, self.case_sensitive);
        match &self.expression {
            QueryExpression::Unscoped(pattern) => context.any_contains(pattern),
            // Unknown fields never match; an empty pattern on a known field always does.
            QueryExpression::Fields(fields) => fields.iter().all(|(field, pattern)| {
                context.field_contains(field, pattern).unwrap_or(false)
            }),
        }
    }
}
