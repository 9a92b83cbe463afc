//! Query expression types.

use std::collections::BTreeMap;

/// Field that receives leftover free text once any qualifier is present.
pub const IMPLICIT_FIELD: &str = "title";

/// A parsed search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpression {
    /// Matches when any record field contains the pattern.
    Unscoped(String),
    /// Matches when every listed field contains its pattern.
    Fields(BTreeMap<String, String>),
}

impl QueryExpression {
    /// Returns true for the empty unscoped expression, which matches everything.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Unscoped(pattern) if pattern.is_empty())
    }

    /// Returns the pattern for a field of a mapping expression.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Unscoped(_) => None,
            Self::Fields(fields) => fields.get(name).map(String::as_str),
        }
    }
}

impl Default for QueryExpression {
    fn default() -> Self {
        Self::Unscoped(String::new())
    }
}

/// Lowercases every pattern for case-insensitive matching.
///
/// Field names are left untouched; they must name record fields exactly.
pub fn lowercase_query_expression(expression: QueryExpression) -> QueryExpression {
    match expression {
        QueryExpression::Unscoped(pattern) => {
            QueryExpression::Unscoped(pattern.to_lowercase())
        }
        QueryExpression::Fields(fields) => QueryExpression::Fields(
            fields
                .into_iter()
                .map(|(name, pattern)| (name, pattern.to_lowercase()))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_patterns_not_field_names() {
        let expression = QueryExpression::Fields(BTreeMap::from([(
            "Tag".to_string(),
            "RuSt".to_string(),
        )]));
        let lowered = lowercase_query_expression(expression);
        assert_eq!(lowered.field("Tag"), Some("rust"));
        assert_eq!(lowered.field("tag"), None);
    }

    #[test]
    fn only_empty_unscoped_is_empty() {
        assert!(QueryExpression::default().is_empty());
        assert!(!QueryExpression::Unscoped(" ".to_string()).is_empty());
        assert!(!QueryExpression::Fields(BTreeMap::new()).is_empty());
    }
}
