//! Tokenizing of client field lists and ordering expressions.
//!
//! Both `fields` and `orderBy` parameters are comma-separated. Each clause is
//! trimmed; its field name is everything up to the first whitespace. For
//! ordering clauses only a trailing `" desc"` marker selects the descending
//! direction, whatever else sits between the field name and the marker.

/// Literal marker selecting the descending direction (case-sensitive)
pub const DESCENDING_SUFFIX: &str = " desc";

/// Split an expression into its raw, untrimmed clauses
pub fn split_clauses(expression: &str) -> std::str::Split<'_, char> {
    expression.split(',')
}

/// Whether an expression requests nothing at all
pub fn is_blank(expression: &str) -> bool {
    expression.trim().is_empty()
}

/// Field name of a raw clause: the trimmed clause up to its first whitespace
pub fn field_name(clause: &str) -> &str {
    let trimmed = clause.trim();
    trimmed
        .split_once(char::is_whitespace)
        .map_or(trimmed, |(name, _)| name)
}

/// One `field[ ... desc]` unit of an ordering expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause<'a> {
    pub field_name: &'a str,
    pub descending: bool,
}

impl<'a> SortClause<'a> {
    pub fn parse(clause: &'a str) -> Self {
        let trimmed = clause.trim();
        Self {
            field_name: field_name(trimmed),
            descending: trimmed.ends_with(DESCENDING_SUFFIX),
        }
    }
}
