//! Validation of client-supplied field lists against a mapping table

use super::clause::{field_name, is_blank, split_clauses};
use crate::mapping::MappingTable;

/// Check that every field of a comma-separated list is known to `table`.
///
/// Blank input requests nothing and is always valid. Direction suffixes are
/// tolerated (`"Name desc"` checks `Name`). The result is a plain yes/no;
/// use [`first_unknown_field`] when the offending field is needed.
pub fn validate_fields(fields: &str, table: &MappingTable) -> bool {
    first_unknown_field(fields, table).is_none()
}

/// The first field of the list that `table` does not know, if any
pub fn first_unknown_field<'a>(fields: &'a str, table: &MappingTable) -> Option<&'a str> {
    if is_blank(fields) {
        return None;
    }

    split_clauses(fields)
        .map(field_name)
        .find(|name| !table.contains_field(name))
}
