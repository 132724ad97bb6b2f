//! Core traits of the ordering system
//!
//! Records expose their internal properties through [`SortableRecord`]; the
//! data-access layer exposes its ordering primitive through
//! [`OrderBySource`].

use super::keys::SortValue;
use crate::query::types::SortOrder;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A record that can be ordered by its internal property names
pub trait SortableRecord {
    /// Extract the sort key for `property`.
    ///
    /// Properties the record does not have yield [`SortValue::Missing`].
    fn sort_value(&self, property: &str) -> SortValue;
}

/// A sequence that can be put in order by one property at a time.
///
/// Every call establishes a fresh total order: the property passed last
/// becomes the primary key. Implementations backed by a stable sort keep the
/// previous order among records tied on the new property, so applying keys
/// from least to most significant yields a multi-key ordering.
pub trait OrderBySource: Sized {
    fn order_by(self, property: &str, order: SortOrder) -> Self;
}

impl<T: SortableRecord + ?Sized> SortableRecord for &T {
    fn sort_value(&self, property: &str) -> SortValue {
        (**self).sort_value(property)
    }
}

impl<T: SortableRecord + ?Sized> SortableRecord for Box<T> {
    fn sort_value(&self, property: &str) -> SortValue {
        (**self).sort_value(property)
    }
}

impl<T: SortableRecord + ?Sized> SortableRecord for Arc<T> {
    fn sort_value(&self, property: &str) -> SortValue {
        (**self).sort_value(property)
    }
}

/// Object fields are matched by exact name first, then ignoring case
impl SortableRecord for Map<String, Value> {
    fn sort_value(&self, property: &str) -> SortValue {
        self.get(property)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(property))
                    .map(|(_, value)| value)
            })
            .map(SortValue::from)
            .unwrap_or_default()
    }
}

/// Only JSON objects have properties; other values are missing everything
impl SortableRecord for Value {
    fn sort_value(&self, property: &str) -> SortValue {
        match self {
            Value::Object(fields) => fields.sort_value(property),
            _ => SortValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_expose_fields() {
        let record = json!({ "Firstname": "Ada", "DateOfBirth": "1815-12-10" });
        assert_eq!(record.sort_value("Firstname"), SortValue::from("Ada"));
        assert_eq!(record.sort_value("firstname"), SortValue::from("Ada"));
        assert!(record.sort_value("Lastname").is_missing());
        assert!(json!(42).sort_value("Firstname").is_missing());
    }

    #[test]
    fn exact_name_wins_over_case_insensitive_match() {
        let record = json!({ "id": 1, "Id": 2 });
        assert_eq!(record.sort_value("Id"), SortValue::Integer(2));
        assert_eq!(record.sort_value("id"), SortValue::Integer(1));
    }
}
