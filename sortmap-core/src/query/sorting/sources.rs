//! [`OrderBySource`] implementations
//!
//! * `Vec<T>` orders records in memory. Each call is a stable sort of the
//!   whole vector, so results are materialized eagerly rather than composed
//!   into a lazy view.
//! * [`DeferredOrder`] only records the keys, for storage layers that apply
//!   ordering and pagination themselves (e.g. as a SQL `ORDER BY`).

use super::keys::SortValue;
use super::traits::{OrderBySource, SortableRecord};
use super::utils::{is_sorted_by, reorder_by_indices, sorted_indices};
use super::plan::SortStep;
use crate::query::types::SortOrder;
use serde::{Deserialize, Serialize};

impl<T: SortableRecord> OrderBySource for Vec<T> {
    fn order_by(mut self, property: &str, order: SortOrder) -> Self {
        if self.len() < 2 {
            return self;
        }

        // Extract keys once for efficiency
        let keys: Vec<SortValue> = self.iter().map(|item| item.sort_value(property)).collect();
        let descending = order.is_descending();
        let compare = |a: &SortValue, b: &SortValue| a.compare_with_order(b, descending);
        if is_sorted_by(&keys, compare) {
            return self;
        }

        let indices = sorted_indices(&keys, compare);

        reorder_by_indices(&mut self, indices);
        self
    }
}

/// Ordering keys recorded for later evaluation by a storage layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredOrder {
    keys: Vec<SortStep>,
}

impl DeferredOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in precedence order, primary key first
    pub fn keys(&self) -> &[SortStep] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render the keys as the body of a SQL `ORDER BY` clause.
    ///
    /// Property names are emitted as double-quoted identifiers. Empty when
    /// no key was recorded.
    pub fn to_sql(&self) -> String {
        self.keys
            .iter()
            .map(|key| format!("{} {}", quote_identifier(&key.property), key.order.as_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OrderBySource for DeferredOrder {
    /// The new key becomes primary; an older key on the same property can no
    /// longer influence the order and is dropped.
    fn order_by(mut self, property: &str, order: SortOrder) -> Self {
        self.keys.retain(|key| key.property != property);
        self.keys.insert(0, SortStep::new(property, order));
        self
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn names(records: &[Value]) -> Vec<&str> {
        records
            .iter()
            .map(|record| record["name"].as_str().unwrap_or_default())
            .collect()
    }

    #[test]
    fn vec_order_by_is_stable() {
        let records = vec![
            json!({ "name": "a", "rank": 2 }),
            json!({ "name": "b", "rank": 1 }),
            json!({ "name": "c", "rank": 2 }),
            json!({ "name": "d", "rank": 1 }),
        ];

        let asc = records.clone().order_by("rank", SortOrder::Ascending);
        assert_eq!(names(&asc), ["b", "d", "a", "c"]);

        let desc = records.order_by("rank", SortOrder::Descending);
        assert_eq!(names(&desc), ["a", "c", "b", "d"]);
    }

    #[test]
    fn vec_order_by_keeps_already_ordered_input() {
        let records = vec![
            json!({ "name": "a", "rank": 1 }),
            json!({ "name": "b", "rank": 1 }),
            json!({ "name": "c", "rank": 3 }),
            json!({ "name": "d" }),
        ];

        let asc = records.clone().order_by("rank", SortOrder::Ascending);
        assert_eq!(asc, records);

        let desc = records.order_by("rank", SortOrder::Descending);
        assert_eq!(names(&desc), ["c", "a", "b", "d"]);
    }

    #[test]
    fn vec_order_by_puts_missing_last() {
        let records = vec![
            json!({ "name": "none" }),
            json!({ "name": "low", "rank": 1 }),
            json!({ "name": "high", "rank": 9 }),
        ];

        let desc = records.clone().order_by("rank", SortOrder::Descending);
        assert_eq!(names(&desc), ["high", "low", "none"]);

        let asc = records.order_by("rank", SortOrder::Ascending);
        assert_eq!(names(&asc), ["low", "high", "none"]);
    }

    #[test]
    fn deferred_order_prepends_new_keys() {
        let order = DeferredOrder::new()
            .order_by("DateOfBirth", SortOrder::Ascending)
            .order_by("Lastname", SortOrder::Descending)
            .order_by("Firstname", SortOrder::Descending);

        assert_eq!(
            order.to_sql(),
            r#""Firstname" DESC, "Lastname" DESC, "DateOfBirth" ASC"#
        );
    }

    #[test]
    fn deferred_order_drops_shadowed_keys() {
        let order = DeferredOrder::new()
            .order_by("Id", SortOrder::Descending)
            .order_by("Name", SortOrder::Ascending)
            .order_by("Id", SortOrder::Ascending);

        assert_eq!(
            order.keys(),
            [
                SortStep::new("Id", SortOrder::Ascending),
                SortStep::new("Name", SortOrder::Ascending)
            ]
        );
    }

    #[test]
    fn identifiers_are_quoted() {
        let order = DeferredOrder::new().order_by("we\"ird", SortOrder::Ascending);
        assert_eq!(order.to_sql(), r#""we""ird" ASC"#);
        assert_eq!(DeferredOrder::new().to_sql(), "");
    }
}
