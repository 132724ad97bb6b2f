//! Sort key values extracted from records
//!
//! A [`SortValue`] wraps whatever a record holds for one internal property
//! and handles missing data in its ordering: records without a value always
//! end up after records with one, in both directions.

use chrono::{DateTime, NaiveDate, Utc};
use ordered_float::OrderedFloat;
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

/// Comparable value of one record property
#[derive(Clone, Debug, Default)]
pub enum SortValue {
    /// The record has no value for the property
    #[default]
    Missing,
    Bool(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
}

impl SortValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    /// Compare two values in the requested direction, keeping missing values
    /// last regardless of direction
    pub fn compare_with_order(&self, other: &Self, descending: bool) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                if descending {
                    other.cmp(self)
                } else {
                    self.cmp(other)
                }
            }
        }
    }

    // Mismatched kinds order by rank; integers and floats share one.
    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Integer(_) | SortValue::Float(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Date(_) | SortValue::DateTime(_) => 3,
            SortValue::Uuid(_) => 4,
            SortValue::Missing => 5,
        }
    }
}

fn date_start(date: &NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

// 2^63 as f64; every i64 is strictly below it and every i64 is at least -2^63.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer against a float.
///
/// Casting the integer to `f64` rounds above 2^53, which would make equality
/// non-transitive. NaN sorts above every number, as `OrderedFloat` does.
fn compare_integer_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() || float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    // `whole` lies in [-2^63, 2^63) here, so the cast is exact.
    int.cmp(&(whole as i64)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use SortValue::*;

        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.cmp(b),
            (Integer(a), Float(b)) => compare_integer_float(*a, b.0),
            (Float(a), Integer(b)) => compare_integer_float(*b, a.0).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Date(a), DateTime(b)) => date_start(a).cmp(b),
            (DateTime(a), Date(b)) => a.cmp(&date_start(b)),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Bool(value)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        SortValue::Integer(value.into())
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Integer(value)
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        SortValue::Integer(value.into())
    }
}

impl From<u64> for SortValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(SortValue::Integer)
            .unwrap_or(SortValue::Float(OrderedFloat(value as f64)))
    }
}

impl From<f32> for SortValue {
    fn from(value: f32) -> Self {
        SortValue::Float(OrderedFloat(value.into()))
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Float(OrderedFloat(value))
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_owned())
    }
}

impl From<NaiveDate> for SortValue {
    fn from(value: NaiveDate) -> Self {
        SortValue::Date(value)
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(value: DateTime<Utc>) -> Self {
        SortValue::DateTime(value)
    }
}

impl From<Uuid> for SortValue {
    fn from(value: Uuid) -> Self {
        SortValue::Uuid(value)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Missing, Into::into)
    }
}

impl From<&Value> for SortValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(SortValue::Integer)
                .or_else(|| n.as_f64().map(SortValue::from))
                .unwrap_or_default(),
            Value::String(s) => SortValue::Text(s.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => SortValue::Missing,
        }
    }
}
