//! Sorting of record sequences by client ordering expressions
//!
//! This module provides:
//! - Sort key values with missing-last semantics
//! - Traits for sortable records and ordering sources
//! - Compilation of ordering expressions into sort plans
//! - In-memory and deferred ordering sources

pub mod keys;
pub mod plan;
pub mod sources;
pub mod traits;
pub mod utils;

pub use keys::*;
pub use plan::*;
pub use sources::*;
pub use traits::*;

use crate::error::Result;
use crate::mapping::MappingTable;

/// Order `source` by the client expression `order_by`, translated through
/// `table`.
///
/// A blank expression returns `source` untouched. The whole expression is
/// compiled before the first key is applied, so an unknown field fails with
/// [`MappingError::InvalidField`](crate::MappingError::InvalidField) without
/// reordering anything.
pub fn apply_sort<S: OrderBySource>(source: S, order_by: &str, table: &MappingTable) -> Result<S> {
    apply_sort_with(source, order_by, table, RevertMode::default())
}

/// [`apply_sort`] with an explicit [`RevertMode`]
pub fn apply_sort_with<S: OrderBySource>(
    source: S,
    order_by: &str,
    table: &MappingTable,
    mode: RevertMode,
) -> Result<S> {
    let plan = SortPlan::compile_with(order_by, table, mode)?;
    Ok(plan.apply(source))
}
