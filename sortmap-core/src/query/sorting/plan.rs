//! Compilation of client ordering expressions into sort plans
//!
//! An expression such as `"Name,Age desc"` is translated through a
//! [`MappingTable`] into single-key [`SortStep`]s over internal properties.
//! The steps are meant for an [`OrderBySource`], where every step
//! establishes a fresh order, so they are emitted least significant first:
//! clauses are walked from last to first and, within a clause, destination
//! properties from last to first. The first clause of the expression is
//! applied last and therefore becomes the primary key.

use super::keys::SortValue;
use super::traits::{OrderBySource, SortableRecord};
use super::utils::{reorder_by_indices, sorted_indices};
use crate::error::{MappingError, Result};
use crate::mapping::MappingTable;
use crate::query::clause::{SortClause, is_blank, split_clauses};
use crate::query::types::SortOrder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// How a field's `revert` flag affects a field mapping to several properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevertMode {
    /// Toggle the clause direction before every destination property, carrying
    /// the toggled flag over to the next property. A reverted field with two
    /// properties therefore orders them in opposite directions.
    #[default]
    Cumulative,
    /// Invert the clause direction once, for every destination property alike.
    /// Deviates from the cumulative behavior for multi-property fields.
    PerProperty,
}

/// One single-key ordering operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortStep {
    pub property: String,
    pub order: SortOrder,
}

impl SortStep {
    pub fn new(property: impl Into<String>, order: SortOrder) -> Self {
        Self {
            property: property.into(),
            order,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.order.is_descending()
    }
}

/// Ordered list of [`SortStep`]s compiled from an ordering expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPlan {
    steps: Vec<SortStep>,
}

impl SortPlan {
    /// Compile `order_by` against `table` with [`RevertMode::Cumulative`].
    ///
    /// A blank expression yields an empty plan. An unknown field fails with
    /// [`MappingError::InvalidField`] naming the field as the client spelled it.
    pub fn compile(order_by: &str, table: &MappingTable) -> Result<Self> {
        Self::compile_with(order_by, table, RevertMode::default())
    }

    pub fn compile_with(order_by: &str, table: &MappingTable, mode: RevertMode) -> Result<Self> {
        if is_blank(order_by) {
            return Ok(Self::default());
        }

        let mut steps = Vec::new();

        for raw in split_clauses(order_by).rev() {
            let clause = SortClause::parse(raw);
            let Some(mapping) = table.get(clause.field_name) else {
                warn!(field = clause.field_name, "rejecting unknown sort field");
                return Err(MappingError::InvalidField(clause.field_name.to_owned()));
            };

            let mut descending = clause.descending;
            for property in mapping.destination_properties().iter().rev() {
                let step_descending = match mode {
                    RevertMode::Cumulative => {
                        if mapping.revert() {
                            descending = !descending;
                        }
                        descending
                    }
                    RevertMode::PerProperty => clause.descending != mapping.revert(),
                };
                steps.push(SortStep::new(
                    property.as_str(),
                    SortOrder::from_descending(step_descending),
                ));
            }
        }

        debug!(order_by, steps = steps.len(), ?mode, "compiled sort plan");
        Ok(Self { steps })
    }

    /// Steps in application order, least significant first
    pub fn steps(&self) -> &[SortStep] {
        &self.steps
    }

    /// Steps in precedence order, primary key first
    pub fn precedence(&self) -> impl Iterator<Item = &SortStep> {
        self.steps.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step to `source`, in application order
    pub fn apply<S: OrderBySource>(&self, source: S) -> S {
        self.steps
            .iter()
            .fold(source, |source, step| source.order_by(&step.property, step.order))
    }

    /// Composed multi-key comparison, equivalent to applying the steps one
    /// after another with a stable sort
    pub fn compare<T: SortableRecord + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        self.precedence()
            .map(|step| {
                a.sort_value(&step.property)
                    .compare_with_order(&b.sort_value(&step.property), step.is_descending())
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sort `items` in place by every key at once.
    ///
    /// Keys are extracted once per record; records tied on every key keep
    /// their relative order.
    pub fn sort_slice<T: SortableRecord>(&self, items: &mut [T]) {
        if self.is_empty() || items.len() < 2 {
            return;
        }

        let precedence: Vec<&SortStep> = self.precedence().collect();
        let keys: Vec<Vec<SortValue>> = items
            .iter()
            .map(|item| {
                precedence
                    .iter()
                    .map(|step| item.sort_value(&step.property))
                    .collect()
            })
            .collect();

        let indices = sorted_indices(&keys, |a, b| {
            a.iter()
                .zip(b)
                .zip(&precedence)
                .map(|((a, b), step)| a.compare_with_order(b, step.is_descending()))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        reorder_by_indices(items, indices);
    }
}
