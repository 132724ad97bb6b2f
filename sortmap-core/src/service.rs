//! Request-facing access to the mapping registry.
//!
//! Handlers usually know the shape pair they serve rather than the table;
//! [`PropertyMappingService`] resolves the table and runs validation or
//! sorting in one call.

use crate::error::Result;
use crate::mapping::{MappingRegistry, MappingTable};
use crate::query::sorting::{OrderBySource, RevertMode, apply_sort_with};
use crate::query::validation::validate_fields;
use crate::shape::{Shape, ShapeId};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PropertyMappingService {
    registry: Arc<MappingRegistry>,
    revert_mode: RevertMode,
}

impl PropertyMappingService {
    pub fn new(registry: Arc<MappingRegistry>) -> Self {
        Self {
            registry,
            revert_mode: RevertMode::default(),
        }
    }

    /// Use `mode` for every sort run through this service
    pub fn with_revert_mode(mut self, mode: RevertMode) -> Self {
        self.revert_mode = mode;
        self
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn property_mapping<P: Shape, I: Shape>(&self) -> Result<&MappingTable> {
        self.registry.resolve_shapes::<P, I>()
    }

    /// Whether every field of `fields` is mapped for `P` to `I`.
    ///
    /// The table is resolved first, so a missing registration is reported
    /// even for a blank field list.
    pub fn valid_mapping_exists_for<P: Shape, I: Shape>(&self, fields: &str) -> Result<bool> {
        self.valid_mapping_exists_for_ids(&ShapeId::of::<P>(), &ShapeId::of::<I>(), fields)
    }

    pub fn valid_mapping_exists_for_ids(
        &self,
        public: &ShapeId,
        internal: &ShapeId,
        fields: &str,
    ) -> Result<bool> {
        let table = self.registry.resolve(public, internal)?;
        Ok(validate_fields(fields, table))
    }

    /// Order `source` by `order_by` through the table mapping `P` to `I`
    pub fn apply_sort<P: Shape, I: Shape, S: OrderBySource>(
        &self,
        source: S,
        order_by: &str,
    ) -> Result<S> {
        self.apply_sort_ids(&ShapeId::of::<P>(), &ShapeId::of::<I>(), source, order_by)
    }

    pub fn apply_sort_ids<S: OrderBySource>(
        &self,
        public: &ShapeId,
        internal: &ShapeId,
        source: S,
        order_by: &str,
    ) -> Result<S> {
        let table = self.registry.resolve(public, internal)?;
        apply_sort_with(source, order_by, table, self.revert_mode)
    }
}
