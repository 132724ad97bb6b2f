//! Registry of mapping tables keyed by (public shape, internal shape)
//!
//! The registry is filled once while the application starts and is only read
//! afterwards, so it can be shared behind an `Arc` by every request handler
//! without locking.

use super::MappingTable;
use crate::error::{MappingError, Result};
use crate::shape::{Shape, ShapeId};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
struct RegistryEntry {
    public: ShapeId,
    internal: ShapeId,
    table: Arc<MappingTable>,
}

impl RegistryEntry {
    fn matches(&self, public: &ShapeId, internal: &ShapeId) -> bool {
        &self.public == public && &self.internal == internal
    }
}

/// Mapping tables for every registered (public, internal) shape pair
#[derive(Debug, Default)]
pub struct MappingRegistry {
    entries: Vec<RegistryEntry>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` for the (`public`, `internal`) pair.
    ///
    /// A pair can only be registered once; a second registration fails with
    /// [`MappingError::DuplicateMapping`] and leaves the first table in place.
    pub fn register(
        &mut self,
        public: impl Into<ShapeId>,
        internal: impl Into<ShapeId>,
        table: MappingTable,
    ) -> Result<()> {
        let public = public.into();
        let internal = internal.into();

        if self
            .entries
            .iter()
            .any(|entry| entry.matches(&public, &internal))
        {
            warn!(%public, %internal, "rejecting duplicate property mapping");
            return Err(MappingError::DuplicateMapping { public, internal });
        }

        debug!(%public, %internal, fields = table.len(), "registered property mapping");
        self.entries.push(RegistryEntry {
            public,
            internal,
            table: Arc::new(table),
        });
        Ok(())
    }

    /// Register `table` for the pair of [`Shape`] types `P` and `I`
    pub fn register_shapes<P: Shape, I: Shape>(&mut self, table: MappingTable) -> Result<()> {
        self.register(ShapeId::of::<P>(), ShapeId::of::<I>(), table)
    }

    /// Resolve the table registered for (`public`, `internal`).
    ///
    /// Exactly one entry must match: none is [`MappingError::MissingMapping`],
    /// more than one is [`MappingError::AmbiguousMapping`].
    pub fn resolve(&self, public: &ShapeId, internal: &ShapeId) -> Result<&MappingTable> {
        self.resolve_entry(public, internal)
            .map(|entry| entry.table.as_ref())
    }

    /// Like [`resolve`](Self::resolve), handing out a shared handle to the table
    pub fn resolve_shared(
        &self,
        public: &ShapeId,
        internal: &ShapeId,
    ) -> Result<Arc<MappingTable>> {
        self.resolve_entry(public, internal)
            .map(|entry| Arc::clone(&entry.table))
    }

    pub fn resolve_shapes<P: Shape, I: Shape>(&self) -> Result<&MappingTable> {
        self.resolve(&ShapeId::of::<P>(), &ShapeId::of::<I>())
    }

    fn resolve_entry(&self, public: &ShapeId, internal: &ShapeId) -> Result<&RegistryEntry> {
        let mut matching = self
            .entries
            .iter()
            .filter(|entry| entry.matches(public, internal));

        match (matching.next(), matching.count()) {
            (Some(entry), 0) => Ok(entry),
            (None, _) => Err(MappingError::MissingMapping {
                public: public.clone(),
                internal: internal.clone(),
            }),
            (Some(_), rest) => Err(MappingError::AmbiguousMapping {
                public: public.clone(),
                internal: internal.clone(),
                count: rest + 1,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &ShapeId, &MappingTable)> {
        self.entries
            .iter()
            .map(|entry| (&entry.public, &entry.internal, entry.table.as_ref()))
    }
}
