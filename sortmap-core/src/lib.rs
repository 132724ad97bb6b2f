//! # sortmap core
//!
//! Translation of client-facing field names into internal property names for
//! validating field lists and ordering record sequences.
//!
//! ## Overview
//!
//! A service exposes records through a public shape (a DTO) while the
//! backing store knows them by an internal shape. This crate provides:
//!
//! - **Mapping tables**: case-insensitive client field names mapped to one
//!   or more internal properties, optionally with an inverted direction
//! - **Mapping registry**: one table per (public shape, internal shape) pair,
//!   built at start-up and shared read-only afterwards
//! - **Field validation**: checks a comma-separated `fields` list
//! - **Sort compilation**: turns an `orderBy` expression such as
//!   `"Name,Age desc"` into single-key steps over internal properties, applied
//!   to in-memory records or recorded for a storage layer
//!
//! ## Architecture
//!
//! - [`shape`]: identifiers of public and internal shapes
//! - [`mapping`]: field mappings, tables and the registry
//! - [`query`]: clause parsing, validation and sorting
//! - [`service`]: resolve-then-validate/sort for request handlers
//!
//! ## Examples
//!
//! ```
//! use sortmap_core::{MappingRegistry, MappingTable, apply_sort, validate_fields};
//! use serde_json::json;
//!
//! let mut registry = MappingRegistry::new();
//! registry.register(
//!     "AuthorDto",
//!     "Author",
//!     MappingTable::builder()
//!         .field("Name", ["Firstname", "Lastname"])
//!         .reverted_field("Age", ["DateOfBirth"])
//!         .build()?,
//! )?;
//!
//! let table = registry.resolve(&"AuthorDto".into(), &"Author".into())?;
//! assert!(validate_fields("name, age", table));
//!
//! let authors = vec![
//!     json!({ "Firstname": "Ada", "DateOfBirth": "1815-12-10" }),
//!     json!({ "Firstname": "Grace", "DateOfBirth": "1906-12-09" }),
//! ];
//! let youngest_first = apply_sort(authors, "Age", table)?;
//! assert_eq!(youngest_first[0]["Firstname"], "Grace");
//! # Ok::<(), sortmap_core::MappingError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Error types shared by every component
pub mod error;

/// Field mapping tables and the registry
pub mod mapping;

/// Parsing, validation and sorting of client query parameters
pub mod query;

pub mod service;

/// Public and internal shape identifiers
pub mod shape;

pub use error::{MappingError, Result};
pub use mapping::{FieldMapping, MappingRegistry, MappingTable, MappingTableBuilder};
pub use query::{
    DeferredOrder, OrderBySource, Pagination, RevertMode, SortClause, SortOrder, SortPlan,
    SortStep, SortValue, SortableRecord, apply_sort, apply_sort_with, first_unknown_field,
    validate_fields,
};
pub use service::PropertyMappingService;
pub use shape::{Shape, ShapeId};
