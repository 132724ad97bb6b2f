//! Configuration for sortmap.
//!
//! Mapping tables are usually declared in a TOML (or JSON) file rather than in
//! code. This crate loads that file, turns it into a
//! [`MappingRegistry`](sortmap_core::MappingRegistry) once at start-up, and
//! ships the `sortmap` binary for checking field lists and ordering
//! expressions against it.

pub mod loader;
pub mod models;

pub use loader::{CONFIG_JSON_VAR, CONFIG_PATH_VAR, ConfigFormat, MappingConfigSource};
pub use models::{FieldConfig, MappingConfig, ShapeMappingConfig};
