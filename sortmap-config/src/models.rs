use anyhow::Context;
use serde::{Deserialize, Serialize};
use sortmap_core::{
    FieldMapping, MappingRegistry, MappingTable, PropertyMappingService, RevertMode,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Declarative set of mapping tables, as read from a TOML or JSON file.
///
/// ```toml
/// revert_mode = "cumulative"
///
/// [[mapping]]
/// public = "AuthorDto"
/// internal = "Author"
///
/// [mapping.fields]
/// Id = "Id"
/// Name = ["Firstname", "Lastname"]
/// Age = { destinations = ["DateOfBirth"], revert = true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MappingConfig {
    /// How reverted fields with several destination properties are ordered.
    /// `cumulative` toggles the direction per property; `per-property`
    /// inverts every property alike.
    #[serde(default)]
    pub revert_mode: RevertMode,
    /// One entry per (public shape, internal shape) pair
    #[serde(default, rename = "mapping")]
    pub mappings: Vec<ShapeMappingConfig>,
}

/// Field table for one (public shape, internal shape) pair
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShapeMappingConfig {
    pub public: String,
    pub internal: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

/// Destination properties of one client field.
///
/// A bare string or list maps the field without reverting it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldConfig {
    Single(String),
    List(Vec<String>),
    Detailed {
        destinations: Vec<String>,
        #[serde(default)]
        revert: bool,
    },
}

impl FieldConfig {
    pub fn to_mapping(&self) -> sortmap_core::Result<FieldMapping> {
        match self {
            FieldConfig::Single(property) => FieldMapping::new([property.as_str()]),
            FieldConfig::List(properties) => FieldMapping::new(properties.iter().map(String::as_str)),
            FieldConfig::Detailed {
                destinations,
                revert,
            } => FieldMapping::with_revert(destinations.iter().map(String::as_str), *revert),
        }
    }
}

impl ShapeMappingConfig {
    pub fn to_table(&self) -> anyhow::Result<MappingTable> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, field) in &self.fields {
            let mapping = field
                .to_mapping()
                .with_context(|| format!("invalid mapping for field '{name}'"))?;
            fields.push((name.as_str(), mapping));
        }
        Ok(MappingTable::new(fields)?)
    }
}

impl MappingConfig {
    /// Build a registry holding every configured table.
    ///
    /// Fails on the first invalid table or duplicate shape pair.
    pub fn to_registry(&self) -> anyhow::Result<MappingRegistry> {
        let mut registry = MappingRegistry::new();
        for mapping in &self.mappings {
            let table = mapping.to_table().with_context(|| {
                format!(
                    "invalid property mapping <{}, {}>",
                    mapping.public, mapping.internal
                )
            })?;
            registry.register(mapping.public.clone(), mapping.internal.clone(), table)?;
        }

        info!(pairs = registry.len(), "property mappings registered");
        Ok(registry)
    }

    /// Registry wrapped in a [`PropertyMappingService`] using the configured
    /// revert mode
    pub fn to_service(&self) -> anyhow::Result<PropertyMappingService> {
        let registry = self.to_registry()?;
        Ok(PropertyMappingService::new(Arc::new(registry)).with_revert_mode(self.revert_mode))
    }
}
