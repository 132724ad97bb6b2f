//! Field mapping tables
//!
//! A [`MappingTable`] translates the field names a client uses for a public
//! shape into the property names of an internal shape. One client field may
//! expand to several internal properties, and may declare that its intuitive
//! order runs opposite to the internal property's order (`revert`).

pub mod registry;

use crate::error::{MappingError, Result};
use std::collections::HashMap;

pub use registry::MappingRegistry;

/// Case-fold a client field name for table lookups
pub fn normalize_field(name: &str) -> String {
    name.to_lowercase()
}

/// Internal properties a single client field maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    destination_properties: Vec<String>,
    revert: bool,
}

impl FieldMapping {
    /// Map a field to one or more internal properties in their natural order.
    ///
    /// Fails with [`MappingError::InvalidArgument`] when the list is empty or
    /// contains a blank property name.
    pub fn new<I, S>(destination_properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_revert(destination_properties, false)
    }

    /// Map a field whose intuitive order is the inverse of its properties'
    /// order, e.g. age over a date of birth.
    pub fn reverted<I, S>(destination_properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_revert(destination_properties, true)
    }

    pub fn with_revert<I, S>(destination_properties: I, revert: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let destination_properties: Vec<String> =
            destination_properties.into_iter().map(Into::into).collect();

        if destination_properties.is_empty() {
            return Err(MappingError::InvalidArgument(
                "a field mapping needs at least one destination property".into(),
            ));
        }
        if let Some(blank) = destination_properties
            .iter()
            .position(|property| property.trim().is_empty())
        {
            return Err(MappingError::InvalidArgument(format!(
                "destination property #{blank} is blank"
            )));
        }

        Ok(Self {
            destination_properties,
            revert,
        })
    }

    /// Internal property names, never empty
    pub fn destination_properties(&self) -> &[String] {
        &self.destination_properties
    }

    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// Case-insensitive dictionary from client field names to [`FieldMapping`]s.
///
/// Built once and immutable afterwards. Keys keep the spelling they were
/// registered with; lookups fold case on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<(String, FieldMapping)>,
    index: HashMap<String, usize>,
}

impl MappingTable {
    pub fn builder() -> MappingTableBuilder {
        MappingTableBuilder::new()
    }

    /// Build a table from `(field name, mapping)` pairs.
    ///
    /// Two names that fold to the same key are rejected with
    /// [`MappingError::InvalidArgument`].
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, FieldMapping)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (name, mapping) in fields {
            table.insert(name.into(), mapping)?;
        }
        Ok(table)
    }

    fn insert(&mut self, name: String, mapping: FieldMapping) -> Result<()> {
        if name.trim().is_empty() {
            return Err(MappingError::InvalidArgument(
                "field names in a mapping table cannot be blank".into(),
            ));
        }

        let key = normalize_field(&name);
        if let Some(&existing) = self.index.get(&key) {
            return Err(MappingError::InvalidArgument(format!(
                "field '{}' collides with '{}' when compared case-insensitively",
                name, self.entries[existing].0
            )));
        }

        self.index.insert(key, self.entries.len());
        self.entries.push((name, mapping));
        Ok(())
    }

    /// Look up a client field, ignoring case
    pub fn get(&self, field: &str) -> Option<&FieldMapping> {
        self.index
            .get(&normalize_field(field))
            .map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.index.contains_key(&normalize_field(field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields in registration order, with their original spelling
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMapping)> {
        self.entries
            .iter()
            .map(|(name, mapping)| (name.as_str(), mapping))
    }
}

/// Fluent construction of a [`MappingTable`]
#[derive(Debug, Clone, Default)]
pub struct MappingTableBuilder {
    fields: Vec<(String, Result<FieldMapping>)>,
}

impl MappingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `field` to internal properties in their natural order
    pub fn field<I, S>(self, field: impl Into<String>, destination_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(field, FieldMapping::new(destination_properties))
    }

    /// Map `field` to internal properties whose order is inverted
    pub fn reverted_field<I, S>(
        self,
        field: impl Into<String>,
        destination_properties: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(field, FieldMapping::reverted(destination_properties))
    }

    pub fn mapping(self, field: impl Into<String>, mapping: FieldMapping) -> Self {
        self.push(field, Ok(mapping))
    }

    fn push(mut self, field: impl Into<String>, mapping: Result<FieldMapping>) -> Self {
        self.fields.push((field.into(), mapping));
        self
    }

    /// Build the table, reporting the first invalid mapping or key collision
    pub fn build(self) -> Result<MappingTable> {
        let mut table = MappingTable::default();
        for (name, mapping) in self.fields {
            let mapping = mapping.map_err(|err| match err {
                MappingError::InvalidArgument(reason) => {
                    MappingError::InvalidArgument(format!("field '{name}': {reason}"))
                }
                other => other,
            })?;
            table.insert(name, mapping)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author_table() -> MappingTable {
        MappingTable::builder()
            .field("Id", ["Id"])
            .field("Genre", ["Genre"])
            .reverted_field("Age", ["DateOfBirth"])
            .field("Name", ["Firstname", "Lastname"])
            .build()
            .unwrap()
    }

    #[test]
    fn lookups_ignore_case() {
        let table = author_table();
        assert!(table.contains_field("name"));
        assert!(table.contains_field("NAME"));
        assert!(table.contains_field("Name"));
        assert!(!table.contains_field("Nam"));

        let age = table.get("aGe").unwrap();
        assert!(age.revert());
        assert_eq!(age.destination_properties(), ["DateOfBirth"]);
    }

    #[test]
    fn iteration_keeps_registration_order_and_spelling() {
        let table = author_table();
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Id", "Genre", "Age", "Name"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn empty_destination_list_is_rejected() {
        let err = FieldMapping::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, MappingError::InvalidArgument(_)));

        let err = MappingTable::builder()
            .field("Name", Vec::<&str>::new())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("field 'Name'"));
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(FieldMapping::new(["Firstname", "  "]).is_err());
        assert!(MappingTable::builder().field(" ", ["Id"]).build().is_err());
    }

    #[test]
    fn keys_colliding_after_case_folding_are_rejected() {
        let err = MappingTable::builder()
            .field("Name", ["Firstname"])
            .field("NAME", ["Lastname"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::InvalidArgument(
                "field 'NAME' collides with 'Name' when compared case-insensitively"
                    .into()
            )
        );
    }
}
