//! Identifiers for the public and internal shapes a mapping table connects.
//!
//! A shape is identified by a plain string tag chosen at registration time.
//! Types that stand for a shape can carry their tag statically through
//! [`Shape`], which lets callers register and resolve tables by type pair
//! (`resolve_shapes::<AuthorDto, Author>()`) without any runtime reflection.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a public (client-facing) or internal (storage) shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Cow<'static, str>);

impl ShapeId {
    /// Create an identifier from a static tag without allocating
    pub const fn from_static(tag: &'static str) -> Self {
        ShapeId(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Self {
        ShapeId(Cow::Owned(tag.into()))
    }

    /// Identifier of a [`Shape`] type
    pub const fn of<S: Shape + ?Sized>() -> Self {
        Self::from_static(S::ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ShapeId {
    fn from(tag: &'static str) -> Self {
        ShapeId::from_static(tag)
    }
}

impl From<String> for ShapeId {
    fn from(tag: String) -> Self {
        ShapeId::new(tag)
    }
}

impl AsRef<str> for ShapeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A type standing for a public or internal shape.
///
/// The tag must be unique among the shapes registered in one
/// [`MappingRegistry`](crate::MappingRegistry).
pub trait Shape {
    /// Tag used as this shape's [`ShapeId`]
    const ID: &'static str;
}
