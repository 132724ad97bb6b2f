use thiserror::Error;

use crate::shape::ShapeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Property mapping for <{public}, {internal}> is already registered")]
    DuplicateMapping { public: ShapeId, internal: ShapeId },

    #[error("Cannot find a property mapping for <{public}, {internal}>")]
    MissingMapping { public: ShapeId, internal: ShapeId },

    #[error(
        "Cannot find exact property mapping for <{public}, {internal}>: {count} candidates"
    )]
    AmbiguousMapping {
        public: ShapeId,
        internal: ShapeId,
        count: usize,
    },

    #[error("Key mapping for {0} is missing")]
    InvalidField(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MappingError {
    /// Whether the failure was caused by client-supplied input rather than
    /// by application configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidField(_))
    }

    /// The offending field name for [`MappingError::InvalidField`].
    pub fn invalid_field(&self) -> Option<&str> {
        match self {
            Self::InvalidField(field) => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
