pub mod clause;
pub mod sorting;
pub mod types;
pub mod validation;

pub use clause::SortClause;
pub use sorting::*;
pub use types::*;
pub use validation::{first_unknown_field, validate_fields};
