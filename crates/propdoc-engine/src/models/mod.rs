pub mod property;
pub mod schema;
pub mod tree;

pub use property::{BlockBody, Position, Property, RequirementStatus, SameNameRef, UnknownPosition};
pub use schema::{SchemaDescription, SchemaError, SchemaField};
pub use tree::{Insertion, PropertyTree};
