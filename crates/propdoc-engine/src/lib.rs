pub mod document;
pub mod models;
pub mod parsing;
pub mod validate;
pub mod vocabulary;

// Re-export key types for easier usage
pub use document::{Document, DocumentError, Section};
pub use models::{
    BlockBody, Insertion, Position, Property, PropertyTree, RequirementStatus, SameNameRef,
    SchemaDescription, SchemaError, SchemaField,
};
pub use parsing::{StructureBuilder, TreeSnap, build_tree, render_outline};
pub use validate::{Diagnostic, DiagnosticKind, Validator, validate};
pub use vocabulary::Vocabulary;
