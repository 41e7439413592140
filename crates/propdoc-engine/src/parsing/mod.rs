//! # Section Parsing
//!
//! Turns the lines of one documentation section into a [`PropertyTree`].
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is judged on its own as a
//!    heading, block head, separator, field candidate, skippable or plain line
//!
//! 2. **Field Extraction** (`extract`): field candidates become `Property`
//!    records; problems are recorded on the property, never returned
//!
//! 3. **Structure Building** (`builder`): a `StructureBuilder` state machine
//!    places fields at the root or inside the open block body
//!
//! 4. **Linking** (`link`): block references receive the shared body of their
//!    definition, wherever in the section it was declared
//!
//! ## Modules
//!
//! - **`patterns`**: fixed regex shapes for field lines, block heads, defaults
//! - **`snapshot`**: `TreeSnap` and `render_outline` for tests and output
//!
//! ## Key Invariants
//!
//! - Nothing here panics on malformed input
//! - Root order follows the document; duplicates are counted, not stored
//! - A definition body is built once and shared by every reference to it

pub mod builder;
pub mod classify;
pub mod extract;
mod link;
pub mod patterns;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::StructureBuilder;
pub use classify::{LineClass, LineClassifier, classify};
pub use extract::{FieldExtractor, extract};
pub use snapshot::{TreeSnap, render_outline};

use crate::models::{Position, PropertyTree};

/// Builds the tree for one section with the standard vocabulary.
pub fn build_tree<'a, I>(lines: I, position: Position) -> PropertyTree
where
    I: IntoIterator<Item = &'a str>,
{
    let mut builder = StructureBuilder::new(position);
    for line in lines {
        builder.push(line);
    }
    builder.finish()
}
