//! Stable views of a built tree for tests and for printing.
//!
//! - [`TreeSnap`] drops source lines and content and keys entries by name, so
//!   two documents that declare the same structure in a different order
//!   compare equal.
//! - [`render_outline`] is a readable indented listing used by the fixture
//!   snapshots and the CLI.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::models::{BlockBody, Property, PropertyTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnap(pub BTreeMap<String, PropertySnap>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySnap {
    pub path: String,
    pub requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<TreeSnap>,
}

impl TreeSnap {
    pub fn of(tree: &PropertyTree) -> Self {
        TreeSnap(
            tree.iter()
                .map(|p| (p.name.clone(), PropertySnap::of(p)))
                .collect(),
        )
    }
}

impl PropertySnap {
    fn of(p: &Property) -> Self {
        PropertySnap {
            path: p.full_path().to_string(),
            requirement: p.requirement.to_string(),
            default_value: p.default_value.clone(),
            force_new: p.force_new,
            possible_values: p.possible_values.clone(),
            block_type: p.block.then(|| p.block_type_name.clone()),
            nested: p
                .nested()
                .filter(|tree| !tree.is_empty())
                .map(TreeSnap::of),
        }
    }
}

/// One line per property, children indented by two spaces.
///
/// ```text
/// identity (Optional, block, linked)
///   type (Required, values=[SystemAssigned, UserAssigned])
/// ```
pub fn render_outline(tree: &PropertyTree) -> String {
    let mut out = String::new();
    render_level(tree, 0, &mut out);
    out
}

fn render_level(tree: &PropertyTree, depth: usize, out: &mut String) {
    for p in tree {
        let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth), p.name, attributes(p).join(", "));
        if let Some(nested) = p.nested() {
            render_level(nested, depth + 1, out);
        }
    }
}

fn attributes(p: &Property) -> Vec<String> {
    let mut attrs = vec![p.requirement.to_string()];
    if p.force_new {
        attrs.push("force_new".to_string());
    }
    if let Some(default) = &p.default_value {
        attrs.push(format!("default={default}"));
    }
    if !p.possible_values.is_empty() {
        attrs.push(format!("values=[{}]", p.possible_values.join(", ")));
    }
    if p.block {
        if p.block_type_name.is_empty() || p.block_type_name == p.name {
            attrs.push("block".to_string());
        } else {
            attrs.push(format!("block={}", p.block_type_name));
        }
    }
    if matches!(p.nested, Some(BlockBody::Linked(_))) {
        attrs.push("linked".to_string());
    }
    if !p.parse_errors.is_empty() {
        attrs.push(format!("errors={}", p.parse_errors.len()));
    }
    attrs
}
