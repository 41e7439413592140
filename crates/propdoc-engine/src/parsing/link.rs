//! Second pass of the structure build: attach block bodies to the fields
//! that reference them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::models::{BlockBody, Property, PropertyTree};

/// Links every unresolved block reference in `root`, including references
/// inside definition bodies, to the matching definition's body.
///
/// Each definition body is resolved once and shared: all references and the
/// root-level definition itself hold the same `Arc`.
pub(crate) fn link_references(definitions: Vec<Property>, root: &mut PropertyTree) {
    let mut linker = Linker::new(definitions);
    for p in root.iter_mut() {
        if p.is_definition() {
            if let Some(body) = linker
                .own_definition(p)
                .and_then(|index| linker.resolve(index))
            {
                p.nested = Some(BlockBody::Defined(body));
            }
        } else if p.is_unresolved_reference() {
            linker.link(p);
        }
    }
}

struct Linker {
    definitions: Vec<Property>,
    resolved: HashMap<usize, Arc<PropertyTree>>,
    resolving: HashSet<usize>,
}

impl Linker {
    fn new(definitions: Vec<Property>) -> Self {
        Self {
            definitions,
            resolved: HashMap::new(),
            resolving: HashSet::new(),
        }
    }

    fn own_definition(&self, p: &Property) -> Option<usize> {
        self.definitions
            .iter()
            .position(|d| d.line == p.line && d.name == p.name)
    }

    /// Lookup by the field's name, then by its block type name.
    fn definition_for(&self, p: &Property) -> Option<usize> {
        let by_name = |name: &str| {
            self.definitions
                .iter()
                .position(|d| d.block_names().any(|n| n == name))
        };
        by_name(&p.name).or_else(|| {
            (!p.block_type_name.is_empty() && p.block_type_name != p.name)
                .then(|| by_name(&p.block_type_name))
                .flatten()
        })
    }

    /// Body of definition `index` with its own references linked.
    /// `None` when the definition is already being resolved further up.
    fn resolve(&mut self, index: usize) -> Option<Arc<PropertyTree>> {
        if let Some(body) = self.resolved.get(&index) {
            return Some(Arc::clone(body));
        }
        if !self.resolving.insert(index) {
            return None;
        }

        let mut body = self.definitions[index].nested().cloned().unwrap_or_default();
        for child in body.iter_mut() {
            if child.is_unresolved_reference() {
                self.link(child);
            }
        }

        self.resolving.remove(&index);
        let body = Arc::new(body);
        self.resolved.insert(index, Arc::clone(&body));
        Some(body)
    }

    fn link(&mut self, reference: &mut Property) {
        let Some(index) = self.definition_for(reference) else {
            log::debug!(
                "line {}: no definition for block `{}`",
                reference.line,
                reference.full_path()
            );
            return;
        };
        match self.resolve(index) {
            Some(body) if !body.is_empty() => {
                reference.nested = Some(BlockBody::Linked(body));
            }
            Some(_) => {}
            None => {
                log::debug!(
                    "line {}: cutting circular reference to block `{}`",
                    reference.line,
                    reference.name
                );
                reference
                    .parse_errors
                    .push(format!("circular block reference `{}`", reference.name));
            }
        }
    }
}
