use std::collections::{HashMap, HashSet};

use super::property::{Position, Property, SameNameRef};

/// Outcome of [`PropertyTree::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    /// The name was already present; the existing entry's count was bumped.
    Duplicate,
    /// Nameless properties are never stored.
    Rejected,
}

/// Ordered `name → Property` collection for one section or one block body.
///
/// Iteration always follows insertion order, which mirrors the order fields
/// appear in the documentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTree {
    entries: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.index.get(name).map(|&i| &mut self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Property> {
        self.entries.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name.as_str())
    }

    /// Adds a property unless its name is already taken at this level.
    ///
    /// A second occurrence is not stored; the first entry records it in
    /// `duplicate_count` and `parse_errors` instead.
    pub fn insert(&mut self, property: Property) -> Insertion {
        if property.name.is_empty() {
            return Insertion::Rejected;
        }
        if let Some(existing) = self.get_mut(&property.name) {
            existing.duplicate_count += 1;
            existing.parse_errors.push(format!(
                "duplicate entry `{}` at line {}",
                property.name, property.line
            ));
            log::debug!(
                "duplicate property `{}` at line {} (first seen at line {})",
                property.name,
                property.line,
                existing.line
            );
            return Insertion::Duplicate;
        }
        self.index
            .insert(property.name.clone(), self.entries.len());
        self.entries.push(property);
        Insertion::Inserted
    }

    /// Swaps the entry with the same name for `property`, keeping its slot.
    /// Returns the previous entry, or inserts at the end when absent.
    pub(crate) fn replace(&mut self, property: Property) -> Option<Property> {
        match self.index.get(&property.name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], property)),
            None => {
                self.insert(property);
                None
            }
        }
    }

    /// Depth-first search for a property by name, in document order.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find_map(|p| find_in(p, name))
    }

    /// All block properties whose block type is `block_type`. When none
    /// exist, plain properties with that name are returned instead.
    pub fn find_blocks(&self, block_type: &str) -> Vec<&Property> {
        let mut found = Vec::new();
        for p in &self.entries {
            collect_blocks(p, block_type, true, &mut found);
        }
        if found.is_empty() {
            for p in &self.entries {
                collect_blocks(p, block_type, false, &mut found);
            }
        }
        found
    }

    /// Name of the first root block that nests a block of its own name
    /// (directly or transitively), if any.
    pub fn circular_reference(&self) -> Option<&str> {
        let mut visited = HashSet::new();
        self.entries
            .iter()
            .find(|p| p.block && reenters(p, &mut visited))
            .map(|p| p.name.as_str())
    }

    /// Copy of this tree with `other`'s properties merged in.
    ///
    /// Names present in both keep this tree's entry and gain a
    /// [`SameNameRef`] to the other section's line.
    pub fn merged_with(&self, other: &PropertyTree, other_position: Position) -> PropertyTree {
        let mut merged = self.clone();
        for p in &other.entries {
            match merged.get_mut(&p.name) {
                Some(existing) => {
                    existing.same_name_ref = Some(SameNameRef {
                        position: other_position,
                        line: p.line,
                    });
                }
                None => {
                    merged.insert(p.clone());
                }
            }
        }
        merged
    }
}

impl<'a> IntoIterator for &'a PropertyTree {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Property> for PropertyTree {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut tree = PropertyTree::new();
        for p in iter {
            tree.insert(p);
        }
        tree
    }
}

fn find_in<'a>(p: &'a Property, name: &str) -> Option<&'a Property> {
    if p.name == name {
        return Some(p);
    }
    p.nested()?.iter().find_map(|child| find_in(child, name))
}

fn collect_blocks<'a>(
    p: &'a Property,
    block_type: &str,
    need_block: bool,
    found: &mut Vec<&'a Property>,
) {
    if p.block && p.block_type_name == block_type {
        found.push(p);
        return;
    }
    if !need_block && p.block_type_name.is_empty() && p.name == block_type {
        found.push(p);
        return;
    }
    if let Some(nested) = p.nested() {
        for child in nested {
            collect_blocks(child, block_type, need_block, found);
        }
    }
}

fn reenters<'a>(p: &'a Property, visited: &mut HashSet<&'a str>) -> bool {
    if visited.contains(p.name.as_str()) {
        return true;
    }
    let Some(nested) = p.nested().filter(|_| p.block) else {
        return false;
    };
    visited.insert(&p.name);
    let found = nested.iter().any(|child| reenters(child, visited));
    visited.remove(p.name.as_str());
    found
}
