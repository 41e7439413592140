use std::sync::Arc;

use crate::models::{BlockBody, Position, Property, PropertyTree};
use crate::vocabulary::Vocabulary;

use super::{
    classify::{LineClass, LineClassifier},
    extract::FieldExtractor,
    link::link_references,
};

#[derive(Debug)]
enum BlockState {
    Closed,
    Open { head: Property, body: PropertyTree },
}

/// Assembles a section's lines into a [`PropertyTree`].
///
/// Lines are pushed one at a time; [`StructureBuilder::finish`] commits any
/// block still open at end of input and runs the linking pass.
pub struct StructureBuilder<'v> {
    classifier: LineClassifier<'v>,
    extractor: FieldExtractor<'v>,
    position: Position,
    line_number: usize,
    block: BlockState,
    root: PropertyTree,
    definitions: Vec<Property>,
}

impl StructureBuilder<'static> {
    pub fn new(position: Position) -> Self {
        Self::with_vocabulary(Vocabulary::standard(), position)
    }
}

impl<'v> StructureBuilder<'v> {
    pub fn with_vocabulary(vocabulary: &'v Vocabulary, position: Position) -> Self {
        Self {
            classifier: LineClassifier::new(vocabulary),
            extractor: FieldExtractor::new(vocabulary),
            position,
            line_number: 0,
            block: BlockState::Closed,
            root: PropertyTree::new(),
            definitions: Vec::new(),
        }
    }

    /// Numbers the next pushed line `first_line` (1-based) instead of 1.
    pub fn starting_at_line(mut self, first_line: usize) -> Self {
        self.line_number = first_line.saturating_sub(1);
        self
    }

    pub fn push(&mut self, line: &str) {
        self.line_number += 1;

        match self.classifier.classify(line) {
            LineClass::SectionHeading {
                position: Some(position),
                ..
            } => {
                self.commit_block();
                self.position = position;
            }
            LineClass::BlockHead { names, parent } => {
                self.commit_block();
                self.open_block(line, names, parent);
            }
            LineClass::Separator => self.commit_block(),
            LineClass::FieldCandidate => self.push_field(line),
            LineClass::SectionHeading { .. } | LineClass::Skippable | LineClass::Plain => {}
        }
    }

    pub fn finish(mut self) -> PropertyTree {
        // EOF commit
        self.commit_block();
        link_references(self.definitions, &mut self.root);
        self.root
    }

    fn open_block(&mut self, line: &str, names: Vec<String>, parent: Option<String>) {
        let mut names = names.into_iter();
        let Some(name) = names.next() else {
            return;
        };
        let mut head = Property::block_definition(name, self.position, self.line_number);
        head.block_aliases = names.collect();
        head.content = line.to_string();
        if let Some(parent) = parent {
            head.path = format!("{parent}.{}", head.name);
        }
        self.block = BlockState::Open {
            head,
            body: PropertyTree::new(),
        };
    }

    fn push_field(&mut self, line: &str) {
        let mut field = self.extractor.extract(line, self.line_number, self.position);
        if field.name.is_empty() {
            log::debug!(
                "line {}: discarding list item without a field name",
                self.line_number
            );
            return;
        }

        match &mut self.block {
            BlockState::Open { head, body } => {
                field.path = format!("{}.{}", head.full_path(), field.name);
                body.insert(field);
            }
            BlockState::Closed => {
                // A field named after an earlier definition takes its slot;
                // the definition stays available for linking.
                if self.root.get(&field.name).is_some_and(Property::is_definition) {
                    self.root.replace(field);
                } else {
                    self.root.insert(field);
                }
            }
        }
    }

    fn commit_block(&mut self) {
        let BlockState::Open { mut head, body } =
            std::mem::replace(&mut self.block, BlockState::Closed)
        else {
            return;
        };
        if body.is_empty() {
            log::debug!(
                "line {}: block `{}` declares no fields",
                head.line,
                head.name
            );
            return;
        }

        head.nested = Some(BlockBody::Defined(Arc::new(body)));
        self.definitions.push(head.clone());

        let taken_by_field = self
            .root
            .get(&head.name)
            .is_some_and(|existing| !existing.is_definition());
        if !taken_by_field {
            self.root.insert(head);
        }
    }
}
