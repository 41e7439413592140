//! A resource documentation page split into its sections.
//!
//! Sections start at level 1 and level 2 headings. Each section builds its
//! [`PropertyTree`] lazily and keeps it until the content is replaced.

pub mod lines;

use std::sync::{Arc, OnceLock};

use xi_rope::Rope;

use crate::models::{Position, PropertyTree};
use crate::parsing::{LineClass, LineClassifier, StructureBuilder};
use crate::vocabulary::Vocabulary;

pub use lines::{LineRef, numbered_lines};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

#[derive(Debug, Clone)]
pub struct Section {
    pub heading: String,
    pub level: usize,
    pub position: Position,
    /// Document line number of the first content line.
    pub start_line: usize,
    content: Vec<String>,
    vocabulary: Arc<Vocabulary>,
    properties: OnceLock<Arc<PropertyTree>>,
}

impl Section {
    fn new(
        heading: &str,
        level: usize,
        position: Position,
        start_line: usize,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            heading: heading.to_string(),
            level,
            position,
            start_line,
            content: Vec::new(),
            vocabulary,
            properties: OnceLock::new(),
        }
    }

    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// The section's tree, built on first use and cached until
    /// [`Section::set_content`] is called.
    pub fn properties(&self) -> Arc<PropertyTree> {
        let tree = self.properties.get_or_init(|| {
            log::debug!(
                "building {} section `{}` ({} lines)",
                self.position,
                self.heading,
                self.content.len()
            );
            let mut builder = StructureBuilder::with_vocabulary(&self.vocabulary, self.position)
                .starting_at_line(self.start_line);
            for line in &self.content {
                builder.push(line);
            }
            Arc::new(builder.finish())
        });
        Arc::clone(tree)
    }

    pub fn set_content<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = lines.into_iter().map(Into::into).collect();
        self.properties = OnceLock::new();
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self::from_rope(&Rope::from(text), Arc::new(Vocabulary::default()))
    }

    pub fn parse_with(text: &str, vocabulary: Arc<Vocabulary>) -> Self {
        Self::from_rope(&Rope::from(text), vocabulary)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Ok(Self::parse(std::str::from_utf8(bytes)?))
    }

    /// Splits at level 1/2 headings outside fenced code. Content before the
    /// first heading forms a `Default` section.
    pub fn from_rope(rope: &Rope, vocabulary: Arc<Vocabulary>) -> Self {
        let classifier = LineClassifier::new(&vocabulary);
        let preamble = Section::new("", 0, Position::Default, 1, Arc::clone(&vocabulary));
        let mut sections = vec![preamble];
        let mut fence: Option<&'static str> = None;

        for line in numbered_lines(rope) {
            let trimmed = line.text.trim_start();
            match fence {
                Some(marker) => {
                    if trimmed.starts_with(marker) {
                        fence = None;
                    }
                }
                None => {
                    fence = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m));
                }
            }

            let in_code = fence.is_some() || trimmed.starts_with("```") || trimmed.starts_with("~~~");
            if !in_code
                && let LineClass::SectionHeading { level, text, position } =
                    classifier.classify(&line.text)
                && level <= 2
            {
                sections.push(Section::new(
                    &text,
                    level,
                    position.unwrap_or(Position::Other),
                    line.number + 1,
                    Arc::clone(&vocabulary),
                ));
                continue;
            }

            if let Some(current) = sections.last_mut() {
                current.content.push(line.text);
            }
        }

        // A preamble with nothing but blank lines is dropped.
        if sections.len() > 1 && sections[0].content.iter().all(|l| l.trim().is_empty()) {
            sections.remove(0);
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    /// First section at `position`.
    pub fn section(&self, position: Position) -> Option<&Section> {
        self.sections.iter().find(|s| s.position == position)
    }

    pub fn section_mut(&mut self, position: Position) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.position == position)
    }

    /// Tree of the first section at `position`; empty when there is none.
    pub fn properties(&self, position: Position) -> Arc<PropertyTree> {
        self.section(position)
            .map(Section::properties)
            .unwrap_or_default()
    }

    pub fn arguments(&self) -> Arc<PropertyTree> {
        self.properties(Position::Arguments)
    }

    pub fn attributes(&self) -> Arc<PropertyTree> {
        self.properties(Position::Attributes)
    }

    pub fn timeouts(&self) -> Arc<PropertyTree> {
        self.properties(Position::Timeouts)
    }

    /// Arguments followed by attributes; a name in both keeps the argument
    /// and links to the attribute's line.
    pub fn merged_properties(&self) -> PropertyTree {
        self.arguments()
            .merged_with(&self.attributes(), Position::Attributes)
    }
}
