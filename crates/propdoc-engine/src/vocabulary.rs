//! Phrase tables the classifier and extractor match against.
//!
//! The built-in tables cover the standard Terraform provider documentation
//! layout. Extra entries can be appended through [`Vocabulary::with_extensions`]
//! without touching the parsing code.

use std::ops::Range;
use std::sync::LazyLock;

use crate::models::Position;

/// Lowercased heading prefixes and the section each one opens.
pub const SECTION_HEADINGS: &[(&str, Position)] = &[
    ("arguments reference", Position::Arguments),
    ("argument reference", Position::Arguments),
    ("attributes reference", Position::Attributes),
    ("attribute reference", Position::Attributes),
    ("timeouts", Position::Timeouts),
    ("timeout", Position::Timeouts),
    ("example usage", Position::Example),
    ("import", Position::Import),
];

/// Phrases that introduce an authoritative list of possible values.
pub const ENUM_PHRASES: &[&str] = &[
    "possible value",
    "must be one of",
    "be one of",
    "allowed value",
    "valid value",
    "supported value",
    "valid option",
    "accepted value",
];

static STANDARD: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::default);

#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    headings: Vec<(String, Position)>,
    enum_phrases: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            headings: SECTION_HEADINGS
                .iter()
                .map(|(text, position)| (text.to_string(), *position))
                .collect(),
            enum_phrases: ENUM_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    /// The shared built-in vocabulary.
    pub fn standard() -> &'static Vocabulary {
        &STANDARD
    }

    /// Built-in tables followed by the given extra headings and phrases.
    /// Blank entries are dropped.
    pub fn with_extensions<H, P>(headings: H, enum_phrases: P) -> Self
    where
        H: IntoIterator<Item = (String, Position)>,
        P: IntoIterator<Item = String>,
    {
        let mut vocabulary = Self::default();
        vocabulary.headings.extend(
            headings
                .into_iter()
                .map(|(text, position)| (text.trim().to_lowercase(), position))
                .filter(|(text, _)| !text.is_empty()),
        );
        vocabulary.enum_phrases.extend(
            enum_phrases
                .into_iter()
                .map(|p| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty()),
        );
        vocabulary
    }

    /// Section opened by a heading's text, if the text is in the table.
    ///
    /// Entries match whole leading words, so `import` does not open a section
    /// for "Important notes".
    pub fn heading_position(&self, heading_text: &str) -> Option<Position> {
        let lower = heading_text.trim().to_lowercase();
        self.headings
            .iter()
            .find(|(prefix, _)| {
                lower
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
            })
            .map(|(_, position)| *position)
    }

    /// Byte range of the earliest enum phrase in `text`, if any.
    ///
    /// Matching is ASCII case-insensitive so the range stays valid for `text`.
    /// When two phrases start at the same offset the longer one wins.
    pub fn find_enum_phrase(&self, text: &str) -> Option<Range<usize>> {
        let lower = text.to_ascii_lowercase();
        self.enum_phrases
            .iter()
            .filter_map(|phrase| lower.find(phrase.as_str()).map(|at| at..at + phrase.len()))
            .min_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
    }

    pub fn enum_phrases(&self) -> impl Iterator<Item = &str> {
        self.enum_phrases.iter().map(String::as_str)
    }
}
