use crate::models::Position;
use crate::vocabulary::Vocabulary;

use super::patterns::{BLOCK_HEAD, BLOCK_WORD, CODE_SPAN, first_code_value};

/// What a single documentation line is, judged without any context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// A markdown heading. `position` is set when the heading text is in the
    /// section vocabulary; other headings never change the current section.
    SectionHeading {
        level: usize,
        text: String,
        position: Option<Position>,
    },
    /// `An `x` block supports the following:` opens a block body.
    BlockHead {
        names: Vec<String>,
        /// Parent block named after " of " / " within ".
        parent: Option<String>,
    },
    /// `---` closes an open block body.
    Separator,
    /// A list item that may describe a field.
    FieldCandidate,
    /// Blank lines, HTML comments and `->` / `~>` notes.
    Skippable,
    Plain,
}

/// Classifies individual lines against a [`Vocabulary`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'v> {
    vocabulary: &'v Vocabulary,
}

impl Default for LineClassifier<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v> LineClassifier<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Never fails; anything unrecognised is [`LineClass::Plain`].
    pub fn classify(&self, line: &str) -> LineClass {
        let trimmed = line.trim();

        let class = if is_skippable(trimmed) {
            LineClass::Skippable
        } else if let Some((level, text)) = heading(trimmed) {
            LineClass::SectionHeading {
                level,
                position: self.vocabulary.heading_position(text),
                text: text.to_string(),
            }
        } else if trimmed == "---" {
            LineClass::Separator
        } else if let Some((names, parent)) = block_head(trimmed) {
            LineClass::BlockHead { names, parent }
        } else if trimmed.starts_with(['*', '-']) {
            LineClass::FieldCandidate
        } else {
            LineClass::Plain
        };

        log::trace!("{class:?}: {trimmed}");
        class
    }
}

/// Classifies with the standard vocabulary.
pub fn classify(line: &str) -> LineClass {
    LineClassifier::default().classify(line)
}

fn is_skippable(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.starts_with("<!--")
        || trimmed.starts_with("->")
        || trimmed.starts_with("~>")
}

fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

/// Block names come from code spans before the first word `block`, so a
/// trailing "as defined `below`" is never taken as a name.
fn block_head(trimmed: &str) -> Option<(Vec<String>, Option<String>)> {
    if !BLOCK_HEAD.is_match(trimmed) {
        return None;
    }
    let cut = block_word_outside_code(trimmed).filter(|&i| i > 0)?;
    let names: Vec<String> = CODE_SPAN
        .captures_iter(&trimmed[..cut])
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim_matches(['`', '\'']).to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }

    let parent = [" of ", " within "]
        .iter()
        .filter_map(|sep| trimmed.find(sep))
        .min()
        .and_then(|at| first_code_value(&trimmed[at..]))
        .filter(|parent| *parent != names[0])
        .map(str::to_string);

    Some((names, parent))
}

/// Byte offset of the first `block` word that is not inside a code span.
fn block_word_outside_code(trimmed: &str) -> Option<usize> {
    let spans: Vec<_> = CODE_SPAN.find_iter(trimmed).map(|m| m.range()).collect();
    BLOCK_WORD
        .find_iter(trimmed)
        .map(|m| m.start())
        .find(|at| !spans.iter().any(|span| span.contains(at)))
}
