//! Turns one field line into a [`Property`].
//!
//! Extraction is total: a line that cannot be understood still yields a
//! property, with an empty name and the reason in `parse_errors`. Callers
//! must not insert nameless properties.

use crate::models::{Position, Property, RequirementStatus};
use crate::models::property::trim_quotes;
use crate::vocabulary::Vocabulary;

use super::patterns::{
    BLOCK_PROPERTY, BLOCK_TO_PHRASE, CODE_SPAN, CONDITIONAL_FORCE_NEW, DEFAULT_VALUE, FIELD_LINE,
    FORCE_NEW,
    code_spans, first_code_value,
};

pub const NO_FIELD_NAME: &str = "no field name found";
pub const AMBIGUOUS_POSSIBLE_VALUES: &str =
    "multiple possible value sections detected, skipping enum extraction";

#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor<'v> {
    vocabulary: &'v Vocabulary,
}

impl Default for FieldExtractor<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v> FieldExtractor<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, line: &str, line_number: usize, position: Position) -> Property {
        let mut field = Property {
            content: line.to_string(),
            line: line_number,
            position,
            default_value: default_value(line),
            force_new: is_force_new(line),
            ..Property::default()
        };

        // `content` keeps the source line; list indentation is only skipped for matching
        let primary = FIELD_LINE.captures(line.trim_start());
        let description = match primary
            .as_ref()
            .and_then(|c| c.get(1))
            .filter(|m| !m.as_str().is_empty())
        {
            Some(name) => {
                field.name = name.as_str().to_string();
                primary.as_ref().and_then(|c| c.get(3)).map(|m| m.as_str())
            }
            None => match first_code_value(line) {
                Some(name) => {
                    field.name = name.to_string();
                    None
                }
                None => {
                    log::debug!("line {line_number}: {NO_FIELD_NAME}: {line}");
                    field.parse_errors.push(NO_FIELD_NAME.to_string());
                    return field;
                }
            },
        };

        field.description = description.unwrap_or_default().trim().to_string();
        field.deprecated = field.mentions_deprecated();
        field.requirement = requirement_status(line);
        self.extract_possible_values(line, description, &mut field);

        if is_block_property(line) {
            field.block = true;
            field.block_type_name = block_type_name(line).unwrap_or(&field.name).to_string();
        }

        field
    }

    /// Collects the code spans of the first possible-values clause.
    ///
    /// The clause ends at the first period outside a code span, so versions
    /// such as `7.2` do not cut it short. A line with a second clause is
    /// ambiguous and keeps no values at all.
    fn extract_possible_values(&self, line: &str, description: Option<&str>, field: &mut Property) {
        let Some(phrase) = self.vocabulary.find_enum_phrase(line) else {
            if let Some(description) = description.filter(|d| d.contains('`')) {
                field.set_guessed_values(code_spans(description).map(|(_, value)| value));
            }
            return;
        };

        if self.vocabulary.find_enum_phrase(&line[phrase.end..]).is_some() {
            log::debug!(
                "line {}: `{}` has more than one possible value clause",
                field.line,
                field.name
            );
            field.parse_errors.push(AMBIGUOUS_POSSIBLE_VALUES.to_string());
            return;
        }

        let clause = &line[phrase.start..];
        let mut clause_end = clause.find('.').unwrap_or(clause.len());
        let mut values = Vec::new();
        let mut last_end = None;
        for span in CODE_SPAN.find_iter(clause) {
            let (start, end) = (span.start(), span.end());
            if clause_end > start && clause_end < end {
                clause_end = clause[end..]
                    .find('.')
                    .map_or(clause.len(), |offset| end + offset);
            }
            if clause_end < start {
                break;
            }
            values.push(span.as_str());
            last_end = Some(end);
        }

        field.add_possible_values(values);
        field.possible_values_span = last_end.map(|end| phrase.start..phrase.start + end);
    }
}

/// Extracts with the standard vocabulary.
pub fn extract(line: &str, line_number: usize, position: Position) -> Property {
    FieldExtractor::default().extract(line, line_number, position)
}

/// The explicit `(Required)` / `(Optional)` marker wins; otherwise a bare
/// "Required" or "Optional" anywhere on the line is taken as a weaker hint.
pub fn requirement_status(line: &str) -> RequirementStatus {
    if line.contains("(Required)") {
        RequirementStatus::REQUIRED
    } else if line.contains("(Optional)") {
        RequirementStatus::OPTIONAL
    } else if line.contains("Required") {
        RequirementStatus::REQUIRED
    } else if line.contains("Optional") {
        RequirementStatus::OPTIONAL
    } else {
        RequirementStatus::DEFAULT
    }
}

pub fn default_value(line: &str) -> Option<String> {
    let quoted = DEFAULT_VALUE.captures(line)?.get(1)?.as_str();
    (quoted.len() > 2).then(|| quoted[1..quoted.len() - 1].to_string())
}

/// Unconditional replacement only; "... created when ..." does not count.
pub fn is_force_new(line: &str) -> bool {
    FORCE_NEW.is_match(line) && !CONDITIONAL_FORCE_NEW.is_match(line)
}

pub fn is_block_property(line: &str) -> bool {
    BLOCK_PROPERTY.is_match(line) || line.contains(BLOCK_TO_PHRASE)
}

fn block_type_name(line: &str) -> Option<&str> {
    let name = trim_quotes(BLOCK_PROPERTY.captures(line)?.get(1)?.as_str());
    (!name.is_empty()).then_some(name)
}
