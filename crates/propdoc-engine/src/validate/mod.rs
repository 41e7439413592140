//! # Schema / Documentation Cross-Check
//!
//! Diffs a schema tree against a documentation tree in both directions:
//!
//! - **schema → docs**: every user-settable schema field must be documented,
//!   required and force-new fields must say so, and schema blocks must be
//!   documented as blocks
//! - **docs → schema**: every documented field must exist in the schema
//!
//! Findings are returned as [`Diagnostic`] values; an empty list means the
//! two trees agree. Inputs are never modified.
//!
//! Both trees are finite: schema bodies are owned and linked doc bodies are
//! shared `Arc`s with self references already cut by the linker. A repeated
//! name along a path (`rule.rule`) is ordinary nesting and is checked.

use std::collections::HashSet;
use std::fmt;

use crate::models::{PropertyTree, RequirementStatus};
use crate::parsing::patterns::first_code_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    MissingFromDocs,
    ShouldBeBlock,
    /// Documented as a block, but no block body was found for it.
    BlockBodyMissing,
    /// Required in the schema but not marked `(Required)` in the docs.
    RequirementMismatch,
    /// Replaces the resource when changed, but the docs do not say so.
    ForceNewMismatch,
    UndocumentedInSchema,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::MissingFromDocs => "missing-from-docs",
            DiagnosticKind::ShouldBeBlock => "should-be-block",
            DiagnosticKind::BlockBodyMissing => "block-body-missing",
            DiagnosticKind::RequirementMismatch => "requirement-mismatch",
            DiagnosticKind::ForceNewMismatch => "force-new-mismatch",
            DiagnosticKind::UndocumentedInSchema => "undocumented-in-schema",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Dotted path from the section root.
    pub path: String,
    /// Documentation line, 0 when the finding has no line.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at line {}",
            self.kind.code(),
            self.message,
            self.line
        )
    }
}

impl Diagnostic {
    fn missing_from_docs(path: &str) -> Self {
        Self {
            kind: DiagnosticKind::MissingFromDocs,
            path: path.to_string(),
            line: 0,
            message: format!(
                "argument `{path}` exists in schema but is missing from documentation"
            ),
        }
    }

    fn should_be_block(path: &str, name: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::ShouldBeBlock,
            path: path.to_string(),
            line,
            message: format!(
                "argument `{path}` should be declared as a block \
                 (e.g., 'One or more `{name}` block as defined below')"
            ),
        }
    }

    fn block_body_missing(path: &str, name: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::BlockBodyMissing,
            path: path.to_string(),
            line,
            message: format!(
                "`{path}` block is missing from documentation \
                 (e.g. A / An `{name}` block supports the following:)"
            ),
        }
    }

    fn requirement_mismatch(path: &str, documented: RequirementStatus, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::RequirementMismatch,
            path: path.to_string(),
            line,
            message: format!(
                "argument `{path}` should be marked as (Required) but is marked as {documented}"
            ),
        }
    }

    fn force_new_mismatch(path: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::ForceNewMismatch,
            path: path.to_string(),
            line,
            message: format!(
                "argument `{path}` forces a new resource but the documentation is missing \
                 'Changing this forces a new resource to be created.'"
            ),
        }
    }

    fn undocumented_in_schema(path: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::UndocumentedInSchema,
            path: path.to_string(),
            line,
            message: format!(
                "argument `{path}` is documented but does not exist in schema - \
                 should this be removed or is it misspelled?"
            ),
        }
    }
}

/// Runs both directions of the cross-check.
#[derive(Debug, Clone)]
pub struct Validator {
    ignored: HashSet<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_ignored(["id"])
    }
}

impl Validator {
    /// Ignores `id` only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self, schema: &PropertyTree, doc: &PropertyTree) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.missing_in_docs(schema, doc, "", &mut out);
        self.missing_in_schema(doc, schema, "", &mut out);
        log::debug!("cross-check produced {} diagnostics", out.len());
        out
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    fn missing_in_docs(
        &self,
        schema: &PropertyTree,
        doc: &PropertyTree,
        parent: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        for sp in schema {
            if !sp.requirement.is_user_settable() || sp.deprecated || self.is_ignored(&sp.name) {
                continue;
            }
            let path = join(parent, &sp.name);

            let Some(dp) = doc.get(&sp.name) else {
                out.push(Diagnostic::missing_from_docs(&path));
                continue;
            };

            if sp.requirement.is_required() && !dp.requirement.is_required() {
                out.push(Diagnostic::requirement_mismatch(&path, dp.requirement, dp.line));
            }
            if sp.force_new && !dp.force_new {
                out.push(Diagnostic::force_new_mismatch(&path, dp.line));
            }

            let Some(schema_nested) = sp.nested().filter(|t| !t.is_empty()) else {
                continue;
            };
            let Some(doc_nested) = dp.nested().filter(|t| !t.is_empty()) else {
                if dp.block {
                    out.push(Diagnostic::block_body_missing(&path, &sp.name, dp.line));
                } else {
                    out.push(Diagnostic::should_be_block(&path, &sp.name, dp.line));
                }
                continue;
            };

            self.missing_in_docs(schema_nested, doc_nested, &path, out);
        }
    }

    fn missing_in_schema(
        &self,
        doc: &PropertyTree,
        schema: &PropertyTree,
        parent: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        for dp in doc {
            if self.is_ignored(&dp.name) {
                continue;
            }
            // Definitions are checked through the fields that reference them.
            if parent.is_empty() && dp.is_definition() {
                continue;
            }
            if dp.mentions_deprecated() {
                continue;
            }
            let path = join(parent, &dp.name);

            let Some(sp) = schema.get(&dp.name) else {
                if not_available_here(&dp.content, &path) {
                    log::debug!("`{path}` is documented as not available here, skipping");
                } else {
                    out.push(Diagnostic::undocumented_in_schema(&path, dp.line));
                }
                continue;
            };

            if dp.block {
                continue;
            }
            if let (Some(doc_nested), Some(schema_nested)) = (
                dp.nested().filter(|t| !t.is_empty()),
                sp.nested().filter(|t| !t.is_empty()),
            ) {
                self.missing_in_schema(doc_nested, schema_nested, &path, out);
            }
        }
    }
}

/// Cross-check with the default ignored names.
pub fn validate(schema: &PropertyTree, doc: &PropertyTree) -> Vec<Diagnostic> {
    Validator::new().validate(schema, doc)
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// "Not available for `x`" documents a field that only applies elsewhere;
/// it is accepted when `x` is part of the current path.
fn not_available_here(content: &str, path: &str) -> bool {
    content
        .to_ascii_lowercase()
        .find("not available for")
        .filter(|&at| at > 0)
        .and_then(|at| first_code_value(&content[at..]))
        .is_some_and(|value| path.contains(value))
}
