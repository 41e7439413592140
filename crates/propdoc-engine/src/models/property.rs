use std::fmt;
use std::ops::{BitOr, BitOrAssign, Range};
use std::str::FromStr;
use std::sync::Arc;

use super::tree::PropertyTree;

/// Which documentation section a property was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Not attributed to any known section.
    #[default]
    Default,
    Example,
    Arguments,
    Attributes,
    Timeouts,
    Import,
    Other,
}

impl Position {
    /// Arguments and attributes are the only sections that describe schema fields.
    pub fn is_arg_or_attr(self) -> bool {
        matches!(self, Position::Arguments | Position::Attributes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Default => "default",
            Position::Example => "example",
            Position::Arguments => "arguments",
            Position::Attributes => "attributes",
            Position::Timeouts => "timeouts",
            Position::Import => "import",
            Position::Other => "other",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section position: {0}")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Position::Default),
            "example" | "examples" => Ok(Position::Example),
            "arguments" | "argument" | "args" => Ok(Position::Arguments),
            "attributes" | "attribute" | "attrs" => Ok(Position::Attributes),
            "timeouts" | "timeout" => Ok(Position::Timeouts),
            "import" => Ok(Position::Import),
            "other" => Ok(Position::Other),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

/// Required / Optional / Computed bit flags. `DEFAULT` (no bits) means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequirementStatus(u8);

impl RequirementStatus {
    pub const DEFAULT: Self = Self(0);
    pub const OPTIONAL: Self = Self(1 << 1);
    pub const REQUIRED: Self = Self(1 << 2);
    pub const COMPUTED: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_unknown(self) -> bool {
        self.0 == 0
    }

    pub fn is_required(self) -> bool {
        self.contains(Self::REQUIRED)
    }

    pub fn is_optional(self) -> bool {
        self.contains(Self::OPTIONAL)
    }

    pub fn is_computed(self) -> bool {
        self.contains(Self::COMPUTED)
    }

    /// Whether a user can set this field in configuration.
    pub fn is_user_settable(self) -> bool {
        self.is_required() || self.is_optional()
    }
}

impl BitOr for RequirementStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RequirementStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("Default");
        }
        let mut parts = Vec::new();
        if self.is_required() {
            parts.push("Required");
        }
        if self.is_optional() {
            parts.push("Optional");
        }
        if self.is_computed() {
            parts.push("Computed");
        }
        f.write_str(&parts.join("+"))
    }
}

/// Nested contents of a block property.
///
/// A definition owns the body it declares; a reference only links to the body
/// of a definition found elsewhere in the same section. Both hold the same
/// `Arc`, so every reference observes the definition's tree.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Defined(Arc<PropertyTree>),
    Linked(Arc<PropertyTree>),
}

impl BlockBody {
    pub fn tree(&self) -> &Arc<PropertyTree> {
        match self {
            BlockBody::Defined(tree) | BlockBody::Linked(tree) => tree,
        }
    }
}

/// Non-owning pointer to a property with the same name in another section,
/// e.g. an `identity` argument and an `identity` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameNameRef {
    pub position: Position,
    pub line: usize,
}

/// One documented or schema-declared field or block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    pub name: String,
    /// Dotted ancestor chain (`network.subnet`) when known at build time.
    pub path: String,
    /// 1-based source line, 0 when the property has no source line.
    pub line: usize,
    pub position: Position,
    pub requirement: RequirementStatus,
    pub default_value: Option<String>,
    pub force_new: bool,
    pub possible_values: Vec<String>,
    /// Byte range of the possible-values clause inside `content`.
    pub possible_values_span: Option<Range<usize>>,
    /// Low confidence enum candidates: code spans in a description without
    /// any possible-value phrase.
    pub guessed_values: Vec<String>,
    pub block: bool,
    pub block_type_name: String,
    /// Additional names declared on the same block heading.
    pub block_aliases: Vec<String>,
    pub nested: Option<BlockBody>,
    pub same_name_ref: Option<SameNameRef>,
    pub description: String,
    pub deprecated: bool,
    pub content: String,
    pub parse_errors: Vec<String>,
    pub duplicate_count: usize,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A property that starts a block body (`An `x` block supports the following:`).
    pub fn block_definition(name: impl Into<String>, position: Position, line: usize) -> Self {
        let name = name.into();
        Self {
            block: true,
            block_type_name: name.clone(),
            nested: Some(BlockBody::Defined(Arc::new(PropertyTree::new()))),
            position,
            line,
            name,
            ..Self::default()
        }
    }

    /// The nested tree, whether owned or linked.
    pub fn nested(&self) -> Option<&PropertyTree> {
        self.nested.as_ref().map(|body| body.tree().as_ref())
    }

    pub fn nested_arc(&self) -> Option<&Arc<PropertyTree>> {
        self.nested.as_ref().map(BlockBody::tree)
    }

    pub fn has_nested_content(&self) -> bool {
        self.nested().is_some_and(|tree| !tree.is_empty())
    }

    /// A block that declares its own non-empty body.
    pub fn is_definition(&self) -> bool {
        self.block
            && matches!(&self.nested, Some(BlockBody::Defined(tree)) if !tree.is_empty())
    }

    /// A block field that points at a definition by name.
    pub fn is_reference(&self) -> bool {
        self.block && !self.is_definition()
    }

    /// Whether a reference still waits for its definition.
    pub fn is_unresolved_reference(&self) -> bool {
        self.block && !self.has_nested_content()
    }

    /// The dotted path if one was recorded, otherwise the bare name.
    pub fn full_path(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }

    /// Names this block may be looked up by when linking references.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(
                (self.block_type_name != self.name).then_some(self.block_type_name.as_str()),
            )
            .chain(self.block_aliases.iter().map(String::as_str))
    }

    /// Appends possible values, keeping first-seen order and dropping repeats.
    pub fn add_possible_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            let value = trim_quotes(value.as_ref());
            if !value.is_empty() && !self.possible_values.iter().any(|v| v == value) {
                self.possible_values.push(value.to_string());
            }
        }
    }

    pub fn set_guessed_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guessed: Vec<String> = Vec::new();
        for value in values {
            let value = trim_quotes(value.as_ref());
            if !value.is_empty() && !guessed.iter().any(|v| v == value) {
                guessed.push(value.to_string());
            }
        }
        self.guessed_values = guessed;
    }

    /// Whether the documentation line marks this property as deprecated.
    pub fn mentions_deprecated(&self) -> bool {
        self.content.to_lowercase().contains("deprecated")
    }
}

pub(crate) fn trim_quotes(value: &str) -> &str {
    value.trim_matches(['`', '"', '\''])
}
