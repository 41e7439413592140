//! Fixed line shapes recognised in provider documentation.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `* `name` - (Required) description`
pub(crate) static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[*-] *`(.*?)` +- +(\(Required\)|\(Optional\))? ?(.*)")
        .expect("invalid field line regex")
});

pub(crate) static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("invalid code span regex"));

/// `An `identity` block supports the following:`
pub(crate) static BLOCK_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(an?|An?|The)[^`]+(`[a-zA-Z0-9_]+`[, and]*)+.*blocks?.*$")
        .expect("invalid block head regex")
});

/// `... Defaults to `false`.` (a line start also counts as a sentence boundary)
pub(crate) static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[.,?;])(?: *[Tt]he)? *[Dd]efaults?[^`'".]+(?:to|is) ('[^']+'|`[^`]+`|"[^"]+")[ .,]?"#)
        .expect("invalid default value regex")
});

/// The word `block` / `blocks` on its own.
pub(crate) static BLOCK_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bblocks?\b").expect("invalid block word regex"));

pub(crate) static FORCE_NEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?Changing.*forces? a [^.]*(\.|$)").expect("invalid force new regex")
});

/// Force-new that only applies under a condition ("... created when ...").
pub(crate) static CONDITIONAL_FORCE_NEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?Changing.*forces? a [^.]* created when [^.]*(\.|$)")
        .expect("invalid conditional force new regex")
});

/// `One or more `rule` blocks as defined below`
pub(crate) static BLOCK_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:[Oo]ne|[Ee]ach|more(?: \(.*\))?|[Tt]he|as|of|[Aa]n?) ['"`]([^ ]+)['"`] (?:block|object)[^.]+(?:below|above)"#,
    )
    .expect("invalid block property regex")
});

pub(crate) const BLOCK_TO_PHRASE: &str = "A block to";

/// Content of the first backtick-quoted token in `text`.
pub fn first_code_value(text: &str) -> Option<&str> {
    CODE_SPAN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Every backtick-quoted token with the byte range of its full span
/// (backticks included).
pub fn code_spans(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    CODE_SPAN.captures_iter(text).filter_map(|c| {
        let full = c.get(0)?;
        let inner = c.get(1)?;
        Some((full.range(), inner.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_code_value_skips_plain_text() {
        assert_eq!(first_code_value("see `network` below"), Some("network"));
        assert_eq!(first_code_value("no code here"), None);
        assert_eq!(first_code_value("empty `` pair"), None);
    }

    #[test]
    fn code_spans_report_full_ranges() {
        let spans: Vec<_> = code_spans("a `b` and `cd`").collect();
        assert_eq!(spans, vec![(2..5, "b"), (10..14, "cd")]);
    }

    #[test]
    fn field_line_captures_name_marker_and_description() {
        let caps = FIELD_LINE
            .captures("* `name` - (Required) The name.")
            .unwrap();
        assert_eq!(&caps[1], "name");
        assert_eq!(&caps[2], "(Required)");
        assert_eq!(&caps[3], "The name.");
    }

    #[test]
    fn block_head_requires_leading_article() {
        assert!(BLOCK_HEAD.is_match("An `identity` block supports the following:"));
        assert!(BLOCK_HEAD.is_match("The `network_profile` block supports:"));
        assert!(!BLOCK_HEAD.is_match("* `identity` - An `identity` block as defined below."));
    }
}
