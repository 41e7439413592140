use xi_rope::Rope;

/// One line of a document, without its line ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

/// Numbered lines of the rope. `\n` and `\r\n` endings are both stripped.
pub fn numbered_lines(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    rope.lines_raw(..).enumerate().map(|(i, line)| {
        let text = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);
        LineRef {
            number: i + 1,
            text: text.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_both_line_endings() {
        let rope = Rope::from("first\r\nsecond\nthird");
        let lines: Vec<_> = numbered_lines(&rope).collect();
        assert_eq!(
            lines,
            vec![
                LineRef { number: 1, text: "first".into() },
                LineRef { number: 2, text: "second".into() },
                LineRef { number: 3, text: "third".into() },
            ]
        );
    }

    #[test]
    fn blank_lines_are_kept() {
        let rope = Rope::from("a\n\nb\n");
        let texts: Vec<_> = numbered_lines(&rope).map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }
}
