//! Line comments attached to declarations

/// Number of words per line when free text is wrapped into comments
pub const WRAP_WORDS: usize = 15;

/// Split free text into lines of at most [`WRAP_WORDS`] words.
///
/// Existing line breaks are not preserved; words are re-flowed.
pub fn wrap_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .chunks(WRAP_WORDS)
        .map(|words| words.join(" "))
        .collect()
}

/// A block of `//` comment lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    lines: Vec<String>,
}

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment from text, one comment line per text line
    pub fn from_text(text: &str) -> Self {
        let mut comment = Self::new();
        for line in text.lines() {
            comment.line(line.strip_prefix(' ').unwrap_or(line));
        }
        comment
    }

    /// Comment from free text re-flowed with [`wrap_words`]
    pub fn wrapped(text: &str) -> Self {
        Self {
            lines: wrap_words(text),
        }
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into().trim_end().to_string());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render as `// line` rows joined by newlines, without a trailing one
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                if line.is_empty() {
                    "//".to_string()
                } else {
                    format!("// {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render followed by a newline, or nothing for an empty comment
    pub(crate) fn render_prefix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{}\n", self.render())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn wrap_words___sixteen_words___two_lines() {
        let text = (1..=16).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");

        let lines = wrap_words(&text);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(' ').count(), WRAP_WORDS);
        assert_eq!(lines[1], "16");
    }

    #[test]
    fn wrap_words___irregular_spacing___normalized() {
        let lines = wrap_words("  Sends a\n   greeting  ");

        assert_eq!(lines, vec!["Sends a greeting"]);
    }

    #[test]
    fn wrap_words___blank___no_lines() {
        assert!(wrap_words(" \n ").is_empty());
    }

    #[test]
    fn Comment___render___prefixes_each_line() {
        let mut comment = Comment::new();
        comment.line("first").line("").line("second");

        assert_eq!(comment.render(), "// first\n//\n// second");
    }

    #[test]
    fn Comment___from_text___strips_one_leading_space() {
        let comment = Comment::from_text(" The greeting service\n  indented");

        assert_eq!(comment.lines(), ["The greeting service", " indented"]);
    }

    #[test]
    fn Comment___render_prefix_empty___nothing() {
        assert_eq!(Comment::new().render_prefix(), "");
    }
}
