//! Character classification shared by the formatter and the import pass

/// What a character of Go source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    Code,
    LineComment,
    BlockComment,
    Str,
    RawStr,
    Rune,
}

impl Region {
    /// Regions that may span a line break
    pub(crate) fn spans_lines(self) -> bool {
        matches!(self, Region::RawStr | Region::BlockComment)
    }
}

fn line_of(chars: &[char], index: usize) -> usize {
    chars[..index].iter().filter(|c| **c == '\n').count() + 1
}

/// Classify every character of `chars`.
///
/// Quotes and comment markers belong to the region they open or close.
/// Fails on literals broken by a newline and on anything left open at the
/// end of input.
pub(crate) fn classify(chars: &[char]) -> Result<Vec<Region>, String> {
    let mut regions = Vec::with_capacity(chars.len());
    let mut state = Region::Code;
    let mut opened_at = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match state {
            Region::Code => {
                let entered = match (c, next) {
                    ('/', Some('/')) => Some(Region::LineComment),
                    ('/', Some('*')) => Some(Region::BlockComment),
                    ('"', _) => Some(Region::Str),
                    ('`', _) => Some(Region::RawStr),
                    ('\'', _) => Some(Region::Rune),
                    _ => None,
                };
                match entered {
                    Some(region @ (Region::LineComment | Region::BlockComment)) => {
                        regions.push(region);
                        regions.push(region);
                        state = region;
                        opened_at = i;
                        i += 2;
                        continue;
                    }
                    Some(region) => {
                        regions.push(region);
                        state = region;
                        opened_at = i;
                    }
                    None => regions.push(Region::Code),
                }
            }
            Region::LineComment => {
                if c == '\n' {
                    regions.push(Region::Code);
                    state = Region::Code;
                } else {
                    regions.push(Region::LineComment);
                }
            }
            Region::BlockComment => {
                regions.push(Region::BlockComment);
                if c == '*' && next == Some('/') {
                    regions.push(Region::BlockComment);
                    state = Region::Code;
                    i += 2;
                    continue;
                }
            }
            Region::RawStr => {
                regions.push(Region::RawStr);
                if c == '`' {
                    state = Region::Code;
                }
            }
            Region::Str | Region::Rune => {
                if c == '\n' {
                    return Err(format!(
                        "newline in literal opened at line {}",
                        line_of(chars, opened_at)
                    ));
                }
                regions.push(state);
                if c == '\\' && next.is_some_and(|n| n != '\n') {
                    regions.push(state);
                    i += 2;
                    continue;
                }
                let closing = if state == Region::Str { '"' } else { '\'' };
                if c == closing {
                    state = Region::Code;
                }
            }
        }
        i += 1;
    }

    match state {
        Region::Code | Region::LineComment => Ok(regions),
        Region::BlockComment => Err(format!(
            "comment opened at line {} is not terminated",
            line_of(chars, opened_at)
        )),
        Region::Str | Region::Rune | Region::RawStr => Err(format!(
            "literal opened at line {} is not terminated",
            line_of(chars, opened_at)
        )),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn regions_of(source: &str) -> Vec<Region> {
        let chars: Vec<char> = source.chars().collect();
        classify(&chars).unwrap()
    }

    #[test]
    fn classify___plain_code___all_code() {
        let regions = regions_of("a := b(c)");

        assert!(regions.iter().all(|r| *r == Region::Code));
    }

    #[test]
    fn classify___string_with_braces___braces_are_string() {
        let regions = regions_of("x(\"{\")");

        assert_eq!(regions[0], Region::Code);
        assert_eq!(regions[2], Region::Str);
        assert_eq!(regions[3], Region::Str);
        assert_eq!(regions[5], Region::Code);
    }

    #[test]
    fn classify___escaped_quote___string_continues() {
        let regions = regions_of(r#""a\"b" c"#);

        assert_eq!(regions[4], Region::Str);
        assert_eq!(regions[7], Region::Code);
    }

    #[test]
    fn classify___line_comment___ends_at_newline() {
        let regions = regions_of("// {\nx");

        assert_eq!(regions[3], Region::LineComment);
        assert_eq!(regions[5], Region::Code);
    }

    #[test]
    fn classify___raw_string_spans_lines___newline_is_raw() {
        let regions = regions_of("`a\nb`");

        assert_eq!(regions[2], Region::RawStr);
        assert!(regions[2].spans_lines());
    }

    #[test]
    fn classify___unterminated_string___error_names_line() {
        let chars: Vec<char> = "x\ny := \"abc".chars().collect();

        let err = classify(&chars).unwrap_err();

        assert!(err.contains("line 2"));
    }

    #[test]
    fn classify___newline_in_string___error() {
        let chars: Vec<char> = "\"abc\ndef\"".chars().collect();

        assert!(classify(&chars).is_err());
    }

    #[test]
    fn classify___unterminated_block_comment___error() {
        let chars: Vec<char> = "/* never closed".chars().collect();

        let err = classify(&chars).unwrap_err();

        assert!(err.contains("comment"));
    }
}
