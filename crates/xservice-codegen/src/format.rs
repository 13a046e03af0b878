//! Canonical layout for generated Go source
//!
//! The pass checks that brackets balance outside of literals and comments,
//! rejects `else` and `case` clauses that have no `if` or `switch` to attach
//! to, re-indents every line with tabs according to its nesting depth and
//! tidies blank lines. Like gofmt it aligns the type column of consecutive
//! struct fields and the value column of consecutive `key: value` lines in
//! composite literals.

use crate::lex::{self, Region};
use xservice_core::{GenError, GenResult};

/// What opened a bracket, as far as layout is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opener {
    Group,
    Block,
    If,
    Else,
    Switch,
    Struct,
    Literal,
}

impl Opener {
    /// Classify `bracket` from the text preceding it on its line
    fn of(bracket: char, before: &str) -> Self {
        if bracket != '{' {
            return Opener::Group;
        }
        let head = before.trim();
        if head.ends_with("struct") {
            return Opener::Struct;
        }
        if !head.is_empty() && !before.ends_with(char::is_whitespace) {
            return Opener::Literal;
        }
        let head = head.strip_prefix('}').map_or(head, str::trim_start);
        if head.starts_with("if ") || head.starts_with("else if ") {
            Opener::If
        } else if head == "else" {
            Opener::Else
        } else if head == "switch" || head.starts_with("switch ") || head == "select" {
            Opener::Switch
        } else {
            Opener::Block
        }
    }
}

struct SourceLine {
    depth: usize,
    verbatim: bool,
    /// The innermost bracket open when the line starts
    enclosing: Option<Opener>,
    /// Opens and closes nothing beyond its own line
    balanced: bool,
    text: String,
}

fn format_error(reason: String, source: &str) -> GenError {
    GenError::Format {
        reason,
        source_text: source.to_string(),
    }
}

fn closes(open: char, close: char) -> bool {
    matches!((open, close), ('{', '}') | ('(', ')') | ('[', ']'))
}

/// `closed_first` is the opener of the brace that begins the line, if any
fn check_clauses(
    text: &str,
    line_no: usize,
    enclosing: Option<Opener>,
    closed_first: Option<Opener>,
) -> Result<(), String> {
    let trimmed = text.trim();
    if trimmed.starts_with("} else {") || trimmed.starts_with("} else if ") {
        if closed_first != Some(Opener::If) {
            return Err(format!("else without a preceding if at line {line_no}"));
        }
    } else if trimmed == "else" || trimmed.starts_with("else {") || trimmed.starts_with("else if ") {
        return Err(format!("else not attached to a closing brace at line {line_no}"));
    }
    let clause = if trimmed.starts_with("case ") {
        Some("case")
    } else if trimmed.starts_with("default:") {
        Some("default")
    } else {
        None
    };
    match clause {
        Some(clause) if enclosing != Some(Opener::Switch) => {
            Err(format!("{clause} outside of a switch at line {line_no}"))
        }
        _ => Ok(()),
    }
}

fn split_lines(source: &str) -> Result<Vec<SourceLine>, String> {
    let chars: Vec<char> = source.chars().collect();
    let regions = lex::classify(&chars)?;

    let mut lines = Vec::new();
    let mut stack: Vec<(char, usize, Opener)> = Vec::new();
    let mut current = String::new();
    let mut depth = 0;
    let mut enclosing = None;
    let mut closed_first = None;
    let mut verbatim = false;
    let mut line_no = 1;

    for (&c, &region) in chars.iter().zip(&regions) {
        if c == '\n' {
            if !verbatim {
                check_clauses(&current, line_no, enclosing, closed_first)?;
            }
            lines.push(SourceLine {
                depth,
                verbatim,
                enclosing,
                balanced: closed_first.is_none() && stack.len() == depth,
                text: std::mem::take(&mut current),
            });
            line_no += 1;
            depth = stack.len();
            enclosing = stack.last().map(|(_, _, opener)| *opener);
            closed_first = None;
            verbatim = region.spans_lines();
            continue;
        }
        let before = current.len();
        current.push(c);
        if region != Region::Code {
            continue;
        }
        match c {
            '{' | '(' | '[' => stack.push((c, line_no, Opener::of(c, &current[..before]))),
            '}' | ')' | ']' => match stack.pop() {
                Some((open, _, opener)) if closes(open, c) => {
                    if c == '}' && current.trim() == "}" {
                        closed_first = Some(opener);
                    }
                }
                Some((open, opened, _)) => {
                    return Err(format!(
                        "expected closing of {open:?} from line {opened}, found {c:?} at line {line_no}"
                    ));
                }
                None => return Err(format!("unexpected {c:?} at line {line_no}")),
            },
            _ => {}
        }
    }
    if !current.is_empty() {
        if !verbatim {
            check_clauses(&current, line_no, enclosing, closed_first)?;
        }
        lines.push(SourceLine {
            depth,
            verbatim,
            enclosing,
            balanced: closed_first.is_none() && stack.len() == depth,
            text: current,
        });
    }
    if let Some((open, opened, _)) = stack.last() {
        return Err(format!("{open:?} opened at line {opened} is never closed"));
    }
    Ok(lines)
}

fn indent_of(line: &SourceLine, trimmed: &str) -> usize {
    let dedent = trimmed.starts_with(['}', ')', ']'])
        || trimmed.starts_with("case ")
        || trimmed.starts_with("default:");
    if dedent {
        line.depth.saturating_sub(1)
    } else {
        line.depth
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// A line whose columns take part in alignment
#[derive(Debug, PartialEq, Eq)]
enum Cells<'a> {
    /// `name Type` with an optional raw string tag
    Field {
        name: &'a str,
        ty: &'a str,
        tag: Option<&'a str>,
    },
    /// `key: value` inside a composite literal
    Keyed { key: &'a str, value: &'a str },
}

fn cells_of<'a>(line: &SourceLine, trimmed: &'a str) -> Option<Cells<'a>> {
    if line.verbatim || !line.balanced || trimmed.starts_with("//") {
        return None;
    }
    match line.enclosing? {
        Opener::Struct => {
            let (name, rest) = trimmed.split_once(' ')?;
            let rest = rest.trim_start();
            if !is_identifier(name) || rest.is_empty() {
                return None;
            }
            let (ty, tag) = match rest.find(" `") {
                Some(at) => (rest[..at].trim_end(), Some(rest[at..].trim_start())),
                None => (rest, None),
            };
            Some(Cells::Field { name, ty, tag })
        }
        Opener::Literal => {
            let (key, value) = trimmed.split_once(':')?;
            let value = value.trim_start();
            if !is_identifier(key) || value.is_empty() || value.starts_with('=') {
                return None;
            }
            Some(Cells::Keyed { key, value })
        }
        _ => None,
    }
}

impl Cells<'_> {
    /// Width of the leading column, colon included
    fn lead_width(&self) -> usize {
        match self {
            Cells::Field { name, .. } => name.chars().count(),
            Cells::Keyed { key, .. } => key.chars().count() + 1,
        }
    }

    fn tagged_type_width(&self) -> Option<usize> {
        match self {
            Cells::Field { ty, tag: Some(_), .. } => Some(ty.chars().count()),
            _ => None,
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text.chars().count()) + 1))
}

/// One alignable line: its index, its depth and its cells
type RunLine<'a> = (usize, usize, Cells<'a>);

fn align_run(lines: &mut [Option<String>], run: &[RunLine<'_>]) {
    if run.len() < 2 {
        return;
    }
    let lead_width = run
        .iter()
        .map(|(_, _, cells)| cells.lead_width())
        .max()
        .unwrap_or(0);
    for (i, (index, depth, cells)) in run.iter().enumerate() {
        let aligned = match cells {
            Cells::Field { name, ty, tag: Some(tag) } => {
                // tags line up across the neighbouring lines that also carry one
                let before = run[..i]
                    .iter()
                    .rev()
                    .map_while(|(_, _, c)| c.tagged_type_width());
                let after = run[i..].iter().map_while(|(_, _, c)| c.tagged_type_width());
                let type_width = before.chain(after).max().unwrap_or(0);
                format!("{}{}{tag}", pad(name, lead_width), pad(ty, type_width))
            }
            Cells::Field { name, ty, tag: None } => format!("{}{ty}", pad(name, lead_width)),
            Cells::Keyed { key, value } => {
                format!("{}{value}", pad(&format!("{key}:"), lead_width))
            }
        };
        lines[*index] = Some(format!("{}{aligned}", "\t".repeat(*depth)));
    }
}

/// Align struct fields and keyed literal values the way gofmt does.
///
/// A run is a stretch of lines at one depth inside the same kind of brace.
/// Full-line comments are skipped over. Any other line that is not a field
/// or keyed entry ends the run.
fn align_columns(lines: &[SourceLine], indented: &mut [Option<String>]) {
    let mut run: Vec<RunLine<'_>> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.text.trim();
        if trimmed.starts_with("//") && !line.verbatim {
            continue;
        }
        let Some(cells) = cells_of(line, trimmed) else {
            align_run(indented, &run);
            run.clear();
            continue;
        };
        if run.last().is_some_and(|(_, depth, _)| *depth != line.depth) {
            align_run(indented, &run);
            run.clear();
        }
        run.push((index, line.depth, cells));
    }
    align_run(indented, &run);
}

/// Format a complete Go source file. The result ends with a newline.
///
/// On failure the error carries the unformatted input.
pub fn format_source(source: &str) -> GenResult<String> {
    let lines = split_lines(source).map_err(|reason| format_error(reason, source))?;

    let mut indented: Vec<Option<String>> = lines
        .iter()
        .map(|line| {
            if line.verbatim {
                return Some(line.text.clone());
            }
            let trimmed = line.text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(format!("{}{trimmed}", "\t".repeat(indent_of(line, trimmed))))
            }
        })
        .collect();
    align_columns(&lines, &mut indented);

    let mut out: Vec<&str> = Vec::with_capacity(indented.len());
    for (i, line) in indented.iter().enumerate() {
        match line {
            Some(text) => out.push(text),
            None => {
                let Some(prev) = out.last() else { continue };
                if prev.is_empty() || prev.ends_with(['{', '(']) {
                    continue;
                }
                let next = indented[i + 1..].iter().flatten().next();
                match next {
                    Some(next) if !next.trim_start().starts_with(['}', ')']) => out.push(""),
                    _ => {}
                }
            }
        }
    }

    let mut formatted = out.join("\n");
    formatted.push('\n');
    Ok(formatted)
}

/// Format a single declaration, trimmed of surrounding whitespace
pub fn format_fragment(source: &str) -> GenResult<String> {
    format_source(source).map(|formatted| formatted.trim().to_string())
}

#[cfg(test)]
#[path = "format/format_tests.rs"]
mod format_tests;
