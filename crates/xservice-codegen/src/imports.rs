//! Import block maintenance
//!
//! Only packages whose qualifier actually appears in the code survive, a
//! few standard packages are added when used without being declared, and
//! the block is laid out standard library first.

use crate::lex::{self, Region};
use std::collections::BTreeSet;
use xservice_core::Import;

/// Standard packages added when code uses them without declaring them
const STD_FALLBACKS: [&str; 12] = [
    "bytes",
    "context",
    "encoding/json",
    "errors",
    "fmt",
    "io",
    "log",
    "net/http",
    "strconv",
    "strings",
    "sync",
    "time",
];

/// Standard package for a qualifier, if it is one of the known fallbacks
pub fn std_fallback(qualifier: &str) -> Option<Import> {
    STD_FALLBACKS
        .iter()
        .map(|path| Import::new(*path))
        .find(|import| import.qualifier() == qualifier)
}

/// Identifiers used as `qualifier.Member` outside literals and comments.
///
/// Field selections such as `a.b.c` only report `a`.
pub fn used_qualifiers(source: &str) -> BTreeSet<String> {
    let chars: Vec<char> = source.chars().collect();
    let Ok(regions) = lex::classify(&chars) else {
        return BTreeSet::new();
    };
    let code: Vec<char> = chars
        .iter()
        .zip(&regions)
        .map(|(c, r)| if *r == Region::Code { *c } else { ' ' })
        .collect();

    let mut used = BTreeSet::new();
    let mut i = 0;
    while i < code.len() {
        let c = code[i];
        if !(c.is_alphabetic() || c == '_') {
            i += 1;
            continue;
        }
        let start = i;
        while i < code.len() && (code[i].is_alphanumeric() || code[i] == '_') {
            i += 1;
        }
        let selected = start > 0 && code[start - 1] == '.' && !(start > 1 && code[start - 2] == '.');
        let selects = code.get(i) == Some(&'.')
            && code
                .get(i + 1)
                .is_some_and(|n| n.is_alphabetic() || *n == '_');
        if selects && !selected {
            used.insert(code[start..i].iter().collect());
        }
    }
    used
}

/// Declared imports that `body` uses, plus standard fallbacks for any
/// qualifier it uses without declaring.
pub fn resolve_imports(body: &str, declared: &BTreeSet<Import>) -> BTreeSet<Import> {
    let used = used_qualifiers(body);
    let mut resolved: BTreeSet<Import> = declared
        .iter()
        .filter(|import| used.contains(import.qualifier()))
        .cloned()
        .collect();

    for qualifier in &used {
        let covered = resolved.iter().any(|i| i.qualifier() == qualifier);
        if covered {
            continue;
        }
        if let Some(import) = std_fallback(qualifier) {
            tracing::trace!(package = import.path(), "adding undeclared standard import");
            resolved.insert(import);
        }
    }
    resolved
}

/// Render an import block: standard packages, a blank line, then the
/// rest, each group sorted by path. Empty when there is nothing to import.
pub fn render_import_block(imports: &BTreeSet<Import>) -> String {
    if imports.is_empty() {
        return String::new();
    }
    let (mut std, mut third_party): (Vec<&Import>, Vec<&Import>) =
        imports.iter().partition(|i| i.is_std());
    std.sort_by(|a, b| a.path().cmp(b.path()));
    third_party.sort_by(|a, b| a.path().cmp(b.path()));

    let mut out = String::from("import (\n");
    for import in &std {
        out.push_str(&import.render());
        out.push('\n');
    }
    if !std.is_empty() && !third_party.is_empty() {
        out.push('\n');
    }
    for import in &third_party {
        out.push_str(&import.render());
        out.push('\n');
    }
    out.push(')');
    out
}
