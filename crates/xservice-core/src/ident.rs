//! Validated Go identifiers and parameter lists

use crate::error::{GenError, GenResult};
use crate::naming;
use crate::types::TypeReference;
use std::fmt;

/// Reserved words of the Go language
pub const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true when `s` is a reserved Go keyword
pub fn is_keyword(s: &str) -> bool {
    GO_KEYWORDS.contains(&s)
}

/// A name that is non-empty, syntactically legal and not a keyword
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `raw` as written
    pub fn new(raw: impl Into<String>) -> GenResult<Self> {
        let raw = raw.into();
        check_identifier(&raw)?;
        Ok(Self(raw))
    }

    /// Upper case the first letter, then validate
    pub fn exported(raw: &str) -> GenResult<Self> {
        Self::new(naming::exported(raw))
    }

    /// Lower case the first letter, then validate
    pub fn unexported(raw: &str) -> GenResult<Self> {
        Self::new(naming::unexported(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Go exports names that start with an upper case letter
    pub fn is_exported(&self) -> bool {
        self.0.chars().next().is_some_and(char::is_uppercase)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = GenError;

    fn try_from(value: &str) -> GenResult<Self> {
        Identifier::new(value)
    }
}

fn invalid(ident: &str, reason: &str) -> GenError {
    GenError::InvalidIdentifier {
        ident: ident.to_string(),
        reason: reason.to_string(),
    }
}

fn check_identifier(raw: &str) -> GenResult<()> {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return Err(invalid(raw, "identifier is empty"));
    };
    if !(first.is_alphabetic() || first == '_') {
        return Err(invalid(raw, "identifier must start with a letter or underscore"));
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Err(invalid(raw, "identifier contains illegal characters"));
    }
    if is_keyword(raw) {
        return Err(invalid(raw, "identifier is a key word"));
    }
    Ok(())
}

/// Validate a dotted selector such as `s.writeError` or `transport.UrlBase`.
///
/// Every segment must be a legal identifier.
pub fn validate_selector(
    selector: &str,
    builder: &'static str,
    field: &'static str,
) -> GenResult<()> {
    if selector.is_empty() {
        return Err(GenError::missing(builder, field));
    }
    for segment in selector.split('.') {
        check_identifier(segment)
            .map_err(|_| invalid(selector, "selector segment is not an identifier"))?;
    }
    Ok(())
}

/// Validate an expression operand: present, and not a bare keyword.
pub fn validate_operand(
    operand: &str,
    builder: &'static str,
    field: &'static str,
) -> GenResult<()> {
    let trimmed = operand.trim();
    if trimmed.is_empty() {
        return Err(GenError::missing(builder, field));
    }
    if is_keyword(trimmed) {
        return Err(invalid(trimmed, "identifier is a key word"));
    }
    Ok(())
}

/// Validate every name in a list of assignment targets
pub fn validate_identifiers<S: AsRef<str>>(names: &[S]) -> GenResult<()> {
    for name in names {
        check_identifier(name.as_ref())?;
    }
    Ok(())
}

/// A named, typed parameter of a function, method, closure or prototype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    ty: TypeReference,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeReference {
        &self.ty
    }
}

/// Fails with `MissingField` when a parameter has no name and with
/// `InvalidIdentifier` when the name is not usable.
pub fn validate_parameters(parameters: &[Parameter]) -> GenResult<()> {
    for parameter in parameters {
        if parameter.name.is_empty() {
            return Err(GenError::missing("Parameter", "name of parameter"));
        }
        if parameter.ty.name().is_empty() {
            return Err(GenError::missing("Parameter", "value of parameter"));
        }
        check_identifier(&parameter.name)?;
    }
    Ok(())
}

/// Render `a string, b int`
pub fn param_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", p.name, p.ty.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "ident/ident_tests.rs"]
mod ident_tests;
