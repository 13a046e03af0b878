//! Package level `const` and `var` declarations

use crate::comment::Comment;
use crate::fragment::finish;
use std::collections::BTreeSet;
use xservice_core::{GenError, GenResult, Identifier, Import, TypeReference};

/// Bytes per line of an embedded byte slice
const BYTES_PER_LINE: usize = 16;

/// `const name T = value`
#[derive(Debug, Clone)]
pub struct Const {
    name: Identifier,
    ty: TypeReference,
    value: String,
    comment: Comment,
}

impl Const {
    const BUILDER: &'static str = "Const";

    pub fn new(name: &str, ty: TypeReference, value: &str) -> GenResult<Self> {
        let name = Identifier::new(name).map_err(|err| err.within(Self::BUILDER))?;
        if value.trim().is_empty() {
            return Err(GenError::missing(Self::BUILDER, "value"));
        }
        Ok(Self {
            name,
            ty,
            value: value.to_string(),
            comment: Comment::new(),
        })
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.ty.required_imports()
    }

    pub fn source(&self) -> GenResult<String> {
        Ok(format!(
            "{}const {} {} = {}",
            self.comment.render_prefix(),
            self.name,
            self.ty.name(),
            self.value
        ))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}

/// `var name T = value`, or `var name = value` when the type is inferred
#[derive(Debug, Clone)]
pub struct Var {
    name: Identifier,
    ty: Option<TypeReference>,
    value: String,
    comment: Comment,
}

impl Var {
    const BUILDER: &'static str = "Var";

    pub fn new(name: &str, ty: Option<TypeReference>, value: &str) -> GenResult<Self> {
        let name = Identifier::new(name).map_err(|err| err.within(Self::BUILDER))?;
        if value.trim().is_empty() {
            return Err(GenError::missing(Self::BUILDER, "value"));
        }
        Ok(Self {
            name,
            ty,
            value: value.to_string(),
            comment: Comment::new(),
        })
    }

    /// A `[]byte{...}` literal holding `data`, sixteen bytes per line
    pub fn bytes(name: &str, data: &[u8]) -> GenResult<Self> {
        let mut value = String::from("[]byte{");
        for chunk in data.chunks(BYTES_PER_LINE) {
            let line = chunk
                .iter()
                .map(|b| format!("0x{b:02x},"))
                .collect::<Vec<_>>()
                .join(" ");
            value.push('\n');
            value.push_str(&line);
        }
        if !data.is_empty() {
            value.push('\n');
        }
        value.push('}');
        Self::new(name, None, &value)
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.ty
            .as_ref()
            .map(TypeReference::required_imports)
            .unwrap_or_default()
    }

    pub fn source(&self) -> GenResult<String> {
        let declared = match &self.ty {
            Some(ty) => format!("var {} {} = {}", self.name, ty.name(), self.value),
            None => format!("var {} = {}", self.name, self.value),
        };
        Ok(format!("{}{declared}", self.comment.render_prefix()))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
