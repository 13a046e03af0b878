//! Composite literals

use crate::fragment::finish;
use std::collections::BTreeSet;
use xservice_core::ident::{validate_identifiers, validate_operand};
use xservice_core::{GenError, GenResult, Identifier, Import, TypeReference};

/// `name := [N]T{ v1, v2, }` with one element per line.
///
/// An array literal takes its length from the number of values.
#[derive(Debug, Clone)]
pub struct SliceLiteral {
    name: Identifier,
    element: TypeReference,
    fixed: bool,
    values: Vec<String>,
}

impl SliceLiteral {
    const BUILDER: &'static str = "SliceLiteral";

    /// A fixed-length array literal
    pub fn array(name: &str, element: TypeReference) -> GenResult<Self> {
        Self::build(name, element, true)
    }

    /// A slice literal
    pub fn slice(name: &str, element: TypeReference) -> GenResult<Self> {
        Self::build(name, element, false)
    }

    fn build(name: &str, element: TypeReference, fixed: bool) -> GenResult<Self> {
        let name = Identifier::new(name).map_err(|err| err.within(Self::BUILDER))?;
        Ok(Self {
            name,
            element,
            fixed,
            values: Vec::new(),
        })
    }

    pub fn push(&mut self, value: &str) -> GenResult<&mut Self> {
        validate_operand(value, Self::BUILDER, "value")?;
        self.values.push(value.to_string());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.element.required_imports()
    }

    pub fn source(&self) -> GenResult<String> {
        let ty = if self.fixed {
            self.element.clone().array(self.values.len())
        } else {
            self.element.clone().slice()
        };
        let mut out = format!("{} := {}{{", self.name, ty.name());
        for value in &self.values {
            out.push('\n');
            out.push_str(value);
            out.push(',');
        }
        if !self.values.is_empty() {
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}

/// `T{ field: value, }` with one field per line
#[derive(Debug, Clone)]
pub struct StructLiteral {
    ty: TypeReference,
    fields: Vec<(String, String)>,
}

impl StructLiteral {
    const BUILDER: &'static str = "StructLiteral";

    pub fn new(ty: TypeReference) -> Self {
        Self {
            ty,
            fields: Vec::new(),
        }
    }

    pub fn field(&mut self, name: &str, value: &str) -> GenResult<&mut Self> {
        if name.is_empty() {
            return Err(GenError::missing(Self::BUILDER, "field name"));
        }
        validate_identifiers(&[name]).map_err(|err| err.within(Self::BUILDER))?;
        validate_operand(value, Self::BUILDER, "field value")?;
        self.fields.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.ty.required_imports()
    }

    pub fn source(&self) -> GenResult<String> {
        let mut out = format!("{}{{", self.ty.name());
        for (name, value) in &self.fields {
            out.push_str(&format!("\n{name}: {value},"));
        }
        if !self.fields.is_empty() {
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
