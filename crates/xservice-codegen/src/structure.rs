//! Struct types and the methods declared on them

use crate::comment::Comment;
use crate::fragment::finish;
use crate::function::Method;
use std::collections::BTreeSet;
use xservice_core::{GenResult, Identifier, Import, TypeReference};

#[derive(Debug, Clone)]
struct Field {
    name: Option<Identifier>,
    ty: TypeReference,
    tag: Option<String>,
    comment: Comment,
}

impl Field {
    fn source(&self) -> String {
        let mut out = self.comment.render_prefix();
        match &self.name {
            Some(name) => out.push_str(&format!("{name} {}", self.ty.name())),
            None => out.push_str(&self.ty.name()),
        }
        if let Some(tag) = &self.tag {
            out.push_str(&format!(" `{tag}`"));
        }
        out
    }
}

/// `type Name struct { ... }` together with its methods
#[derive(Debug, Clone)]
pub struct Structure {
    name: Identifier,
    comment: Comment,
    fields: Vec<Field>,
    methods: Vec<Method>,
}

impl Structure {
    const BUILDER: &'static str = "Structure";

    pub fn new(name: &str) -> GenResult<Self> {
        let name = Identifier::new(name).map_err(|err| err.within(Self::BUILDER))?;
        Ok(Self {
            name,
            comment: Comment::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        })
    }

    pub fn with_comment(mut self, text: &str) -> Self {
        self.comment = Comment::wrapped(text);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The struct as a type reference in its own package
    pub fn type_reference(&self) -> GenResult<TypeReference> {
        TypeReference::named(self.name.as_str())
    }

    fn push_field(
        &mut self,
        name: Option<&str>,
        ty: TypeReference,
        tag: Option<&str>,
        comment: &str,
    ) -> GenResult<&mut Self> {
        let name = name
            .map(Identifier::new)
            .transpose()
            .map_err(|err| err.within(Self::BUILDER))?;
        self.fields.push(Field {
            name,
            ty,
            tag: tag.map(str::to_string),
            comment: Comment::wrapped(comment),
        });
        Ok(self)
    }

    pub fn add_field(&mut self, name: &str, ty: TypeReference) -> GenResult<&mut Self> {
        self.push_field(Some(name), ty, None, "")
    }

    pub fn add_commented_field(
        &mut self,
        name: &str,
        ty: TypeReference,
        comment: &str,
    ) -> GenResult<&mut Self> {
        self.push_field(Some(name), ty, None, comment)
    }

    /// A field followed by a raw string tag such as `json:"name"`
    pub fn add_tagged_field(
        &mut self,
        name: &str,
        ty: TypeReference,
        tag: &str,
    ) -> GenResult<&mut Self> {
        self.push_field(Some(name), ty, Some(tag), "")
    }

    /// An embedded type, listed without a field name
    pub fn add_embedded(&mut self, ty: TypeReference) -> &mut Self {
        self.fields.push(Field {
            name: None,
            ty,
            tag: None,
            comment: Comment::new(),
        });
        self
    }

    pub fn add_method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        let mut imports: BTreeSet<Import> = self
            .fields
            .iter()
            .flat_map(|f| f.ty.required_imports())
            .collect();
        for method in &self.methods {
            imports.extend(method.imports());
        }
        imports
    }

    /// `Name struct { ... }` without the `type` keyword, as it appears in
    /// a grouped `type (...)` declaration
    pub fn spec_source(&self) -> String {
        let mut out = format!("{}{} struct {{\n", self.comment.render_prefix(), self.name);
        for field in &self.fields {
            out.push_str(&field.source());
            out.push('\n');
        }
        out.push('}');
        out
    }

    pub fn source(&self) -> GenResult<String> {
        let spec = self.spec_source();
        let comment = self.comment.render_prefix();
        let body = spec.strip_prefix(comment.as_str()).unwrap_or(&spec);
        Ok(format!("{comment}type {body}"))
    }

    /// The type declaration alone
    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }

    /// Every method, each rendered on its own
    pub fn render_methods(&self) -> GenResult<Vec<String>> {
        self.methods
            .iter()
            .map(|m| m.render().map_err(|err| err.within(Self::BUILDER)))
            .collect()
    }
}
