//! Interface types and named function types

use crate::comment::Comment;
use crate::fragment::{finish, signature, signature_imports};
use std::collections::BTreeSet;
use xservice_core::ident::validate_parameters;
use xservice_core::{GenError, GenResult, Identifier, Import, Parameter, TypeReference};

#[derive(Debug, Clone)]
struct InterfaceMethod {
    name: Identifier,
    params: Vec<Parameter>,
    returns: Vec<TypeReference>,
    comment: Comment,
}

/// `type Name interface { ... }`. Names are always exported.
#[derive(Debug, Clone)]
pub struct Interface {
    name: Identifier,
    comment: Comment,
    methods: Vec<InterfaceMethod>,
}

impl Interface {
    const BUILDER: &'static str = "Interface";

    pub fn new(name: &str) -> GenResult<Self> {
        let name = Identifier::exported(name).map_err(|err| err.within(Self::BUILDER))?;
        Ok(Self {
            name,
            comment: Comment::new(),
            methods: Vec::new(),
        })
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Add a method. The comment is free text, wrapped to comment lines.
    pub fn add_method(
        &mut self,
        name: &str,
        params: Vec<Parameter>,
        returns: Vec<TypeReference>,
        comment: &str,
    ) -> GenResult<&mut Self> {
        let wrap = |err: GenError| err.within(Self::BUILDER);
        validate_parameters(&params).map_err(wrap)?;
        let name = Identifier::exported(name).map_err(wrap)?;
        self.methods.push(InterfaceMethod {
            name,
            params,
            returns,
            comment: Comment::wrapped(comment),
        });
        Ok(self)
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.methods
            .iter()
            .flat_map(|m| signature_imports(&m.params, &m.returns))
            .collect()
    }

    pub fn source(&self) -> GenResult<String> {
        let mut out = format!(
            "{}type {} interface {{\n",
            self.comment.render_prefix(),
            self.name
        );
        for method in &self.methods {
            out.push_str(&method.comment.render_prefix());
            out.push_str(&format!(
                "{}{}\n",
                method.name,
                signature(&method.params, &method.returns)
            ));
        }
        out.push('}');
        Ok(out)
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}

/// `type Name func(params) returns`
#[derive(Debug, Clone)]
pub struct Prototype {
    name: Identifier,
    comment: Comment,
    params: Vec<Parameter>,
    returns: Vec<TypeReference>,
}

impl Prototype {
    const BUILDER: &'static str = "Prototype";

    pub fn new(name: &str, params: Vec<Parameter>, returns: Vec<TypeReference>) -> GenResult<Self> {
        let wrap = |err: GenError| err.within(Self::BUILDER);
        validate_parameters(&params).map_err(wrap)?;
        let name = Identifier::exported(name).map_err(wrap)?;
        Ok(Self {
            name,
            comment: Comment::new(),
            params,
            returns,
        })
    }

    pub fn with_comment(mut self, text: &str) -> Self {
        self.comment = Comment::wrapped(text);
        self
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        signature_imports(&self.params, &self.returns)
    }

    pub fn source(&self) -> GenResult<String> {
        Ok(format!(
            "{}type {} func{}",
            self.comment.render_prefix(),
            self.name,
            signature(&self.params, &self.returns)
        ))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
