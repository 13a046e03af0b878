//! Function literals: anonymous functions bound to a variable, and named
//! functions that return a closure

use crate::block::Block;
use crate::comment::Comment;
use crate::fragment::{braced, finish, signature, signature_imports};
use std::collections::BTreeSet;
use xservice_core::ident::{param_list, validate_parameters};
use xservice_core::types::return_list;
use xservice_core::{GenError, GenResult, Identifier, Import, Parameter, TypeReference};

/// `name := func(params) returns { body }`
#[derive(Debug, Clone)]
pub struct AnonymousFunc {
    name: Identifier,
    params: Vec<Parameter>,
    returns: Vec<TypeReference>,
    body: Block,
}

impl AnonymousFunc {
    const BUILDER: &'static str = "AnonymousFunc";

    pub fn new(name: &str, params: Vec<Parameter>, returns: Vec<TypeReference>) -> GenResult<Self> {
        let wrap = |err: GenError| err.within(Self::BUILDER);
        validate_parameters(&params).map_err(wrap)?;
        let name = Identifier::new(name).map_err(wrap)?;
        Ok(Self {
            name,
            params,
            returns,
            body: Block::new(),
        })
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = body;
        self
    }

    pub fn body_mut(&mut self) -> &mut Block {
        &mut self.body
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        let mut imports = signature_imports(&self.params, &self.returns);
        imports.extend(self.body.imports().iter().cloned());
        imports
    }

    pub fn source(&self) -> GenResult<String> {
        let head = format!(
            "{} := func{}",
            self.name,
            signature(&self.params, &self.returns)
        );
        Ok(braced(&head, &self.body.source()))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}

/// A named function whose result is a function literal.
///
/// The outer body runs once when the closure is built; the inner body runs
/// on every call of the returned function.
#[derive(Debug, Clone)]
pub struct Closure {
    name: Identifier,
    comment: Comment,
    params: Vec<Parameter>,
    inner_params: Vec<Parameter>,
    inner_returns: Vec<TypeReference>,
    outer: Block,
    inner: Block,
}

impl Closure {
    const BUILDER: &'static str = "Closure";

    pub fn new(
        name: &str,
        params: Vec<Parameter>,
        inner_params: Vec<Parameter>,
        inner_returns: Vec<TypeReference>,
    ) -> GenResult<Self> {
        let wrap = |err: GenError| err.within(Self::BUILDER);
        validate_parameters(&params).map_err(wrap)?;
        validate_parameters(&inner_params).map_err(wrap)?;
        let name = Identifier::new(name).map_err(wrap)?;
        Ok(Self {
            name,
            comment: Comment::new(),
            params,
            inner_params,
            inner_returns,
            outer: Block::new(),
            inner: Block::new(),
        })
    }

    pub fn with_comment(mut self, text: &str) -> Self {
        self.comment = Comment::wrapped(text);
        self
    }

    pub fn with_outer(mut self, outer: Block) -> Self {
        self.outer = outer;
        self
    }

    pub fn with_inner(mut self, inner: Block) -> Self {
        self.inner = inner;
        self
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        let mut imports = signature_imports(&self.params, &[]);
        imports.extend(signature_imports(&self.inner_params, &self.inner_returns));
        imports.extend(self.outer.imports().iter().cloned());
        imports.extend(self.inner.imports().iter().cloned());
        imports
    }

    pub fn source(&self) -> GenResult<String> {
        let returns = return_list(&self.inner_returns);
        let func_type = if returns.is_empty() {
            format!("func({})", param_list(&self.inner_params))
        } else {
            format!("func({}) {returns}", param_list(&self.inner_params))
        };
        let inner = braced(
            &format!("return {func_type}"),
            &self.inner.source(),
        );
        let mut body = self.outer.source();
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&inner);

        let head = format!(
            "func {}({}) {func_type}",
            self.name,
            param_list(&self.params)
        );
        Ok(format!("{}{}", self.comment.render_prefix(), braced(&head, &body)))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
