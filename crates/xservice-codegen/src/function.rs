//! Top level functions and methods

use crate::block::Block;
use crate::comment::Comment;
use crate::fragment::{braced, finish, signature, signature_imports};
use std::collections::BTreeSet;
use xservice_core::ident::validate_parameters;
use xservice_core::{GenError, GenResult, Identifier, Import, Parameter, TypeReference};

/// `func Name(params) returns { body }`
#[derive(Debug, Clone)]
pub struct Function {
    name: Identifier,
    comment: Comment,
    params: Vec<Parameter>,
    returns: Vec<TypeReference>,
    body: Block,
}

impl Function {
    const BUILDER: &'static str = "Function";

    pub fn new(name: &str, params: Vec<Parameter>, returns: Vec<TypeReference>) -> GenResult<Self> {
        Self::build(name, params, returns).map_err(|err| err.within(Self::BUILDER))
    }

    fn build(name: &str, params: Vec<Parameter>, returns: Vec<TypeReference>) -> GenResult<Self> {
        validate_parameters(&params)?;
        Ok(Self {
            name: Identifier::new(name)?,
            comment: Comment::new(),
            params,
            returns,
            body: Block::new(),
        })
    }

    /// Free text comment, wrapped to comment lines
    pub fn with_comment(mut self, text: &str) -> Self {
        self.comment = Comment::wrapped(text);
        self
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

    /// `Name(params) returns`, as listed in an interface
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, signature(&self.params, &self.returns))
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        let mut imports = signature_imports(&self.params, &self.returns);
        imports.extend(self.body.imports().iter().cloned());
        imports
    }

    pub fn source(&self) -> GenResult<String> {
        let head = format!("func {}", self.signature());
        Ok(format!(
            "{}{}",
            self.comment.render_prefix(),
            braced(&head, &self.body.source())
        ))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}

/// `func (r *T) Name(params) returns { body }`
#[derive(Debug, Clone)]
pub struct Method {
    receiver: Identifier,
    receiver_type: TypeReference,
    function: Function,
}

impl Method {
    const BUILDER: &'static str = "Method";

    pub fn new(
        receiver: &str,
        receiver_type: TypeReference,
        name: &str,
        params: Vec<Parameter>,
        returns: Vec<TypeReference>,
    ) -> GenResult<Self> {
        let wrap = |err: GenError| err.within(Self::BUILDER);
        if receiver.is_empty() {
            return Err(GenError::missing(Self::BUILDER, "receiver"));
        }
        let receiver = Identifier::new(receiver).map_err(wrap)?;
        let function = Function::build(name, params, returns).map_err(wrap)?;
        Ok(Self {
            receiver,
            receiver_type,
            function,
        })
    }

    pub fn with_comment(mut self, text: &str) -> Self {
        self.function = self.function.with_comment(text);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.function = self.function.with_body(body);
        self
    }

    pub fn body_mut(&mut self) -> &mut Block {
        self.function.body_mut()
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn receiver_type(&self) -> &TypeReference {
        &self.receiver_type
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        let mut imports = self.function.imports();
        imports.extend(self.receiver_type.required_imports());
        imports
    }

    pub fn source(&self) -> GenResult<String> {
        let head = format!(
            "func ({} {}) {}",
            self.receiver,
            self.receiver_type.name(),
            self.function.signature()
        );
        Ok(format!(
            "{}{}",
            self.function.comment.render_prefix(),
            braced(&head, &self.function.body.source())
        ))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
