//! `switch` statements over values and types

use crate::block::Block;
use crate::fragment::finish;
use std::collections::BTreeSet;
use xservice_core::ident::{validate_identifiers, validate_operand};
use xservice_core::{GenError, GenResult, Import};

#[derive(Debug, Clone)]
struct Case {
    values: Vec<String>,
    body: Block,
}

/// A value switch or a type switch with optional default branch
#[derive(Debug, Clone)]
pub struct Switch {
    head: String,
    cases: Vec<Case>,
    default: Option<Block>,
}

impl Switch {
    const BUILDER: &'static str = "Switch";

    /// `switch subject {`
    pub fn on_value(subject: &str) -> GenResult<Self> {
        validate_operand(subject, Self::BUILDER, "subject")?;
        Ok(Self::with_head(format!("switch {subject} {{")))
    }

    /// `switch binding := subject.(type) {`
    pub fn on_type(binding: &str, subject: &str) -> GenResult<Self> {
        validate_identifiers(&[binding]).map_err(|err| err.within(Self::BUILDER))?;
        validate_operand(subject, Self::BUILDER, "subject")?;
        Ok(Self::with_head(format!(
            "switch {binding} := {subject}.(type) {{"
        )))
    }

    fn with_head(head: String) -> Self {
        Self {
            head,
            cases: Vec::new(),
            default: None,
        }
    }

    /// `case v1, v2:` followed by `body`
    pub fn case(&mut self, values: &[&str], body: Block) -> GenResult<&mut Self> {
        if values.is_empty() {
            return Err(GenError::missing(Self::BUILDER, "case value"));
        }
        for value in values {
            validate_operand(value, Self::BUILDER, "case value")?;
        }
        self.cases.push(Case {
            values: values.iter().map(|v| v.to_string()).collect(),
            body,
        });
        Ok(self)
    }

    /// `default:` followed by `body`, replacing any earlier default
    pub fn default_case(&mut self, body: Block) -> &mut Self {
        self.default = Some(body);
        self
    }

    pub fn imports(&self) -> BTreeSet<Import> {
        self.cases
            .iter()
            .map(|case| &case.body)
            .chain(&self.default)
            .flat_map(|body| body.imports().iter().cloned())
            .collect()
    }

    pub fn source(&self) -> GenResult<String> {
        let mut lines = vec![self.head.clone()];
        for case in &self.cases {
            lines.push(format!("case {}:", case.values.join(", ")));
            if !case.body.is_empty() {
                lines.push(case.body.source());
            }
        }
        if let Some(body) = &self.default {
            lines.push("default:".to_string());
            if !body.is_empty() {
                lines.push(body.source());
            }
        }
        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }

    pub fn render(&self) -> GenResult<String> {
        finish(Self::BUILDER, self.source())
    }
}
