//! Text helpers shared by the declaration builders

use crate::format::format_fragment;
use std::collections::BTreeSet;
use xservice_core::ident::param_list;
use xservice_core::types::return_list;
use xservice_core::{GenResult, Import, Parameter, TypeReference};

/// `head {` followed by the body lines and a closing brace
pub(crate) fn braced(head: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{head} {{\n}}")
    } else {
        format!("{head} {{\n{body}\n}}")
    }
}

/// `(a string, b int) (string, error)`
pub(crate) fn signature(params: &[Parameter], returns: &[TypeReference]) -> String {
    let returns = return_list(returns);
    if returns.is_empty() {
        format!("({})", param_list(params))
    } else {
        format!("({}) {returns}", param_list(params))
    }
}

pub(crate) fn signature_imports(params: &[Parameter], returns: &[TypeReference]) -> BTreeSet<Import> {
    params
        .iter()
        .map(Parameter::ty)
        .chain(returns)
        .flat_map(TypeReference::required_imports)
        .collect()
}

/// Format a builder's source, naming the builder on failure
pub(crate) fn finish(builder: &'static str, source: GenResult<String>) -> GenResult<String> {
    source
        .and_then(|source| format_fragment(&source))
        .map_err(|err| err.within(builder))
}
