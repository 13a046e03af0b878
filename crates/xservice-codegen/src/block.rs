//! Statement sequences that make up function and method bodies
//!
//! Every statement method validates its inputs before anything is appended,
//! so a failed call leaves the block unchanged.

use crate::closure::AnonymousFunc;
use crate::literal::{SliceLiteral, StructLiteral};
use crate::ops::Operator;
use crate::switch::Switch;
use std::collections::BTreeSet;
use xservice_core::ident::{validate_identifiers, validate_operand, validate_selector};
use xservice_core::naming::value_list;
use xservice_core::{GenError, GenResult, Import, TypeReference};

const BUILDER: &str = "Block";

fn scoped(err: GenError) -> GenError {
    match err {
        GenError::MissingField { .. } => err,
        other => other.within(BUILDER),
    }
}

fn check_callee(callee: &str) -> GenResult<()> {
    validate_selector(callee, BUILDER, "function").map_err(scoped)
}

fn check_args(args: &[&str]) -> GenResult<()> {
    for arg in args {
        validate_operand(arg, BUILDER, "argument").map_err(scoped)?;
    }
    Ok(())
}

fn check_targets(targets: &[&str]) -> GenResult<()> {
    if targets.is_empty() {
        return Err(GenError::missing(BUILDER, "variable"));
    }
    validate_identifiers(targets).map_err(scoped)
}

fn check_operand(operand: &str, field: &'static str) -> GenResult<()> {
    validate_operand(operand, BUILDER, field).map_err(scoped)
}

/// An ordered list of Go statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
    imports: BTreeSet<Import>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Packages referenced by types used in this block
    pub fn imports(&self) -> &BTreeSet<Import> {
        &self.imports
    }

    /// Record a package the statements refer to by qualifier
    pub fn uses(&mut self, import: Import) -> &mut Self {
        self.imports.insert(import);
        self
    }

    /// Statements joined by newlines, unformatted
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    fn push(&mut self, line: String) -> &mut Self {
        self.lines.push(line);
        self
    }

    fn record(&mut self, ty: &TypeReference) {
        self.imports.extend(ty.required_imports());
    }

    /// `a, b := f(x)` as a string, for use as an `if` initializer
    pub fn call_expr(targets: &[&str], callee: &str, args: &[&str]) -> GenResult<String> {
        check_targets(targets)?;
        check_callee(callee)?;
        check_args(args)?;
        Ok(format!(
            "{} := {callee}({})",
            value_list(targets),
            value_list(args)
        ))
    }

    /// `f(x)`
    pub fn call(&mut self, callee: &str, args: &[&str]) -> GenResult<&mut Self> {
        check_callee(callee)?;
        check_args(args)?;
        Ok(self.push(format!("{callee}({})", value_list(args))))
    }

    /// `a, b := f(x)`
    pub fn define_call(
        &mut self,
        targets: &[&str],
        callee: &str,
        args: &[&str],
    ) -> GenResult<&mut Self> {
        let line = Self::call_expr(targets, callee, args)?;
        Ok(self.push(line))
    }

    /// `a, b = f(x)`
    pub fn assign_call(
        &mut self,
        targets: &[&str],
        callee: &str,
        args: &[&str],
    ) -> GenResult<&mut Self> {
        check_targets(targets)?;
        check_callee(callee)?;
        check_args(args)?;
        Ok(self.push(format!(
            "{} = {callee}({})",
            value_list(targets),
            value_list(args)
        )))
    }

    /// `var name T`
    pub fn declare_var(&mut self, name: &str, ty: &TypeReference) -> GenResult<&mut Self> {
        check_targets(&[name])?;
        self.record(ty);
        Ok(self.push(format!("var {name} {}", ty.name())))
    }

    /// `name := new(T)`
    pub fn new_instance(&mut self, name: &str, ty: &TypeReference) -> GenResult<&mut Self> {
        check_targets(&[name])?;
        self.record(ty);
        Ok(self.push(format!("{name} := new({})", ty.name())))
    }

    /// `name := left op right`
    pub fn define_operation(
        &mut self,
        name: &str,
        left: &str,
        op: Operator,
        right: &str,
    ) -> GenResult<&mut Self> {
        check_targets(&[name])?;
        check_operand(left, "left operand")?;
        check_operand(right, "right operand")?;
        let op = op.check_binary().map_err(scoped)?;
        Ok(self.push(format!("{name} := {left} {op} {right}")))
    }

    /// `a, ok := value.(T)`
    pub fn type_assert(
        &mut self,
        targets: &[&str],
        value: &str,
        ty: &TypeReference,
    ) -> GenResult<&mut Self> {
        check_targets(targets)?;
        check_operand(value, "value")?;
        self.record(ty);
        Ok(self.push(format!(
            "{} := {value}.({})",
            value_list(targets),
            ty.name()
        )))
    }

    /// `target.field = value`
    pub fn struct_field_assign(
        &mut self,
        target: &str,
        field: &str,
        value: &str,
    ) -> GenResult<&mut Self> {
        validate_selector(target, BUILDER, "struct").map_err(scoped)?;
        check_targets(&[field])?;
        check_operand(value, "value")?;
        Ok(self.push(format!("{target}.{field} = {value}")))
    }

    fn condition(left: &str, op: Operator, right: &str) -> GenResult<String> {
        check_operand(left, "left operand")?;
        check_operand(right, "right operand")?;
        let op = op.check_condition().map_err(scoped)?;
        Ok(format!("{left} {op} {right}"))
    }

    /// `if left op right {`
    pub fn if_begin(&mut self, left: &str, op: Operator, right: &str) -> GenResult<&mut Self> {
        let condition = Self::condition(left, op, right)?;
        Ok(self.push(format!("if {condition} {{")))
    }

    /// `if init; left op right {`
    pub fn if_scoped_begin(
        &mut self,
        init: &str,
        left: &str,
        op: Operator,
        right: &str,
    ) -> GenResult<&mut Self> {
        check_operand(init, "initializer")?;
        let condition = Self::condition(left, op, right)?;
        Ok(self.push(format!("if {init}; {condition} {{")))
    }

    /// `} else if left op right {`
    pub fn else_if(&mut self, left: &str, op: Operator, right: &str) -> GenResult<&mut Self> {
        let condition = Self::condition(left, op, right)?;
        Ok(self.push(format!("}} else if {condition} {{")))
    }

    /// `} else {`
    pub fn else_branch(&mut self) -> &mut Self {
        self.push("} else {".to_string())
    }

    /// Close the innermost `if`, `for` or function literal
    pub fn close(&mut self) -> &mut Self {
        self.push("}".to_string())
    }

    /// `for key, value := range list {`
    pub fn range_begin(&mut self, key: &str, value: &str, list: &str) -> GenResult<&mut Self> {
        check_targets(&[key, value])?;
        check_operand(list, "range expression")?;
        Ok(self.push(format!("for {key}, {value} := range {list} {{")))
    }

    /// `defer f(x)`
    pub fn defer_call(&mut self, callee: &str, args: &[&str]) -> GenResult<&mut Self> {
        check_callee(callee)?;
        check_args(args)?;
        Ok(self.push(format!("defer {callee}({})", value_list(args))))
    }

    /// A bare `return`
    pub fn ret(&mut self) -> &mut Self {
        self.push("return".to_string())
    }

    /// `return a, b`
    pub fn return_values(&mut self, values: &[&str]) -> GenResult<&mut Self> {
        if values.is_empty() {
            return Err(GenError::missing(BUILDER, "return values"));
        }
        check_args(values)?;
        Ok(self.push(format!("return {}", value_list(values))))
    }

    /// `return f(x)`
    pub fn return_call(&mut self, callee: &str, args: &[&str]) -> GenResult<&mut Self> {
        check_callee(callee)?;
        check_args(args)?;
        Ok(self.push(format!("return {callee}({})", value_list(args))))
    }

    /// A function literal bound to a name, `name := func() {...}`
    pub fn nested_func(&mut self, func: &AnonymousFunc) -> GenResult<&mut Self> {
        let source = func.source().map_err(scoped)?;
        self.imports.extend(func.imports());
        Ok(self.push(source))
    }

    /// A deferred guard that reports a panic through `handler`, then
    /// re-panics with the recovered value
    pub fn recover_guard(&mut self, wrapper: &str, handler: &Block) -> GenResult<&mut Self> {
        check_targets(&[wrapper])?;
        let mut body = Block::new();
        body.if_scoped_begin("r := recover()", "r", Operator::NotEqual, "nil")?;
        body.extend(handler);
        body.call("panic", &["r"])?;
        body.close();
        let func = AnonymousFunc::new(wrapper, Vec::new(), Vec::new())?.with_body(body);
        self.nested_func(&func)?;
        self.defer_call(wrapper, &[])
    }

    pub fn switch(&mut self, switch: &Switch) -> GenResult<&mut Self> {
        let source = switch.source().map_err(scoped)?;
        self.imports.extend(switch.imports());
        Ok(self.push(source))
    }

    /// `name := [N]T{...}`
    pub fn slice_literal(&mut self, literal: &SliceLiteral) -> GenResult<&mut Self> {
        let source = literal.source().map_err(scoped)?;
        self.imports.extend(literal.imports());
        Ok(self.push(source))
    }

    /// `prefix &T{field: value}` or without `&` when not by reference.
    ///
    /// `prefix` is a statement head such as `return` or `server :=`.
    pub fn struct_literal(
        &mut self,
        prefix: &str,
        literal: &StructLiteral,
        by_reference: bool,
    ) -> GenResult<&mut Self> {
        if prefix.trim().is_empty() {
            return Err(GenError::missing(BUILDER, "statement"));
        }
        let source = literal.source().map_err(scoped)?;
        let reference = if by_reference { "&" } else { "" };
        self.imports.extend(literal.imports());
        Ok(self.push(format!("{prefix} {reference}{source}")))
    }

    /// Append every statement of `other`
    pub fn extend(&mut self, other: &Block) -> &mut Self {
        self.lines.extend(other.lines.iter().cloned());
        self.imports.extend(other.imports.iter().cloned());
        self
    }
}

#[cfg(test)]
#[path = "block/block_tests.rs"]
mod block_tests;
