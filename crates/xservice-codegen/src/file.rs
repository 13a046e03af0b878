//! Assembly of a complete Go source file
//!
//! Declarations are laid out in a fixed section order: header comment,
//! package clause, imports, constants, variables, interfaces, prototypes,
//! grouped types, standalone types, types with methods, then functions.

use crate::closure::Closure;
use crate::comment::Comment;
use crate::constant::{Const, Var};
use crate::decl::Declaration;
use crate::format::format_source;
use crate::function::Function;
use crate::imports::{render_import_block, resolve_imports};
use crate::interface::{Interface, Prototype};
use crate::structure::Structure;
use std::collections::BTreeSet;
use tracing::debug;
use xservice_core::naming::go_file_name;
use xservice_core::{GenError, GenResult, Identifier, Import};

const BUILDER: &str = "File";

/// A Go file under construction
#[derive(Debug, Clone)]
pub struct GoFile {
    package: Identifier,
    file_name: String,
    header: Comment,
    imports: BTreeSet<Import>,
    consts: Vec<Const>,
    vars: Vec<Var>,
    interfaces: Vec<Interface>,
    prototypes: Vec<Prototype>,
    grouped_types: Vec<Structure>,
    types: Vec<Structure>,
    types_with_methods: Vec<Structure>,
    funcs: Vec<Declaration>,
}

fn check_file_name(name: &str) -> GenResult<()> {
    let usable = !name.trim().is_empty()
        && !name.ends_with('/')
        && !name.starts_with('/')
        && !name.contains('\0');
    if usable {
        Ok(())
    } else {
        Err(GenError::InvalidFileName(name.to_string()))
    }
}

impl GoFile {
    /// Start a file in `package`, named after the schema file it is
    /// generated from.
    pub fn new(package: &str, source_file_name: &str) -> GenResult<Self> {
        if package.is_empty() {
            return Err(GenError::MissingPackage);
        }
        let package = Identifier::new(package).map_err(|err| err.within(BUILDER))?;
        check_file_name(source_file_name)?;
        Ok(Self {
            package,
            file_name: go_file_name(source_file_name),
            header: Comment::new(),
            imports: BTreeSet::new(),
            consts: Vec::new(),
            vars: Vec::new(),
            interfaces: Vec::new(),
            prototypes: Vec::new(),
            grouped_types: Vec::new(),
            types: Vec::new(),
            types_with_methods: Vec::new(),
            funcs: Vec::new(),
        })
    }

    /// Output path of the generated file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn package(&self) -> &str {
        self.package.as_str()
    }

    pub fn header_comment(&mut self, comment: Comment) -> &mut Self {
        self.header = comment;
        self
    }

    pub fn add_import(&mut self, import: Import) -> &mut Self {
        self.imports.insert(import);
        self
    }

    pub fn add_const(&mut self, constant: Const) -> &mut Self {
        self.consts.push(constant);
        self
    }

    pub fn add_var(&mut self, var: Var) -> &mut Self {
        self.vars.push(var);
        self
    }

    pub fn add_interface(&mut self, interface: Interface) -> &mut Self {
        self.interfaces.push(interface);
        self
    }

    pub fn add_prototype(&mut self, prototype: Prototype) -> &mut Self {
        self.prototypes.push(prototype);
        self
    }

    /// A struct listed inside the shared `type (...)` group
    pub fn add_grouped_type(&mut self, structure: Structure) -> &mut Self {
        self.grouped_types.push(structure);
        self
    }

    pub fn add_type(&mut self, structure: Structure) -> &mut Self {
        self.types.push(structure);
        self
    }

    /// A struct immediately followed by its methods
    pub fn add_type_with_methods(&mut self, structure: Structure) -> &mut Self {
        self.types_with_methods.push(structure);
        self
    }

    pub fn add_func(&mut self, function: Function) -> &mut Self {
        self.funcs.push(Declaration::Function(function));
        self
    }

    pub fn add_closure(&mut self, closure: Closure) -> &mut Self {
        self.funcs.push(Declaration::Closure(closure));
        self
    }

    /// Place a declaration in the section its kind belongs to
    pub fn add(&mut self, declaration: Declaration) -> &mut Self {
        match declaration {
            Declaration::Const(d) => self.add_const(d),
            Declaration::Var(d) => self.add_var(d),
            Declaration::Interface(d) => self.add_interface(d),
            Declaration::Prototype(d) => self.add_prototype(d),
            Declaration::Structure(d) if d.methods().is_empty() => self.add_type(d),
            Declaration::Structure(d) => self.add_type_with_methods(d),
            Declaration::Function(d) => self.add_func(d),
            Declaration::Closure(d) => self.add_closure(d),
        }
    }

    /// Explicit imports together with those every declaration requires
    pub fn declared_imports(&self) -> BTreeSet<Import> {
        let mut imports = self.imports.clone();
        imports.extend(self.consts.iter().flat_map(Const::imports));
        imports.extend(self.vars.iter().flat_map(Var::imports));
        imports.extend(self.interfaces.iter().flat_map(Interface::imports));
        imports.extend(self.prototypes.iter().flat_map(Prototype::imports));
        imports.extend(
            self.grouped_types
                .iter()
                .chain(&self.types)
                .chain(&self.types_with_methods)
                .flat_map(Structure::imports),
        );
        imports.extend(self.funcs.iter().flat_map(Declaration::imports));
        imports
    }

    fn sections(&self) -> GenResult<Vec<String>> {
        let mut sections = Vec::new();
        for constant in &self.consts {
            sections.push(constant.render()?);
        }
        for var in &self.vars {
            sections.push(var.render()?);
        }
        for interface in &self.interfaces {
            sections.push(interface.render()?);
        }
        for prototype in &self.prototypes {
            sections.push(prototype.render()?);
        }
        if !self.grouped_types.is_empty() {
            let specs = self
                .grouped_types
                .iter()
                .map(Structure::spec_source)
                .collect::<Vec<_>>()
                .join("\n\n");
            sections.push(format!("type (\n{specs}\n)"));
        }
        for structure in &self.types {
            sections.push(structure.render()?);
        }
        for structure in &self.types_with_methods {
            sections.push(structure.render()?);
            sections.extend(structure.render_methods()?);
        }
        for func in &self.funcs {
            sections.push(func.render()?);
        }
        Ok(sections)
    }

    fn assemble(&self, imports: &BTreeSet<Import>, body: &str) -> String {
        let mut parts = Vec::new();
        if !self.header.is_empty() {
            parts.push(self.header.render());
        }
        parts.push(format!("package {}", self.package));
        let import_block = render_import_block(imports);
        if !import_block.is_empty() {
            parts.push(import_block);
        }
        if !body.is_empty() {
            parts.push(body.to_string());
        }
        let mut text = parts.join("\n\n");
        text.push('\n');
        text
    }

    /// The whole file with every declared import, before the final
    /// import and format passes
    pub fn render(&self) -> GenResult<String> {
        let body = self
            .sections()
            .map_err(|err| err.within(BUILDER))?
            .join("\n\n");
        Ok(self.assemble(&self.declared_imports(), &body))
    }

    /// The finished file: unused imports dropped, missing standard imports
    /// added, and the whole text formatted
    pub fn render_and_format(&self) -> GenResult<Vec<u8>> {
        let body = self
            .sections()
            .map_err(|err| err.within(BUILDER))?
            .join("\n\n");
        let imports = resolve_imports(&body, &self.declared_imports());
        let source = self.assemble(&imports, &body);
        let formatted = format_source(&source).map_err(|err| err.within(BUILDER))?;
        debug!(
            file = %self.file_name,
            imports = imports.len(),
            bytes = formatted.len(),
            "assembled go file"
        );
        Ok(formatted.into_bytes())
    }
}

#[cfg(test)]
#[path = "file/file_tests.rs"]
mod file_tests;
