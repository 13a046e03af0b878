//! Go type references and the imports they require

use crate::error::{GenError, GenResult};
use std::collections::BTreeSet;

/// An imported Go package
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Import {
    path: String,
    alias: Option<String>,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Name used to qualify members: the alias, else the last path element
    pub fn qualifier(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }

    /// Standard library paths have no dot in their first element
    pub fn is_std(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or_default();
        !first.contains('.')
    }

    /// Render as one line of an import block
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{alias} \"{}\"", self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// Kind discriminator of a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Primitive,
    Pointer,
    Slice,
    Array,
    Map,
    Named,
    Func,
    Variadic,
}

/// Predeclared Go types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Byte,
    Rune,
    Float32,
    Float64,
    Error,
    Any,
}

const PRIMITIVES: [(Primitive, &str); 18] = [
    (Primitive::Bool, "bool"),
    (Primitive::String, "string"),
    (Primitive::Int, "int"),
    (Primitive::Int8, "int8"),
    (Primitive::Int16, "int16"),
    (Primitive::Int32, "int32"),
    (Primitive::Int64, "int64"),
    (Primitive::Uint, "uint"),
    (Primitive::Uint8, "uint8"),
    (Primitive::Uint16, "uint16"),
    (Primitive::Uint32, "uint32"),
    (Primitive::Uint64, "uint64"),
    (Primitive::Byte, "byte"),
    (Primitive::Rune, "rune"),
    (Primitive::Float32, "float32"),
    (Primitive::Float64, "float64"),
    (Primitive::Error, "error"),
    (Primitive::Any, "any"),
];

impl Primitive {
    pub fn go_name(self) -> &'static str {
        PRIMITIVES
            .iter()
            .find(|(p, _)| *p == self)
            .map(|(_, name)| *name)
            .unwrap_or("any")
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(p, _)| *p)
    }
}

/// A declared type, optionally living in another package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    name: String,
    package: Option<String>,
    import: Option<Import>,
}

impl NamedType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

/// A Go type as it is written at a use site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeReference {
    Primitive(Primitive),
    Named(NamedType),
    Pointer(Box<TypeReference>),
    Slice(Box<TypeReference>),
    Array(usize, Box<TypeReference>),
    Map(Box<TypeReference>, Box<TypeReference>),
    Func {
        params: Vec<TypeReference>,
        returns: Vec<TypeReference>,
    },
    Variadic(Box<TypeReference>),
}

fn check_type_name(name: &str) -> GenResult<()> {
    let mut chars = name.chars();
    let legal = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if legal {
        Ok(())
    } else {
        Err(GenError::InternalInvariantViolation(format!(
            "cannot build a type reference from {name:?}"
        )))
    }
}

impl TypeReference {
    pub fn primitive(p: Primitive) -> Self {
        TypeReference::Primitive(p)
    }

    pub fn string() -> Self {
        TypeReference::Primitive(Primitive::String)
    }

    pub fn error() -> Self {
        TypeReference::Primitive(Primitive::Error)
    }

    /// Look up a predeclared type by its Go spelling
    pub fn from_go_name(name: &str) -> GenResult<Self> {
        Primitive::from_name(name)
            .map(TypeReference::Primitive)
            .ok_or_else(|| {
                GenError::InternalInvariantViolation(format!("unknown primitive type {name:?}"))
            })
    }

    /// A type declared in the package being generated
    pub fn named(name: &str) -> GenResult<Self> {
        check_type_name(name)?;
        Ok(TypeReference::Named(NamedType {
            name: name.to_string(),
            package: None,
            import: None,
        }))
    }

    /// A type declared in `package`, reachable through `import` when present
    pub fn qualified(package: &str, name: &str, import: Option<Import>) -> GenResult<Self> {
        check_type_name(package)?;
        check_type_name(name)?;
        Ok(TypeReference::Named(NamedType {
            name: name.to_string(),
            package: Some(package.to_string()),
            import,
        }))
    }

    /// A type exported by an imported package, qualified by the import's name
    pub fn imported(import: &Import, name: &str) -> GenResult<Self> {
        Self::qualified(import.qualifier(), name, Some(import.clone()))
    }

    pub fn pointer(self) -> Self {
        TypeReference::Pointer(Box::new(self))
    }

    pub fn slice(self) -> Self {
        TypeReference::Slice(Box::new(self))
    }

    pub fn array(self, len: usize) -> Self {
        TypeReference::Array(len, Box::new(self))
    }

    pub fn map(key: TypeReference, value: TypeReference) -> Self {
        TypeReference::Map(Box::new(key), Box::new(value))
    }

    pub fn func(params: Vec<TypeReference>, returns: Vec<TypeReference>) -> Self {
        TypeReference::Func { params, returns }
    }

    pub fn variadic(self) -> Self {
        TypeReference::Variadic(Box::new(self))
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeReference::Primitive(_) => TypeKind::Primitive,
            TypeReference::Named(_) => TypeKind::Named,
            TypeReference::Pointer(_) => TypeKind::Pointer,
            TypeReference::Slice(_) => TypeKind::Slice,
            TypeReference::Array(..) => TypeKind::Array,
            TypeReference::Map(..) => TypeKind::Map,
            TypeReference::Func { .. } => TypeKind::Func,
            TypeReference::Variadic(_) => TypeKind::Variadic,
        }
    }

    /// Go spelling of the type, qualified where it carries a package
    pub fn name(&self) -> String {
        match self {
            TypeReference::Primitive(p) => p.go_name().to_string(),
            TypeReference::Named(named) => match &named.package {
                Some(package) => format!("{package}.{}", named.name),
                None => named.name.clone(),
            },
            TypeReference::Pointer(inner) => format!("*{}", inner.name()),
            TypeReference::Slice(inner) => format!("[]{}", inner.name()),
            TypeReference::Array(len, inner) => format!("[{len}]{}", inner.name()),
            TypeReference::Map(key, value) => format!("map[{}]{}", key.name(), value.name()),
            TypeReference::Func { params, returns } => {
                let params = params.iter().map(|p| p.name()).collect::<Vec<_>>();
                let returns = return_list(returns);
                if returns.is_empty() {
                    format!("func({})", params.join(", "))
                } else {
                    format!("func({}) {returns}", params.join(", "))
                }
            }
            TypeReference::Variadic(inner) => format!("...{}", inner.name()),
        }
    }

    /// Imports a file must declare to use this type
    pub fn required_imports(&self) -> BTreeSet<Import> {
        let mut imports = BTreeSet::new();
        self.collect_imports(&mut imports);
        imports
    }

    fn collect_imports(&self, imports: &mut BTreeSet<Import>) {
        match self {
            TypeReference::Primitive(_) => {}
            TypeReference::Named(named) => {
                if let Some(import) = &named.import {
                    imports.insert(import.clone());
                }
            }
            TypeReference::Pointer(inner)
            | TypeReference::Slice(inner)
            | TypeReference::Array(_, inner)
            | TypeReference::Variadic(inner) => inner.collect_imports(imports),
            TypeReference::Map(key, value) => {
                key.collect_imports(imports);
                value.collect_imports(imports);
            }
            TypeReference::Func { params, returns } => {
                for t in params.iter().chain(returns) {
                    t.collect_imports(imports);
                }
            }
        }
    }

    /// The same reference as seen from inside `current_package`: named
    /// types declared there lose their qualifier and import.
    pub fn localized(&self, current_package: &str) -> TypeReference {
        match self {
            TypeReference::Named(named) if named.package.as_deref() == Some(current_package) => {
                TypeReference::Named(NamedType {
                    name: named.name.clone(),
                    package: None,
                    import: None,
                })
            }
            TypeReference::Primitive(_) | TypeReference::Named(_) => self.clone(),
            TypeReference::Pointer(inner) => inner.localized(current_package).pointer(),
            TypeReference::Slice(inner) => inner.localized(current_package).slice(),
            TypeReference::Array(len, inner) => inner.localized(current_package).array(*len),
            TypeReference::Variadic(inner) => inner.localized(current_package).variadic(),
            TypeReference::Map(key, value) => TypeReference::map(
                key.localized(current_package),
                value.localized(current_package),
            ),
            TypeReference::Func { params, returns } => TypeReference::func(
                params.iter().map(|t| t.localized(current_package)).collect(),
                returns.iter().map(|t| t.localized(current_package)).collect(),
            ),
        }
    }
}

/// Render a result list: nothing, a bare type, or a parenthesized tuple
pub fn return_list(returns: &[TypeReference]) -> String {
    match returns {
        [] => String::new(),
        [single] if single.kind() != TypeKind::Func => single.name(),
        many => format!(
            "({})",
            many.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
        ),
    }
}
