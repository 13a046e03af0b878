//! The closed set of top level declarations a file can hold

use crate::closure::Closure;
use crate::constant::{Const, Var};
use crate::function::Function;
use crate::interface::{Interface, Prototype};
use crate::structure::Structure;
use std::collections::BTreeSet;
use xservice_core::{GenResult, Import};

#[derive(Debug, Clone)]
pub enum Declaration {
    Const(Const),
    Var(Var),
    Interface(Interface),
    Prototype(Prototype),
    Structure(Structure),
    Function(Function),
    Closure(Closure),
}

impl Declaration {
    pub fn imports(&self) -> BTreeSet<Import> {
        match self {
            Declaration::Const(d) => d.imports(),
            Declaration::Var(d) => d.imports(),
            Declaration::Interface(d) => d.imports(),
            Declaration::Prototype(d) => d.imports(),
            Declaration::Structure(d) => d.imports(),
            Declaration::Function(d) => d.imports(),
            Declaration::Closure(d) => d.imports(),
        }
    }

    /// Formatted text of the declaration. A structure renders its type
    /// followed by its methods.
    pub fn render(&self) -> GenResult<String> {
        match self {
            Declaration::Const(d) => d.render(),
            Declaration::Var(d) => d.render(),
            Declaration::Interface(d) => d.render(),
            Declaration::Prototype(d) => d.render(),
            Declaration::Structure(d) => {
                let mut parts = vec![d.render()?];
                parts.extend(d.render_methods()?);
                Ok(parts.join("\n\n"))
            }
            Declaration::Function(d) => d.render(),
            Declaration::Closure(d) => d.render(),
        }
    }
}

macro_rules! impl_from_declaration {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Declaration {
                fn from(value: $variant) -> Self {
                    Declaration::$variant(value)
                }
            }
        )*
    };
}

impl_from_declaration!(Const, Var, Interface, Prototype, Structure, Function, Closure);
