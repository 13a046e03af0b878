//! xservice-codegen - Builders for Go source text
//!
//! Declarations are assembled from validated parts and rendered through a
//! formatting pass:
//! - [`Block`] holds the statements of a body
//! - [`Const`], [`Var`], [`Structure`], [`Interface`], [`Prototype`],
//!   [`Function`], [`Method`] and [`Closure`] build declarations
//! - [`GoFile`] places declarations into sections and produces the final
//!   formatted bytes
//!
//! # Example
//!
//! ```
//! use xservice_codegen::{Block, Function, GoFile};
//!
//! let mut body = Block::new();
//! body.call("fmt.Println", &["\"hello\""]).unwrap();
//! let main = Function::new("main", vec![], vec![]).unwrap().with_body(body);
//!
//! let mut file = GoFile::new("main", "main.proto").unwrap();
//! file.add_func(main);
//! let source = String::from_utf8(file.render_and_format().unwrap()).unwrap();
//! assert!(source.contains("import (\n\t\"fmt\"\n)"));
//! ```

pub mod block;
pub mod closure;
pub mod comment;
pub mod constant;
pub mod decl;
pub mod file;
pub mod format;
mod fragment;
pub mod function;
pub mod imports;
pub mod interface;
mod lex;
pub mod literal;
pub mod ops;
pub mod structure;
pub mod switch;

pub use block::Block;
pub use closure::{AnonymousFunc, Closure};
pub use comment::Comment;
pub use constant::{Const, Var};
pub use decl::Declaration;
pub use file::GoFile;
pub use format::{format_fragment, format_source};
pub use function::{Function, Method};
pub use interface::{Interface, Prototype};
pub use literal::{SliceLiteral, StructLiteral};
pub use ops::Operator;
pub use structure::Structure;
pub use switch::Switch;
