//! # fang
//!
//! Lexer and parser for **fang**, a minimal expression language with
//! bindings, lambdas, booleans, identifiers and integers:
//!
//! ```text
//! inc = \x -> x
//! const = \a b -> a
//! True -1_000
//! ```
//!
//! The crate supplies the tables and a thin driver; scanning, the
//! shift-reduce stack machine and tree construction come from
//! [`fang_engine`].
//!
//! ## Modules
//!
//! - [`lexer_data`] / [`parser_data`]: lexer patterns, keyword list and the
//!   parser action tables.
//! - [`lexer`]: [`FangLexer`], [`FangToken`] and [`tokenize`].
//! - [`parser`]: [`FangParser`], [`FangTree`] and [`parse`].
//! - [`ast`]: lowering of a syntax tree to typed [`Expr`] values.
//! - [`error`]: [`FangError`] and source-annotated rendering.
//!
//! ## Example
//!
//! ```rust
//! use fang::{FieldID, TokenID};
//!
//! let source = "\\x -> x";
//! let tree = fang::parse(source).unwrap();
//! assert_eq!(tree.to_sexp(), "(unit (lambda bound: (identifier) body: (identifier)))");
//!
//! let lambda = tree.child(0).unwrap();
//! assert_eq!(lambda.kind(), TokenID::Lambda);
//! assert_eq!(lambda.child_by_field(FieldID::Bound).unwrap().text(source), "x");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod lexer_data;
pub mod parser;
pub mod parser_data;

pub use ast::{Expr, Ident, Unit, lower};
pub use error::{FangError, WithSource};
pub use fang_engine::{EngineError, Lexer, Parser, ParserTokenID, Position, Span};
pub use lexer::{FangLexer, FangToken, tokenize};
pub use parser::{FangParser, FangTree, parse};
pub use parser_data::{FieldID, TokenID};
