//! Runtime for table-driven lexers and shift-reduce parsers.
//!
//! A language crate supplies static tables ([`LexerData`], [`ParserData`])
//! and thin [`Lexer`] / [`Parser`] implementations holding a context; the
//! runtime does the longest-match scanning, the stack machine and the
//! construction of the syntax tree.

mod cursor;
mod dfa;
mod error;
mod lexer;
mod parser;
mod tree;

pub use crate::cursor::{CursorError, LexerCursor, Position, Span};
pub use crate::dfa::{Dfa, LexerTables, Step};
pub use crate::error::EngineError;
pub use crate::lexer::{Lexer, LexerCtx, LexerData, LexerMode, LexerRule, LexerStats, Token};
pub use crate::parser::{
    ParseNode, Parser, ParserAction, ParserCtx, ParserData, ParserFieldID, ParserProdID,
    ParserStateID, ParserStats, ParserTokenID,
};
pub use crate::tree::{Node, SymbolMetadata};
