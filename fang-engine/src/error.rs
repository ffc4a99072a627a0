//! Error type shared by the lexer and parser runtimes.
//!
//! [`EngineError`] separates three groups of failures:
//!
//! - **configuration** ([`EngineError::LexerTable`], [`EngineError::ParserTable`]):
//!   the tables handed to the runtime cannot be built or contradict each
//!   other. These indicate a broken grammar, never bad input.
//! - **input** ([`EngineError::Lexical`], [`EngineError::UnexpectedToken`]):
//!   the source text does not belong to the language. Both carry a [`Span`].
//! - **internal** ([`EngineError::Cursor`], [`EngineError::StackUnderflow`]).
//!
//! No variant is fatal to the host; a failed run returns the error by value.

use crate::cursor::{CursorError, Span};
use smartstring::alias::String;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A lexer DFA could not be built from its patterns.
    #[error("invalid lexer table: {0}")]
    LexerTable(String),

    /// The action table is inconsistent (e.g. a reduction without a goto).
    #[error("invalid parser table: {0}")]
    ParserTable(String),

    /// No token pattern matches the input at `offset`.
    ///
    /// `byte` is the first byte that could not extend any pattern, or `None`
    /// when the input ended in the middle of an incomplete lexeme.
    #[error("{} at offset {offset}", describe_byte(.byte))]
    Lexical {
        offset: usize,
        byte: Option<u8>,
        span: Span,
    },

    /// The action table has no entry for `(state, token)`.
    #[error("unexpected {token:?} at offset {} (state {state})", .span.start.offset)]
    UnexpectedToken {
        state: usize,
        token: &'static str,
        span: Span,
    },

    #[error("cursor error: {0}")]
    Cursor(#[from] CursorError),

    #[error("parser stack underflow")]
    StackUnderflow,
}

fn describe_byte(byte: &Option<u8>) -> std::string::String {
    match byte {
        Some(b) if b.is_ascii_graphic() => format!("unrecognized character {:?}", *b as char),
        Some(b) => format!("unrecognized byte 0x{b:02x}"),
        None => "unterminated token at end of input".to_string(),
    }
}

impl EngineError {
    /// The source location this error points at, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            EngineError::Lexical { span, .. } | EngineError::UnexpectedToken { span, .. } => {
                Some(*span)
            }
            _ => None,
        }
    }

    /// Byte offset of the offending input, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            EngineError::Lexical { offset, .. } => Some(*offset),
            EngineError::UnexpectedToken { span, .. } => Some(span.start.offset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Position;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn engine_error_is_send_sync_static() {
        _assert_send_sync_static::<EngineError>();
    }

    #[test]
    fn lexical_error_names_the_byte() {
        let at = Position::new(3, 0, 3);
        let err = EngineError::Lexical {
            offset: 3,
            byte: Some(b'@'),
            span: Span::new(at, at),
        };
        assert_eq!(err.to_string(), "unrecognized character '@' at offset 3");
        assert_eq!(err.offset(), Some(3));

        let err = EngineError::Lexical {
            offset: 2,
            byte: None,
            span: Span::default(),
        };
        assert!(err.to_string().starts_with("unterminated token"));
    }

    #[test]
    fn unexpected_token_carries_span() {
        let sp = Span::new(Position::new(1, 0, 1), Position::new(3, 0, 3));
        let err = EngineError::UnexpectedToken {
            state: 11,
            token: "->",
            span: sp,
        };
        assert_eq!(err.span(), Some(sp));
        assert_eq!(err.to_string(), "unexpected \"->\" at offset 1 (state 11)");
        assert_eq!(EngineError::StackUnderflow.span(), None);
    }
}
