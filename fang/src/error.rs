//! # Fang Error Type
//!
//! [`FangError`] is the single error surface of the `fang` crate. It wraps
//! lexer and parser failures from [`fang_engine`] and adds the failures of
//! the later stages:
//!
//! - **Engine** errors: lexical dead-ends, unexpected tokens, broken tables.
//! - **Integer** literals that do not fit in an `i64` when lowering.
//! - **UnexpectedNode**: a tree of the wrong shape handed to [`crate::ast::lower`].
//! - **TooDeep**: expressions nested past [`crate::ast::MAX_DEPTH`].
//! - **I/O** errors while reading source files.
//!
//! Located errors can be rendered against their source with
//! [`FangError::render`] or [`FangError::with_source`].

use fang_engine::{EngineError, Span};
use smartstring::alias::String;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FangError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An integer literal lexed correctly but does not fit in `i64`.
    #[error("integer literal {text:?} out of range at offset {}", .span.start.offset)]
    Integer {
        text: String,
        span: Span,
        #[source]
        source: ParseIntError,
    },

    #[error("unexpected {kind} node at offset {}", .span.start.offset)]
    UnexpectedNode { kind: &'static str, span: Span },

    #[error("expression nested deeper than {limit} levels at offset {}", .span.start.offset)]
    TooDeep { limit: usize, span: Span },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FangError {
    pub fn span(&self) -> Option<Span> {
        match self {
            FangError::Engine(e) => e.span(),
            FangError::Integer { span, .. }
            | FangError::UnexpectedNode { span, .. }
            | FangError::TooDeep { span, .. } => Some(*span),
            FangError::Io(_) => None,
        }
    }

    /// Formats the error with the offending source line and a caret.
    ///
    /// ```text
    /// error: unexpected "->" at offset 1 (state 11)
    ///  --> 1:2
    ///   |
    /// 1 | \-> 1
    ///   |  ^
    /// ```
    pub fn render(&self, source: &str) -> std::string::String {
        self.with_source(source).to_string()
    }

    pub fn with_source<'a>(&'a self, source: &'a str) -> WithSource<'a> {
        WithSource {
            error: self,
            source,
        }
    }
}

/// [`FangError`] paired with the text it refers to.
pub struct WithSource<'a> {
    error: &'a FangError,
    source: &'a str,
}

impl fmt::Display for WithSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.error)?;
        let Some(span) = self.error.span() else {
            return Ok(());
        };
        let line_no = span.start.line;
        let column = span.start.column;
        let line = self.source.lines().nth(line_no).unwrap_or("");
        let gutter = (line_no + 1).to_string().len();

        writeln!(f)?;
        writeln!(f, "{:gutter$}--> {}:{}", "", line_no + 1, column + 1)?;
        writeln!(f, "{:gutter$} |", "")?;
        writeln!(f, "{} | {}", line_no + 1, line)?;
        write!(f, "{:gutter$} | {:column$}^", "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fang_engine::Position;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn fang_error_is_send_sync_static() {
        _assert_send_sync_static::<FangError>();
    }

    #[test]
    fn engine_errors_convert_transparently() {
        let err: FangError = EngineError::StackUnderflow.into();
        assert!(matches!(err, FangError::Engine(EngineError::StackUnderflow)));
        assert_eq!(err.to_string(), "parser stack underflow");
        assert!(err.span().is_none());
    }

    #[test]
    fn integer_error_keeps_source() {
        let source = "99999999999999999999".parse::<i64>().unwrap_err();
        let err = FangError::Integer {
            text: "99999999999999999999".into(),
            span: Span::default(),
            source,
        };
        assert!(err.to_string().contains("out of range"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn render_points_at_column() {
        let at = Position::new(5, 1, 2);
        let err = FangError::UnexpectedNode {
            kind: "unit",
            span: Span::new(at, at),
        };
        let text = err.render("x = 1\ny = =");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "error: unexpected unit node at offset 5");
        assert_eq!(lines[1], " --> 2:3");
        assert_eq!(lines[3], "2 | y = =");
        assert_eq!(lines[4], "  |   ^");
    }

    #[test]
    fn render_without_span_is_one_line() {
        let err = FangError::Io(std::io::Error::other("gone"));
        assert_eq!(err.render(""), "error: i/o error: gone");
    }
}
