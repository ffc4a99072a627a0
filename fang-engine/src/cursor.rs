use thiserror::Error;

/// A position in source text: byte offset plus 0-based line/column.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 0-based byte offset from the start of input.
    pub offset: usize,
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (byte position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// A half-open source range: `[start, end)`.
///
/// `Span` is used to mark the region of source text that a token or syntax
/// node covers, or to attach precise locations to diagnostics.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span located at `pos`.
    #[inline]
    pub const fn empty(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Start (or restart) this span at its current `end` position (empty span at end).
    /// Effect: span(x,y, z,w) -> span(z,w, z,w)
    pub fn collapse(&mut self) {
        self.start = self.end;
    }

    /// Merge with another span by covering both.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start <= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Is this span empty (start == end)?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Byte range, suitable for slicing the source text.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Returns the inclusive line range spanned by this `Span`.
    #[inline]
    pub fn line_range(&self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor offset overflow")]
    Overflow,
}

/// Tracks the current lexical position.
///
/// The cursor only moves forward over bytes the lexer has committed to a
/// lexeme; bytes pushed back after a longest-match probe are never counted.
#[derive(Debug, Clone, Default)]
pub struct LexerCursor {
    pub span: Span,
}

impl LexerCursor {
    pub fn new() -> Self {
        Self {
            span: Span::default(),
        }
    }

    /// Current byte offset (end of the last committed lexeme).
    #[inline]
    pub fn pos(&self) -> usize {
        self.span.end.offset
    }

    /// Advance by consuming a byte `b`, updating the span end.
    pub fn advance(&mut self, b: u8) -> Result<(), CursorError> {
        let end = &mut self.span.end;
        end.offset = end.offset.checked_add(1).ok_or(CursorError::Overflow)?;
        if b == b'\n' {
            end.line += 1;
            end.column = 0;
        } else {
            end.column += 1;
        }
        Ok(())
    }

    /// Collapse the span and advance over `bytes`; the span then covers exactly `bytes`.
    pub fn commit(&mut self, bytes: &[u8]) -> Result<Span, CursorError> {
        self.span.collapse();
        for &b in bytes {
            self.advance(b)?;
        }
        Ok(self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_lines_and_columns() {
        let mut c = LexerCursor::new();
        for b in b"ab\ncd" {
            c.advance(*b).unwrap();
        }
        assert_eq!(c.span.end, Position::new(5, 1, 2));
        assert_eq!(c.pos(), 5);
    }

    #[test]
    fn commit_covers_exactly_the_lexeme() {
        let mut c = LexerCursor::new();
        c.commit(b"  ").unwrap();
        let sp = c.commit(b"xy").unwrap();
        assert_eq!(sp.range(), 2..4);
        assert_eq!(sp.len(), 2);
        assert_eq!(sp.display(), "span 0:2 to 0:4");
    }

    #[test]
    fn merge_covers_both() {
        let a = Span::new(Position::new(3, 0, 3), Position::new(5, 0, 5));
        let b = Span::new(Position::new(0, 0, 0), Position::new(4, 0, 4));
        let m = a.merge(&b);
        assert_eq!(m.range(), 0..5);
        assert!(!m.is_empty());
        assert!(Span::empty(Position::new(7, 1, 0)).is_empty());
    }

    #[test]
    fn line_range_spans_newlines() {
        let mut c = LexerCursor::new();
        let sp = c.commit(b"a\nb\nc").unwrap();
        assert_eq!(sp.line_range(), (0, 2));
    }
}
