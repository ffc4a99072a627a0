use crate::cursor::{LexerCursor, Span};
use crate::dfa::{LexerTables, Step};
use crate::error::EngineError;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::iter::FusedIterator;

pub trait Token: Clone + Debug {
    type TokenID: Copy + Debug + Into<usize>;

    fn token_id(&self) -> Self::TokenID;
    fn span(&self) -> Span;
}

pub trait LexerMode: Copy + Debug + Into<usize> {
    const COUNT: usize;
}

pub trait LexerRule: Copy + Debug + Into<usize> {
    const COUNT: usize;
    const END: Self;
}

/// Static lexer description: modes, rules and the DFAs recognizing them.
pub trait LexerData {
    type LexerMode: LexerMode;
    type LexerRule: LexerRule;

    fn start_mode() -> Self::LexerMode;

    /// The compiled DFAs. Built once and shared by every lexer instance.
    fn tables() -> Result<&'static LexerTables, EngineError>;

    fn lookup(mode: Self::LexerMode, pattern_id: usize) -> Self::LexerRule;
}

pub trait Lexer {
    type Input: FusedIterator<Item = u8>;
    type LexerData: LexerData;
    type Token: Token;

    fn ctx(&self) -> &LexerCtx<Self::Input, Self::LexerData, Self::Token>;
    fn ctx_mut(&mut self) -> &mut LexerCtx<Self::Input, Self::LexerData, Self::Token>;

    /// Semantic action for a matched rule. The matched bytes are in
    /// [`LexerCtx::buffer`] and their location in [`LexerCtx::span`].
    fn action(&mut self, rule: <Self::LexerData as LexerData>::LexerRule)
    -> Result<(), EngineError>;

    fn stats(&self) -> LexerStats {
        self.ctx().stats.clone()
    }

    /// Returns the next token, or `None` once the end rule has run.
    #[inline]
    fn try_next(&mut self) -> Result<Option<Self::Token>, EngineError> {
        if let Some(t) = self.ctx_mut().tokens.pop_front() {
            return Ok(Some(t));
        }

        if self.ctx().end_flag {
            return Ok(None);
        }

        while let Some(pattern) = self.ctx_mut().try_match()? {
            let mode = self.ctx().mode;
            let rule = <Self as Lexer>::LexerData::lookup(mode, pattern);
            log::trace!(
                "MATCHED: LexerMode: {:?}, LexerRule: {:?}, Pattern: {}, Buffer: {:?}",
                mode,
                rule,
                pattern,
                match std::str::from_utf8(&self.ctx().buffer) {
                    Ok(s) => s.to_string(),
                    Err(_) => hex::encode(&self.ctx().buffer),
                },
            );

            self.ctx_mut().commit()?;
            self.action(rule)?;

            if let Some(t) = self.ctx_mut().tokens.pop_front() {
                return Ok(Some(t));
            }
        }
        self.ctx_mut().end_flag = true;
        self.ctx_mut().commit()?;

        self.action(<Self::LexerData as LexerData>::LexerRule::END)?;

        Ok(self.ctx_mut().tokens.pop_front())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexerStats {
    pub unreads: usize,
    pub chars: usize,
    pub matches: usize,
}

pub struct LexerCtx<I, D, T>
where
    D: LexerData,
{
    pub mode: D::LexerMode,

    tables: &'static LexerTables,

    input: I,
    unread: Vec<u8>,

    /// Bytes of the current lexeme.
    pub buffer: Vec<u8>,

    pub end_flag: bool,
    tokens: VecDeque<T>,

    cursor: LexerCursor,

    stats: LexerStats,
}

impl<I, D, T> LexerCtx<I, D, T>
where
    I: FusedIterator<Item = u8>,
    D: LexerData,
    T: Token,
{
    pub fn try_new(input: I) -> Result<Self, EngineError> {
        let tables = D::tables()?;
        if tables.mode(D::LexerMode::COUNT.saturating_sub(1)).is_err() {
            return Err(EngineError::LexerTable(
                format!("expected {} lexer modes", D::LexerMode::COUNT).into(),
            ));
        }

        Ok(Self {
            mode: D::start_mode(),
            tables,
            input,
            unread: Vec::new(),
            buffer: Vec::new(),
            end_flag: false,
            tokens: VecDeque::new(),
            cursor: LexerCursor::new(),
            stats: LexerStats::default(),
        })
    }

    /// Scans the longest lexeme from the current position.
    ///
    /// Returns the pattern id of the match, leaving the lexeme in `buffer`
    /// and pushing any over-read bytes back onto the unread stack. Returns
    /// `None` at a clean end of input.
    fn try_match(&mut self) -> Result<Option<usize>, EngineError> {
        self.stats.matches += 1;
        self.buffer.clear();
        let tables = self.tables;
        let dfa = tables.mode(self.mode.into())?;
        let mut state = dfa.start()?;
        log::trace!("START: mode={:?}, s={:?}", self.mode, state);
        let mut last_match: Option<(usize, usize)> = None;
        let mut i = 0;

        loop {
            match self.unread.pop().or_else(|| {
                let b = self.input.next();
                if b.is_some() {
                    self.stats.chars += 1;
                }
                b
            }) {
                Some(b) => {
                    self.buffer.push(b);
                    match dfa.step(state, b) {
                        Step::Match(next, pattern) => {
                            log::trace!("MATCH: i={}, b={:?}, p={}", i, b as char, pattern);
                            last_match = Some((pattern, i));
                            state = next;
                        }
                        Step::Dead => {
                            log::trace!("DEAD: i={}, b={:?}", i, b as char);
                            return match last_match {
                                Some((pattern, len)) => {
                                    self.unread_from(len);
                                    Ok(Some(pattern))
                                }
                                None => Err(self.dead_end(i, Some(b))?),
                            };
                        }
                        Step::Continue(next) => {
                            state = next;
                        }
                    }
                }
                None => break,
            }
            i += 1;
        }
        if let Some(pattern) = dfa.step_eoi(state) {
            last_match = Some((pattern, i));
        }
        match last_match {
            Some((pattern, len)) => {
                self.unread_from(len);
                Ok(Some(pattern))
            }
            None if self.buffer.is_empty() => Ok(None),
            None => Err(self.dead_end(i, None)?),
        }
    }

    /// Pushes `buffer[len..]` back so it is read again by the next scan.
    fn unread_from(&mut self, len: usize) {
        while self.buffer.len() > len {
            if let Some(x) = self.buffer.pop() {
                self.stats.unreads += 1;
                self.unread.push(x);
            }
        }
    }

    fn dead_end(&self, i: usize, byte: Option<u8>) -> Result<EngineError, EngineError> {
        let mut probe = self.cursor.clone();
        let span = probe.commit(&self.buffer[..i])?;
        Ok(EngineError::Lexical {
            offset: span.end.offset,
            byte,
            span,
        })
    }

    /// Moves the cursor over the current lexeme.
    fn commit(&mut self) -> Result<Span, EngineError> {
        Ok(self.cursor.commit(&self.buffer)?)
    }

    /// Location of the current lexeme.
    #[inline]
    pub fn span(&self) -> Span {
        self.cursor.span
    }

    /// Keyword id spelled exactly by the current lexeme, if any.
    pub fn keyword(&self) -> Result<Option<usize>, EngineError> {
        self.tables.keyword(&self.buffer)
    }

    pub fn yield_token(&mut self, token: T) {
        self.tokens.push_back(token);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
