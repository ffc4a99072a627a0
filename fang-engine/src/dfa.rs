//! Lexer transition tables.
//!
//! Each lexer mode owns one dense DFA compiled from an ordered list of
//! token patterns. The DFA is anchored and built with [`MatchKind::All`],
//! so it keeps running past every accepting state until no pattern can be
//! extended; the lexer records the last accepting position and backs up to
//! it (maximal munch). When several patterns accept the same lexeme the
//! lowest pattern index wins.
//!
//! An optional second DFA reclassifies complete lexemes as keywords. It is
//! only ever run over a lexeme the primary DFA already produced and it only
//! reports a keyword when the whole lexeme is consumed by one pattern.

use crate::error::EngineError;
use regex_automata::{
    Anchored, Input, MatchKind,
    dfa::{Automaton, StartKind, dense},
    nfa::thompson::{Config as ThomConfig, NFA},
    util::{primitives::StateID, syntax},
};
use smartstring::alias::String;

/// A compiled, anchored, all-match DFA.
#[derive(Debug, Clone)]
pub struct Dfa {
    dfa: dense::DFA<Vec<u32>>,
    patterns: usize,
}

/// Outcome of feeding one byte to a [`Dfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still inside a possible lexeme.
    Continue(StateID),
    /// The lexeme ending *before* this byte matched `pattern`.
    Match(StateID, usize),
    /// No pattern can be extended with this byte.
    Dead,
}

impl Dfa {
    /// Compiles `patterns` (byte-oriented, non-Unicode regex syntax).
    pub fn try_build(patterns: &[&str]) -> Result<Self, EngineError> {
        let conf = syntax::Config::new().unicode(false).utf8(false);
        let hirs = patterns
            .iter()
            .map(|p| {
                syntax::parse_with(p, &conf)
                    .map_err(|e| EngineError::LexerTable(format!("pattern {p:?}: {e}").into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nfa = NFA::compiler()
            .configure(ThomConfig::new().utf8(false))
            .build_many_from_hir(&hirs)
            .map_err(|e| EngineError::LexerTable(String::from(e.to_string())))?;
        let dfa = dense::Builder::new()
            .configure(
                dense::DFA::config()
                    .match_kind(MatchKind::All)
                    .start_kind(StartKind::Anchored),
            )
            .build_from_nfa(&nfa)
            .map_err(|e| EngineError::LexerTable(String::from(e.to_string())))?;

        log::debug!(
            "built DFA: {} patterns, {} bytes",
            patterns.len(),
            dfa.memory_usage()
        );
        Ok(Self {
            dfa,
            patterns: patterns.len(),
        })
    }

    pub fn pattern_len(&self) -> usize {
        self.patterns
    }

    /// Anchored start state.
    pub fn start(&self) -> Result<StateID, EngineError> {
        self.dfa
            .start_state_forward(&Input::new("").anchored(Anchored::Yes))
            .map_err(|e| EngineError::LexerTable(String::from(e.to_string())))
    }

    /// Advances `state` by byte `b`.
    #[inline]
    pub fn step(&self, state: StateID, b: u8) -> Step {
        let next = self.dfa.next_state(state, b);
        if self.dfa.is_special_state(next) {
            if self.dfa.is_match_state(next) {
                return Step::Match(next, self.first_pattern(next));
            }
            if self.dfa.is_dead_state(next) || self.dfa.is_quit_state(next) {
                return Step::Dead;
            }
        }
        Step::Continue(next)
    }

    /// Pattern accepted when input ends in `state`, if any.
    #[inline]
    pub fn step_eoi(&self, state: StateID) -> Option<usize> {
        let eoi = self.dfa.next_eoi_state(state);
        if self.dfa.is_match_state(eoi) {
            Some(self.first_pattern(eoi))
        } else {
            None
        }
    }

    /// Lowest pattern index among those matching in `state`.
    fn first_pattern(&self, state: StateID) -> usize {
        (0..self.dfa.match_len(state))
            .map(|i| self.dfa.match_pattern(state, i).as_usize())
            .min()
            .unwrap_or(0)
    }

    /// Pattern that matches all of `bytes`, if any.
    ///
    /// Matching is exact: a pattern matching only a prefix does not count.
    pub fn exact_match(&self, bytes: &[u8]) -> Result<Option<usize>, EngineError> {
        let mut state = self.start()?;
        for &b in bytes {
            state = match self.step(state, b) {
                Step::Continue(s) | Step::Match(s, _) => s,
                Step::Dead => return Ok(None),
            };
        }
        Ok(self.step_eoi(state))
    }
}

/// All DFAs a lexer needs: one per mode, plus an optional keyword table.
#[derive(Debug, Clone)]
pub struct LexerTables {
    modes: Vec<Dfa>,
    keywords: Option<Dfa>,
}

impl LexerTables {
    /// Builds one DFA per entry of `modes` and, if given, the keyword DFA.
    pub fn try_build(modes: &[&[&str]], keywords: Option<&[&str]>) -> Result<Self, EngineError> {
        let modes = modes
            .iter()
            .map(|patterns| Dfa::try_build(patterns))
            .collect::<Result<Vec<_>, _>>()?;
        let keywords = keywords.map(Dfa::try_build).transpose()?;
        Ok(Self { modes, keywords })
    }

    #[inline]
    pub fn mode(&self, mode: usize) -> Result<&Dfa, EngineError> {
        self.modes
            .get(mode)
            .ok_or_else(|| EngineError::LexerTable(format!("no DFA for mode {mode}").into()))
    }

    /// Keyword pattern spelled exactly by `lexeme`, if any.
    pub fn keyword(&self, lexeme: &[u8]) -> Result<Option<usize>, EngineError> {
        match &self.keywords {
            Some(dfa) => dfa.exact_match(lexeme),
            None => Ok(None),
        }
    }
}
