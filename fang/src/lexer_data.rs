//! Lexer tables for fang.
//!
//! A single mode. Rule order is pattern order, so on equal-length matches
//! the earlier rule wins. `True` and `False` are not rules of their own:
//! they lex as identifiers and are promoted by the keyword table.

use fang_engine::{EngineError, LexerData, LexerMode, LexerRule, LexerTables};
use once_cell::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Expr = 0,
}

impl LexerMode for Mode {
    const COUNT: usize = 1;
}

impl From<Mode> for usize {
    fn from(m: Mode) -> Self {
        m as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Rule {
    Whitespace = 0,
    Eq = 1,
    Backslash = 2,
    Arrow = 3,
    Integer = 4,
    Ident = 5,
    End = 6,
}

impl LexerRule for Rule {
    const COUNT: usize = 7;
    const END: Self = Rule::End;
}

impl From<Rule> for usize {
    fn from(r: Rule) -> Self {
        r as usize
    }
}

impl Mode {
    pub const PATTERNS: &'static [&'static [&'static str]] = &[
        /* Expr */
        &[
            r"[\t\n\r ]+",              // 0 Whitespace
            r"=",                       // 1 Eq
            r"\\",                      // 2 Backslash
            r"->",                      // 3 Arrow
            r"-?[0-9](_?[0-9])*",       // 4 Integer
            r"_?[A-Za-z][A-Za-z0-9_]*", // 5 Ident
        ],
    ];
}

/// Reserved spellings, matched against whole identifier lexemes.
pub const KEYWORDS: &[&str] = &[
    "True",  // 0
    "False", // 1
];

pub struct LexData;

impl LexData {
    const RULES: &'static [&'static [Rule]] = &[
        /* Expr */
        &[
            Rule::Whitespace,
            Rule::Eq,
            Rule::Backslash,
            Rule::Arrow,
            Rule::Integer,
            Rule::Ident,
        ],
    ];
}

impl LexerData for LexData {
    type LexerMode = Mode;
    type LexerRule = Rule;

    #[inline]
    fn start_mode() -> Self::LexerMode {
        Mode::Expr
    }

    fn tables() -> Result<&'static LexerTables, EngineError> {
        static TABLES: OnceCell<LexerTables> = OnceCell::new();
        TABLES.get_or_try_init(|| LexerTables::try_build(Mode::PATTERNS, Some(KEYWORDS)))
    }

    #[inline]
    fn lookup(mode: Self::LexerMode, pattern_id: usize) -> Self::LexerRule {
        Self::RULES[usize::from(mode)][pattern_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_has_a_rule() {
        assert_eq!(Mode::PATTERNS.len(), Mode::COUNT);
        for (patterns, rules) in Mode::PATTERNS.iter().zip(LexData::RULES) {
            assert_eq!(patterns.len(), rules.len());
        }
        assert_eq!(LexData::RULES[0].len() + 1, Rule::COUNT);
    }

    #[test]
    fn tables_build_and_are_shared() {
        let a = LexData::tables().unwrap();
        let b = LexData::tables().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.mode(0).unwrap().pattern_len(), 6);
    }

    #[test]
    fn keyword_table_is_exact() {
        let tables = LexData::tables().unwrap();
        assert_eq!(tables.keyword(b"True").unwrap(), Some(0));
        assert_eq!(tables.keyword(b"False").unwrap(), Some(1));
        assert_eq!(tables.keyword(b"TRUE").unwrap(), None);
        assert_eq!(tables.keyword(b"Falsey").unwrap(), None);
    }
}
