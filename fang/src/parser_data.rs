//! Parser tables for fang.
//!
//! ```text
//! unit           ::= _expression*
//! _expression    ::= binding | lambda | bool | identifier | integer
//! binding        ::= identifier '=' _expression
//! lambda         ::= '\' identifier '->' _expression          bound: 1, body: 3
//!                  | '\' identifier identifier+ '->' _expression        body: 3
//! bool           ::= 'True' | 'False'
//! ```
//!
//! States 0 to 5 are stored densely, one action per symbol. The remaining
//! states have few entries and are stored as sparse rows; a symbol missing
//! from a sparse row is an error.

use fang_engine::{
    ParserAction, ParserData, ParserFieldID, ParserProdID, ParserStateID, ParserTokenID,
    SymbolMetadata,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateID(u8);

impl ParserStateID for StateID {
    const COUNT: usize = 16;
}

impl From<StateID> for usize {
    fn from(s: StateID) -> Self {
        s.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenID {
    // Nonterminals:
    Unit = 0,
    Expression = 1,
    Binding = 2,
    Lambda = 3,
    Bool = 4,
    UnitRepeat1 = 5,
    LambdaRepeat1 = 6,

    // Terminals:
    End = 7,
    Ident = 8,
    Eq = 9,
    Backslash = 10,
    Arrow = 11,
    Integer = 12,
    True = 13,
    False = 14,
}

impl ParserTokenID for TokenID {
    const COUNT_NONTERMINALS: usize = 7;
    const COUNT_TERMINALS: usize = 8;
    const COUNT: usize = Self::COUNT_NONTERMINALS + Self::COUNT_TERMINALS;

    fn label(&self) -> &'static str {
        TokenID::LABELS[usize::from(*self)]
    }

    fn metadata(&self) -> SymbolMetadata {
        let (visible, named) = TokenID::VISIBILITY[usize::from(*self)];
        SymbolMetadata {
            name: self.label(),
            visible,
            named,
        }
    }
}

impl From<TokenID> for usize {
    fn from(t: TokenID) -> Self {
        t as usize
    }
}

impl TokenID {
    pub const LABELS: &'static [&'static str] = &[
        "unit",           // 0
        "_expression",    // 1
        "binding",        // 2
        "lambda",         // 3
        "bool",           // 4
        "unit_repeat1",   // 5
        "lambda_repeat1", // 6
        "end",            // 7
        "identifier",     // 8
        "=",              // 9
        "\\",             // 10
        "->",             // 11
        "integer",        // 12
        "True",           // 13
        "False",          // 14
    ];

    /// `(visible, named)` per symbol.
    const VISIBILITY: &'static [(bool, bool)] = &[
        (true, true),   // unit
        (false, false), // _expression
        (true, true),   // binding
        (true, true),   // lambda
        (true, true),   // bool
        (false, false), // unit_repeat1
        (false, false), // lambda_repeat1
        (false, false), // end
        (true, true),   // identifier
        (true, false),  // =
        (true, false),  // \
        (true, false),  // ->
        (true, true),   // integer
        (true, false),  // True
        (true, false),  // False
    ];

    pub fn is_terminal(&self) -> bool {
        usize::from(*self) >= Self::COUNT_NONTERMINALS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FieldID {
    Body = 0,
    Bound = 1,
}

impl ParserFieldID for FieldID {
    const COUNT: usize = 2;

    fn name(&self) -> &'static str {
        FieldID::NAMES[usize::from(*self)]
    }
}

impl From<FieldID> for usize {
    fn from(f: FieldID) -> Self {
        f as usize
    }
}

impl FieldID {
    pub const NAMES: &'static [&'static str] = &[
        "body",  // 0
        "bound", // 1
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProdID {
    Unit0 = 0,
    Unit1 = 1,
    UnitRepeat1 = 2,
    Expression = 3,
    Binding = 4,
    Lambda1 = 5,
    Lambda2 = 6,
    Bool = 7,
    LambdaRepeat1 = 8,
}

impl ParserProdID for ProdID {
    type TokenID = TokenID;
    type FieldID = FieldID;

    const COUNT: usize = 9;

    fn label(&self) -> &'static str {
        ProdID::LABELS[usize::from(*self)]
    }
    fn lhs_token_id(&self) -> Self::TokenID {
        ProdID::LHS_TOKENS[usize::from(*self)]
    }
    fn size(&self) -> usize {
        ProdID::SIZES[usize::from(*self)]
    }
    fn fields(&self) -> &'static [(FieldID, usize)] {
        ProdID::FIELDS[usize::from(*self)]
    }
}

impl From<ProdID> for usize {
    fn from(p: ProdID) -> Self {
        p as usize
    }
}

impl ProdID {
    pub const LABELS: &'static [&'static str] = &[
        "unit -> ",                                     // 0
        "unit -> unit_repeat1",                         // 1
        "unit_repeat1 -> unit_repeat1 unit_repeat1",    // 2
        "_expression -> identifier",                    // 3
        "binding -> identifier = _expression",          // 4
        "lambda -> \\ identifier -> _expression",       // 5
        "lambda -> \\ lambda_repeat1 -> _expression",   // 6
        "bool -> True",                                 // 7
        "lambda_repeat1 -> lambda_repeat1 lambda_repeat1", // 8
    ];

    pub const LHS_TOKENS: &'static [TokenID] = &[
        TokenID::Unit,          // 0
        TokenID::Unit,          // 1
        TokenID::UnitRepeat1,   // 2
        TokenID::Expression,    // 3
        TokenID::Binding,       // 4
        TokenID::Lambda,        // 5
        TokenID::Lambda,        // 6
        TokenID::Bool,          // 7
        TokenID::LambdaRepeat1, // 8
    ];

    pub const SIZES: &'static [usize] = &[
        0, // 0
        1, // 1
        2, // 2
        1, // 3
        3, // 4
        4, // 5
        4, // 6
        1, // 7
        2, // 8
    ];

    pub const FIELDS: &'static [&'static [(FieldID, usize)]] = &[
        &[],                                     // 0
        &[],                                     // 1
        &[],                                     // 2
        &[],                                     // 3
        &[],                                     // 4
        &[(FieldID::Bound, 1), (FieldID::Body, 3)], // 5
        &[(FieldID::Body, 3)],                   // 6
        &[],                                     // 7
        &[],                                     // 8
    ];
}

pub type Action = ParserAction<StateID, ProdID>;

pub struct ParData;

impl ParData {
    pub const LARGE_STATE_COUNT: usize = 6;

    const LARGE: &'static [[Action; TokenID::COUNT]] = &[
        /* STATE 0 */
        [
            Action::Goto(StateID(15)),      /* 0(unit) */
            Action::Goto(StateID(1)),       /* 1(_expression) */
            Action::Goto(StateID(1)),       /* 2(binding) */
            Action::Goto(StateID(1)),       /* 3(lambda) */
            Action::Goto(StateID(1)),       /* 4(bool) */
            Action::Goto(StateID(1)),       /* 5(unit_repeat1) */
            Action::Error,                  /* 6(lambda_repeat1) */
            Action::Reduce(ProdID::Unit0),  /* 7(end) */
            Action::Shift(StateID(6)),      /* 8(identifier) */
            Action::Recover,                /* 9(=) */
            Action::Shift(StateID(11)),     /* 10(\) */
            Action::Recover,                /* 11(->) */
            Action::Shift(StateID(1)),      /* 12(integer) */
            Action::Shift(StateID(7)),      /* 13(True) */
            Action::Shift(StateID(7)),      /* 14(False) */
        ],
        /* STATE 1 */
        [
            Action::Error,                  /* 0(unit) */
            Action::Goto(StateID(2)),       /* 1(_expression) */
            Action::Goto(StateID(2)),       /* 2(binding) */
            Action::Goto(StateID(2)),       /* 3(lambda) */
            Action::Goto(StateID(2)),       /* 4(bool) */
            Action::Error,                  /* 5(unit_repeat1) */
            Action::Error,                  /* 6(lambda_repeat1) */
            Action::Reduce(ProdID::Unit1),  /* 7(end) */
            Action::Shift(StateID(6)),      /* 8(identifier) */
            Action::Recover,                /* 9(=) */
            Action::Shift(StateID(11)),     /* 10(\) */
            Action::Recover,                /* 11(->) */
            Action::Shift(StateID(2)),      /* 12(integer) */
            Action::Shift(StateID(7)),      /* 13(True) */
            Action::Shift(StateID(7)),      /* 14(False) */
        ],
        /* STATE 2 */
        [
            Action::Error,                                         /* 0(unit) */
            Action::Goto(StateID(2)),                              /* 1(_expression) */
            Action::Goto(StateID(2)),                              /* 2(binding) */
            Action::Goto(StateID(2)),                              /* 3(lambda) */
            Action::Goto(StateID(2)),                              /* 4(bool) */
            Action::Error,                                         /* 5(unit_repeat1) */
            Action::Error,                                         /* 6(lambda_repeat1) */
            Action::Reduce(ProdID::UnitRepeat1),                   /* 7(end) */
            Action::ShiftRepeat(ProdID::UnitRepeat1, StateID(6)),  /* 8(identifier) */
            Action::Recover,                                       /* 9(=) */
            Action::ShiftRepeat(ProdID::UnitRepeat1, StateID(11)), /* 10(\) */
            Action::Recover,                                       /* 11(->) */
            Action::ShiftRepeat(ProdID::UnitRepeat1, StateID(2)),  /* 12(integer) */
            Action::ShiftRepeat(ProdID::UnitRepeat1, StateID(7)),  /* 13(True) */
            Action::ShiftRepeat(ProdID::UnitRepeat1, StateID(7)),  /* 14(False) */
        ],
        /* STATE 3 */
        [
            Action::Error,                  /* 0(unit) */
            Action::Goto(StateID(8)),       /* 1(_expression) */
            Action::Goto(StateID(8)),       /* 2(binding) */
            Action::Goto(StateID(8)),       /* 3(lambda) */
            Action::Goto(StateID(8)),       /* 4(bool) */
            Action::Error,                  /* 5(unit_repeat1) */
            Action::Error,                  /* 6(lambda_repeat1) */
            Action::Error,                  /* 7(end) */
            Action::Shift(StateID(6)),      /* 8(identifier) */
            Action::Error,                  /* 9(=) */
            Action::Shift(StateID(11)),     /* 10(\) */
            Action::Error,                  /* 11(->) */
            Action::Shift(StateID(8)),      /* 12(integer) */
            Action::Shift(StateID(7)),      /* 13(True) */
            Action::Shift(StateID(7)),      /* 14(False) */
        ],
        /* STATE 4 */
        [
            Action::Error,                  /* 0(unit) */
            Action::Goto(StateID(9)),       /* 1(_expression) */
            Action::Goto(StateID(9)),       /* 2(binding) */
            Action::Goto(StateID(9)),       /* 3(lambda) */
            Action::Goto(StateID(9)),       /* 4(bool) */
            Action::Error,                  /* 5(unit_repeat1) */
            Action::Error,                  /* 6(lambda_repeat1) */
            Action::Error,                  /* 7(end) */
            Action::Shift(StateID(6)),      /* 8(identifier) */
            Action::Error,                  /* 9(=) */
            Action::Shift(StateID(11)),     /* 10(\) */
            Action::Error,                  /* 11(->) */
            Action::Shift(StateID(9)),      /* 12(integer) */
            Action::Shift(StateID(7)),      /* 13(True) */
            Action::Shift(StateID(7)),      /* 14(False) */
        ],
        /* STATE 5 */
        [
            Action::Error,                  /* 0(unit) */
            Action::Goto(StateID(10)),      /* 1(_expression) */
            Action::Goto(StateID(10)),      /* 2(binding) */
            Action::Goto(StateID(10)),      /* 3(lambda) */
            Action::Goto(StateID(10)),      /* 4(bool) */
            Action::Error,                  /* 5(unit_repeat1) */
            Action::Error,                  /* 6(lambda_repeat1) */
            Action::Error,                  /* 7(end) */
            Action::Shift(StateID(6)),      /* 8(identifier) */
            Action::Error,                  /* 9(=) */
            Action::Shift(StateID(11)),     /* 10(\) */
            Action::Error,                  /* 11(->) */
            Action::Shift(StateID(10)),     /* 12(integer) */
            Action::Shift(StateID(7)),      /* 13(True) */
            Action::Shift(StateID(7)),      /* 14(False) */
        ],
    ];

    const SMALL: &'static [&'static [(TokenID, Action)]] = &[
        /* STATE 6 */
        &[
            (TokenID::End, Action::Reduce(ProdID::Expression)),
            (TokenID::Ident, Action::Reduce(ProdID::Expression)),
            (TokenID::Eq, Action::Shift(StateID(4))),
            (TokenID::Backslash, Action::Reduce(ProdID::Expression)),
            (TokenID::Integer, Action::Reduce(ProdID::Expression)),
            (TokenID::True, Action::Reduce(ProdID::Expression)),
            (TokenID::False, Action::Reduce(ProdID::Expression)),
        ],
        /* STATE 7 */
        &[
            (TokenID::End, Action::Reduce(ProdID::Bool)),
            (TokenID::Ident, Action::Reduce(ProdID::Bool)),
            (TokenID::Backslash, Action::Reduce(ProdID::Bool)),
            (TokenID::Integer, Action::Reduce(ProdID::Bool)),
            (TokenID::True, Action::Reduce(ProdID::Bool)),
            (TokenID::False, Action::Reduce(ProdID::Bool)),
        ],
        /* STATE 8 */
        &[
            (TokenID::End, Action::Reduce(ProdID::Lambda1)),
            (TokenID::Ident, Action::Reduce(ProdID::Lambda1)),
            (TokenID::Backslash, Action::Reduce(ProdID::Lambda1)),
            (TokenID::Integer, Action::Reduce(ProdID::Lambda1)),
            (TokenID::True, Action::Reduce(ProdID::Lambda1)),
            (TokenID::False, Action::Reduce(ProdID::Lambda1)),
        ],
        /* STATE 9 */
        &[
            (TokenID::End, Action::Reduce(ProdID::Binding)),
            (TokenID::Ident, Action::Reduce(ProdID::Binding)),
            (TokenID::Backslash, Action::Reduce(ProdID::Binding)),
            (TokenID::Integer, Action::Reduce(ProdID::Binding)),
            (TokenID::True, Action::Reduce(ProdID::Binding)),
            (TokenID::False, Action::Reduce(ProdID::Binding)),
        ],
        /* STATE 10 */
        &[
            (TokenID::End, Action::Reduce(ProdID::Lambda2)),
            (TokenID::Ident, Action::Reduce(ProdID::Lambda2)),
            (TokenID::Backslash, Action::Reduce(ProdID::Lambda2)),
            (TokenID::Integer, Action::Reduce(ProdID::Lambda2)),
            (TokenID::True, Action::Reduce(ProdID::Lambda2)),
            (TokenID::False, Action::Reduce(ProdID::Lambda2)),
        ],
        /* STATE 11 */
        &[
            (TokenID::LambdaRepeat1, Action::Goto(StateID(13))),
            (TokenID::Ident, Action::Shift(StateID(12))),
        ],
        /* STATE 12 */
        &[
            (TokenID::Ident, Action::Shift(StateID(14))),
            (TokenID::Arrow, Action::Shift(StateID(3))),
        ],
        /* STATE 13 */
        &[
            (TokenID::Ident, Action::Shift(StateID(14))),
            (TokenID::Arrow, Action::Shift(StateID(5))),
        ],
        /* STATE 14 */
        &[
            (
                TokenID::Ident,
                Action::ShiftRepeat(ProdID::LambdaRepeat1, StateID(14)),
            ),
            (TokenID::Arrow, Action::Reduce(ProdID::LambdaRepeat1)),
        ],
        /* STATE 15 */
        &[(TokenID::End, Action::Accept)],
    ];
}

impl ParserData for ParData {
    type StateID = StateID;
    type TokenID = TokenID;
    type FieldID = FieldID;
    type ProdID = ProdID;

    #[inline]
    fn start_state() -> Self::StateID {
        StateID(0)
    }

    #[inline]
    fn lookup(state_id: StateID, token_id: TokenID) -> Action {
        let state = usize::from(state_id);
        if state < Self::LARGE_STATE_COUNT {
            return Self::LARGE[state][usize::from(token_id)];
        }
        Self::SMALL
            .get(state - Self::LARGE_STATE_COUNT)
            .and_then(|row| row.iter().find(|(t, _)| *t == token_id))
            .map_or(Action::Error, |(_, action)| *action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> impl Iterator<Item = StateID> {
        (0..StateID::COUNT as u8).map(StateID)
    }

    fn tokens() -> impl Iterator<Item = TokenID> {
        [
            TokenID::Unit,
            TokenID::Expression,
            TokenID::Binding,
            TokenID::Lambda,
            TokenID::Bool,
            TokenID::UnitRepeat1,
            TokenID::LambdaRepeat1,
            TokenID::End,
            TokenID::Ident,
            TokenID::Eq,
            TokenID::Backslash,
            TokenID::Arrow,
            TokenID::Integer,
            TokenID::True,
            TokenID::False,
        ]
        .into_iter()
    }

    #[test]
    fn table_shapes_agree() {
        assert_eq!(TokenID::LABELS.len(), TokenID::COUNT);
        assert_eq!(TokenID::VISIBILITY.len(), TokenID::COUNT);
        assert_eq!(ProdID::LABELS.len(), ProdID::COUNT);
        assert_eq!(ProdID::LHS_TOKENS.len(), ProdID::COUNT);
        assert_eq!(ProdID::SIZES.len(), ProdID::COUNT);
        assert_eq!(ProdID::FIELDS.len(), ProdID::COUNT);
        assert_eq!(
            ParData::LARGE.len() + ParData::SMALL.len(),
            StateID::COUNT
        );
    }

    #[test]
    fn gotos_only_on_nonterminals_and_shifts_only_on_terminals() {
        for s in states() {
            for t in tokens() {
                match ParData::lookup(s, t) {
                    Action::Goto(next) => {
                        assert!(!t.is_terminal(), "goto on {:?} in {:?}", t, s);
                        assert!(usize::from(next) < StateID::COUNT);
                    }
                    Action::Shift(next) | Action::ShiftRepeat(_, next) => {
                        assert!(t.is_terminal(), "shift on {:?} in {:?}", t, s);
                        assert!(usize::from(next) < StateID::COUNT);
                    }
                    Action::Reduce(_) | Action::Accept | Action::Recover => {
                        assert!(t.is_terminal());
                    }
                    Action::Error => {}
                }
            }
        }
    }

    #[test]
    fn recover_only_in_top_level_states() {
        for s in states() {
            for t in tokens() {
                if ParData::lookup(s, t) == Action::Recover {
                    assert!(usize::from(s) <= 2);
                    assert!(matches!(t, TokenID::Eq | TokenID::Arrow));
                }
            }
        }
    }

    #[test]
    fn field_indices_within_production() {
        for (p, fields) in ProdID::FIELDS.iter().enumerate() {
            for (_, i) in fields.iter() {
                assert!(*i < ProdID::SIZES[p]);
            }
        }
        assert_eq!(ProdID::Lambda1.fields().len(), 2);
        assert_eq!(ProdID::Lambda2.fields(), &[(FieldID::Body, 3)]);
        assert!(ProdID::Binding.fields().is_empty());
    }

    #[test]
    fn hidden_symbols() {
        for t in [
            TokenID::Expression,
            TokenID::UnitRepeat1,
            TokenID::LambdaRepeat1,
            TokenID::End,
        ] {
            assert!(!t.metadata().visible);
        }
        assert!(TokenID::Arrow.metadata().visible);
        assert!(!TokenID::Arrow.metadata().named);
        assert!(TokenID::Ident.metadata().named);
    }
}
