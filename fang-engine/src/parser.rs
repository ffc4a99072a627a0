use crate::cursor::Span;
use crate::error::EngineError;
use crate::lexer::{Lexer, Token};
use crate::tree::{Node, SymbolMetadata};
use smartstring::alias::String;
use std::fmt::Debug;

/// One cell of the action table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserAction<US, UP>
where
    US: ParserStateID,
    UP: ParserProdID,
{
    /// No entry: the lookahead is rejected.
    Error,
    /// Record the lookahead as unexpected, drop it and retry the same state.
    Recover,
    Accept,
    Shift(US),
    Reduce(UP),
    /// Reduce the open repetition `UP`, then shift the lookahead to `US`.
    ShiftRepeat(UP, US),
    /// Successor state after reducing to a nonterminal.
    Goto(US),
}

pub trait ParserStateID: Copy + Debug + Eq + Into<usize> {
    const COUNT: usize;
}

pub trait ParserTokenID: Copy + Debug + Eq + Into<usize> {
    const COUNT_NONTERMINALS: usize;
    const COUNT_TERMINALS: usize;
    const COUNT: usize;

    fn label(&self) -> &'static str;
    fn metadata(&self) -> SymbolMetadata;
}

pub trait ParserFieldID: Copy + Debug + Eq + Into<usize> + 'static {
    const COUNT: usize;

    fn name(&self) -> &'static str;
}

pub trait ParserProdID: Copy + Debug + Eq + Into<usize> {
    type TokenID: ParserTokenID;
    type FieldID: ParserFieldID;

    const COUNT: usize;

    fn label(&self) -> &'static str;
    fn lhs_token_id(&self) -> Self::TokenID;
    /// Number of stack entries the production pops.
    fn size(&self) -> usize;
    /// `(field, child index)` pairs, indices counted over the popped entries.
    fn fields(&self) -> &'static [(Self::FieldID, usize)];
}

type Action<P> = ParserAction<
    <<P as Parser>::ParserData as ParserData>::StateID,
    <<P as Parser>::ParserData as ParserData>::ProdID,
>;

/// Syntax tree node type produced by a parser over `D`.
pub type ParseNode<D> = Node<<D as ParserData>::TokenID, <D as ParserData>::FieldID>;

pub trait ParserData {
    type StateID: ParserStateID;
    type TokenID: ParserTokenID;
    type FieldID: ParserFieldID;
    type ProdID: ParserProdID<TokenID = Self::TokenID, FieldID = Self::FieldID>;

    fn start_state() -> Self::StateID;

    fn lookup(
        state_id: Self::StateID,
        token_id: Self::TokenID,
    ) -> ParserAction<Self::StateID, Self::ProdID>;
}

pub trait Parser {
    type Lexer: Lexer<Token: Token<TokenID = <Self::ParserData as ParserData>::TokenID>>;
    type ParserData: ParserData;

    fn ctx(&self) -> &ParserCtx<Self::Lexer, Self::ParserData>;
    fn ctx_mut(&mut self) -> &mut ParserCtx<Self::Lexer, Self::ParserData>;

    fn stats(&self) -> ParserStats {
        self.ctx().stats.clone()
    }

    /// Every error recorded by the last parse, in input order.
    fn errors(&self) -> &[EngineError] {
        &self.ctx().errors
    }

    /// Pops `prod_id.size()` entries and pushes the node they reduce to.
    ///
    /// An empty production gets an empty span at the lookahead.
    fn reduce(
        &mut self,
        prod_id: <Self::ParserData as ParserData>::ProdID,
        lookahead: &<Self::Lexer as Lexer>::Token,
    ) -> Result<(), EngineError> {
        let size = prod_id.size();
        let ctx = self.ctx_mut();
        if ctx.nodes.len() < size || ctx.states.len() <= size {
            return Err(EngineError::StackUnderflow);
        }
        let children = ctx.nodes.split_off(ctx.nodes.len() - size);
        ctx.states.truncate(ctx.states.len() - size);
        let node = Node::build(
            prod_id.lhs_token_id(),
            children,
            prod_id.fields(),
            Span::empty(lookahead.span().start),
        );
        ctx.nodes.push(node);
        ctx.stats.reductions += 1;
        Ok(())
    }

    /// Runs the automaton over the whole token stream.
    ///
    /// On success returns the single root node. If any token was dropped by
    /// a `Recover` entry, the first recorded error is returned instead, even
    /// if the parse went on to accept.
    fn try_parse(&mut self) -> Result<ParseNode<Self::ParserData>, EngineError> {
        {
            let ctx = self.ctx_mut();
            ctx.nodes.clear();
            ctx.states.clear();
            ctx.errors.clear();
        }
        let mut state = <Self as Parser>::ParserData::start_state();
        self.ctx_mut().states.push(state);
        let mut token = self.next_token()?;
        if log::log_enabled!(log::Level::Trace) {
            self.ctx().dump_state(&token);
        }
        loop {
            match <Self as Parser>::ParserData::lookup(state, token.token_id()) {
                Action::<Self>::Shift(new_state) => {
                    log::trace!("Shift {:?}", new_state);
                    state = self.shift(token, new_state);
                    token = self.next_token()?;
                }

                Action::<Self>::Reduce(prod_id) => {
                    log::trace!("Reduce {:?}({})", prod_id, prod_id.label());
                    self.reduce(prod_id, &token)?;
                    state = self.goto(prod_id)?;
                }

                Action::<Self>::ShiftRepeat(prod_id, new_state) => {
                    log::trace!("ShiftRepeat {:?}({}) {:?}", prod_id, prod_id.label(), new_state);
                    self.reduce(prod_id, &token)?;
                    self.goto(prod_id)?;
                    state = self.shift(token, new_state);
                    token = self.next_token()?;
                }

                Action::<Self>::Accept => {
                    log::trace!("Accept");
                    let ctx = self.ctx_mut();
                    if ctx.nodes.len() != 1 {
                        return Err(EngineError::ParserTable(
                            format!("accepted with {} nodes on the stack", ctx.nodes.len()).into(),
                        ));
                    }
                    if let Some(first) = ctx.errors.first() {
                        return Err(first.clone());
                    }
                    return ctx.nodes.pop().ok_or(EngineError::StackUnderflow);
                }

                Action::<Self>::Recover => {
                    let err = self.unexpected(state, &token);
                    log::warn!("recovering: {}", err);
                    let ctx = self.ctx_mut();
                    ctx.errors.push(err);
                    ctx.stats.recoveries += 1;
                    token = self.next_token()?;
                }

                Action::<Self>::Error => {
                    let err = self.unexpected(state, &token);
                    return Err(self.ctx_mut().fail(err));
                }

                Action::<Self>::Goto(_) => {
                    return Err(EngineError::ParserTable(
                        format!(
                            "goto on terminal {:?} in state {:?}",
                            token.token_id().label(),
                            state
                        )
                        .into(),
                    ));
                }
            }

            if log::log_enabled!(log::Level::Trace) {
                self.ctx().dump_state(&token);
            }
        }
    }

    #[doc(hidden)]
    fn shift(
        &mut self,
        token: <Self::Lexer as Lexer>::Token,
        new_state: <Self::ParserData as ParserData>::StateID,
    ) -> <Self::ParserData as ParserData>::StateID {
        let ctx = self.ctx_mut();
        ctx.nodes.push(Node::Leaf {
            kind: token.token_id(),
            span: token.span(),
        });
        ctx.states.push(new_state);
        ctx.stats.shifts += 1;
        new_state
    }

    #[doc(hidden)]
    fn goto(
        &mut self,
        prod_id: <Self::ParserData as ParserData>::ProdID,
    ) -> Result<<Self::ParserData as ParserData>::StateID, EngineError> {
        let top = *self
            .ctx()
            .states
            .last()
            .ok_or(EngineError::StackUnderflow)?;
        let lhs = prod_id.lhs_token_id();
        let Action::<Self>::Goto(new_state) = <Self as Parser>::ParserData::lookup(top, lhs) else {
            return Err(EngineError::ParserTable(
                format!("no goto from state {:?} on {:?}", top, lhs.label()).into(),
            ));
        };
        log::trace!("Goto {:?}", new_state);
        self.ctx_mut().states.push(new_state);
        Ok(new_state)
    }

    #[doc(hidden)]
    fn next_token(&mut self) -> Result<<Self::Lexer as Lexer>::Token, EngineError> {
        self.ctx_mut().stats.tokens += 1;
        match self.ctx_mut().lexer.try_next() {
            Ok(Some(t)) => Ok(t),
            Ok(None) => Err(EngineError::ParserTable(
                String::from("token stream ended without an end marker"),
            )),
            Err(e) => Err(self.ctx_mut().fail(e)),
        }
    }

    #[doc(hidden)]
    fn unexpected(
        &self,
        state: <Self::ParserData as ParserData>::StateID,
        token: &<Self::Lexer as Lexer>::Token,
    ) -> EngineError {
        EngineError::UnexpectedToken {
            state: state.into(),
            token: token.token_id().label(),
            span: token.span(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    pub recoveries: usize,
}

pub struct ParserCtx<L, D>
where
    L: Lexer,
    D: ParserData,
{
    pub lexer: L,
    pub nodes: Vec<ParseNode<D>>,
    pub states: Vec<D::StateID>,
    pub stats: ParserStats,
    pub errors: Vec<EngineError>,
}

impl<L, D> ParserCtx<L, D>
where
    L: Lexer,
    D: ParserData,
{
    pub fn new(lexer: L) -> Self {
        Self {
            lexer,
            nodes: Vec::new(),
            states: Vec::new(),
            stats: ParserStats::default(),
            errors: Vec::new(),
        }
    }

    /// Records `err` and returns the first error of this parse.
    fn fail(&mut self, err: EngineError) -> EngineError {
        self.errors.push(err);
        self.errors[0].clone()
    }

    pub fn dump_state(&self, incoming: &L::Token) {
        let mut output = String::new();
        for (i, state) in self.states.iter().enumerate() {
            output.push_str(&format!("<{:?}>  ", state));
            if let Some(node) = self.nodes.get(i) {
                output.push_str(&format!("{}  ", node.kind().label()));
            }
        }
        output.push_str(&format!("<-  {:?}", incoming));
        log::trace!("{}", output);
    }
}
