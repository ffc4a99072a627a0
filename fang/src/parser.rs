//! # Fang Parser
//!
//! [`FangParser`] couples the action tables in [`crate::parser_data`] with a
//! [`FangLexer`] and lets the [`fang_engine`] stack machine build the syntax
//! tree. There are no semantic actions: every reduction produces a tree node,
//! with hidden symbols spliced away, so the result of a parse is always a
//! single `unit` node ([`FangTree`]).
//!
//! `=` and `->` in a position where an expression must start are dropped
//! and recorded rather than aborting at once; the parse still fails with
//! the first such error, and all of them are available from
//! [`Parser::errors`].

use crate::error::FangError;
use crate::lexer::FangLexer;
use crate::parser_data::ParData;
use fang_engine::{ParseNode, Parser, ParserCtx};
use std::iter::FusedIterator;

/// Root of a fang syntax tree.
pub type FangTree = ParseNode<ParData>;

pub struct FangParser<I>
where
    I: FusedIterator<Item = u8>,
{
    ctx: ParserCtx<FangLexer<I>, <Self as Parser>::ParserData>,
}

impl<I> FangParser<I>
where
    I: FusedIterator<Item = u8>,
{
    pub fn try_new(input: I) -> Result<Self, FangError> {
        let lexer = FangLexer::try_new(input)?;
        let ctx = ParserCtx::new(lexer);
        Ok(Self { ctx })
    }
}

impl<I> Parser for FangParser<I>
where
    I: FusedIterator<Item = u8>,
{
    type Lexer = FangLexer<I>;
    type ParserData = ParData;

    fn ctx(&self) -> &ParserCtx<Self::Lexer, Self::ParserData> {
        &self.ctx
    }

    fn ctx_mut(&mut self) -> &mut ParserCtx<Self::Lexer, Self::ParserData> {
        &mut self.ctx
    }
}

/// Parses `source` into a `unit` tree.
pub fn parse(source: &str) -> Result<FangTree, FangError> {
    let mut parser = FangParser::try_new(source.bytes().fuse())?;
    let tree = parser.try_parse()?;
    log::debug!("parsed: {:?}", parser.stats());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_data::{FieldID, TokenID};
    use fang_engine::{EngineError, Lexer};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sexp(source: &str) -> String {
        parse(source).unwrap().to_sexp()
    }

    #[test]
    fn empty_unit() {
        init_logger();
        let tree = parse("").unwrap();
        assert_eq!(tree.kind(), TokenID::Unit);
        assert!(tree.children().is_empty());
        assert_eq!(sexp("  \n"), "(unit)");
    }

    #[test]
    fn atoms() {
        init_logger();
        assert_eq!(sexp("x"), "(unit (identifier))");
        assert_eq!(sexp("42"), "(unit (integer))");
        assert_eq!(sexp("False"), "(unit (bool))");
        assert_eq!(sexp("x 1 True"), "(unit (identifier) (integer) (bool))");
    }

    #[test]
    fn bindings_and_lambdas() {
        init_logger();
        assert_eq!(sexp("x = 5"), "(unit (binding (identifier) (integer)))");
        assert_eq!(
            sexp("\\x -> x"),
            "(unit (lambda bound: (identifier) body: (identifier)))"
        );
        assert_eq!(
            sexp("\\x y z -> 1"),
            "(unit (lambda (identifier) (identifier) (identifier) body: (integer)))"
        );
    }

    #[test]
    fn nesting() {
        init_logger();
        assert_eq!(
            sexp("f = \\x -> \\y -> True"),
            "(unit (binding (identifier) (lambda bound: (identifier) body: (lambda bound: (identifier) body: (bool)))))"
        );
        assert_eq!(
            sexp("\\x -> y = x"),
            "(unit (lambda bound: (identifier) body: (binding (identifier) (identifier))))"
        );
    }

    #[test]
    fn lambda_body_takes_one_expression() {
        init_logger();
        let tree = parse("\\x -> x 5").unwrap();
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[1].kind(), TokenID::Integer);
    }

    #[test]
    fn body_field_on_nested_lambda() {
        init_logger();
        let src = "\\a b -> \\c -> c";
        let tree = parse(src).unwrap();
        let outer = tree.child(0).unwrap();
        let inner = outer.child_by_field(FieldID::Body).unwrap();
        assert_eq!(inner.kind(), TokenID::Lambda);
        assert_eq!(inner.text(src), "\\c -> c");
        assert!(outer.child_by_field(FieldID::Bound).is_none());
    }

    #[test]
    fn missing_body_is_unexpected_end() {
        init_logger();
        let err = parse("x =").unwrap_err();
        assert!(matches!(
            err,
            FangError::Engine(EngineError::UnexpectedToken {
                state: 4,
                token: "end",
                ..
            })
        ));
    }

    #[test]
    fn recover_collects_every_stray_token() {
        init_logger();
        let mut parser = FangParser::try_new("= 1 -> 2".bytes().fuse()).unwrap();
        let err = parser.try_parse().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnexpectedToken {
                state: 0,
                token: "=",
                ..
            }
        ));
        let offsets: Vec<_> = parser.errors().iter().filter_map(|e| e.offset()).collect();
        assert_eq!(offsets, vec![0, 4]);
        assert_eq!(parser.stats().recoveries, 2);
    }

    #[test]
    fn lexical_error_surfaces_through_parser() {
        init_logger();
        let err = parse("x = 1_").unwrap_err();
        assert!(matches!(
            err,
            FangError::Engine(EngineError::Lexical {
                offset: 6,
                byte: None,
                ..
            })
        ));
    }

    #[test]
    fn stats_count_work() {
        init_logger();
        let mut parser = FangParser::try_new("a b c".bytes().fuse()).unwrap();
        parser.try_parse().unwrap();
        let stats = parser.stats();
        assert_eq!(stats.shifts, 3);
        assert_eq!(stats.tokens, 4);
        assert!(stats.reductions >= 6);
        assert!(parser.ctx().lexer.stats().chars >= 5);
    }
}
