//! # Fang Lexer
//!
//! [`FangLexer`] drives the table-driven scanner from [`fang_engine`] over the
//! tables in [`crate::lexer_data`] and turns each matched rule into a
//! [`FangToken`]. Whitespace is dropped. Identifier lexemes are run through
//! the keyword table, so `True` and `False` come out as their own token
//! kinds while `true` or `Truex` stay identifiers.
//!
//! Tokens carry only a kind and a [`Span`]; the text is recovered from the
//! source with [`FangToken::text`].

use crate::error::FangError;
use crate::lexer_data::{LexData, Rule};
use crate::parser_data::TokenID;
use fang_engine::{EngineError, Lexer, LexerCtx, LexerData, Span, Token};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FangToken {
    pub token_id: TokenID,
    pub span: Span,
}

impl Token for FangToken {
    type TokenID = TokenID;

    fn token_id(&self) -> Self::TokenID {
        self.token_id
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl FangToken {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.range()).unwrap_or("")
    }
}

pub struct FangLexer<I>
where
    I: FusedIterator<Item = u8>,
{
    ctx: LexerCtx<I, <Self as Lexer>::LexerData, <Self as Lexer>::Token>,
}

impl<I> FangLexer<I>
where
    I: FusedIterator<Item = u8>,
{
    pub fn try_new(input: I) -> Result<Self, FangError> {
        let ctx = LexerCtx::try_new(input)?;
        Ok(Self { ctx })
    }
}

impl<I> Lexer for FangLexer<I>
where
    I: FusedIterator<Item = u8>,
{
    type Input = I;
    type LexerData = LexData;
    type Token = FangToken;

    fn ctx(&self) -> &LexerCtx<Self::Input, Self::LexerData, Self::Token> {
        &self.ctx
    }

    fn ctx_mut(&mut self) -> &mut LexerCtx<Self::Input, Self::LexerData, Self::Token> {
        &mut self.ctx
    }

    fn action(&mut self, rule: <Self::LexerData as LexerData>::LexerRule) -> Result<(), EngineError> {
        let token_id = match rule {
            Rule::Whitespace => {
                self.ctx_mut().clear();
                return Ok(());
            }
            Rule::Eq => TokenID::Eq,
            Rule::Backslash => TokenID::Backslash,
            Rule::Arrow => TokenID::Arrow,
            Rule::Integer => TokenID::Integer,
            Rule::Ident => match self.ctx().keyword()? {
                Some(0) => TokenID::True,
                Some(1) => TokenID::False,
                _ => TokenID::Ident,
            },
            Rule::End => TokenID::End,
        };
        let span = self.ctx().span();
        self.ctx_mut().yield_token(FangToken { token_id, span });
        Ok(())
    }
}

/// Lexes all of `source`. The last token is always [`TokenID::End`].
pub fn tokenize(source: &str) -> Result<Vec<FangToken>, FangError> {
    let mut lexer = FangLexer::try_new(source.bytes().fuse())?;
    let mut tokens = Vec::new();
    while let Some(token) = lexer.try_next()? {
        tokens.push(token);
    }
    log::debug!("lexed {} tokens: {:?}", tokens.len(), lexer.stats());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ids(source: &str) -> Vec<TokenID> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.token_id)
            .collect()
    }

    #[test]
    fn punctuation_and_arrow() {
        init_logger();
        assert_eq!(
            ids("\\x -> x = y"),
            vec![
                TokenID::Backslash,
                TokenID::Ident,
                TokenID::Arrow,
                TokenID::Ident,
                TokenID::Eq,
                TokenID::Ident,
                TokenID::End,
            ]
        );
    }

    #[test]
    fn minus_starts_integer_unless_arrow() {
        init_logger();
        let src = "-12 ->-3";
        let toks = tokenize(src).unwrap();
        let texts: Vec<_> = toks.iter().map(|t| t.text(src)).collect();
        assert_eq!(texts, vec!["-12", "->", "-3", ""]);
        assert_eq!(toks[0].token_id, TokenID::Integer);
        assert_eq!(toks[1].token_id, TokenID::Arrow);
    }

    #[test]
    fn identifiers_may_lead_with_one_underscore() {
        init_logger();
        let toks = ids("_x x_1 x__");
        assert_eq!(toks.len(), 4);
        assert!(toks[..3].iter().all(|t| *t == TokenID::Ident));
        let err = tokenize("__x").unwrap_err();
        assert!(matches!(
            err,
            FangError::Engine(EngineError::Lexical {
                offset: 1,
                byte: Some(b'_'),
                ..
            })
        ));
    }

    #[test]
    fn keywords_need_whole_lexeme() {
        init_logger();
        assert_eq!(
            ids("True Truex False _True"),
            vec![
                TokenID::True,
                TokenID::Ident,
                TokenID::False,
                TokenID::Ident,
                TokenID::End
            ]
        );
    }

    #[test]
    fn spans_across_lines() {
        init_logger();
        let toks = tokenize("x\n\t= 1").unwrap();
        assert_eq!(toks[1].span.start.line, 1);
        assert_eq!(toks[1].span.start.column, 1);
        assert_eq!(toks[2].span.range(), 5..6);
        assert_eq!(toks[3].span.range(), 6..6);
    }

    #[test]
    fn unknown_byte_is_lexical_error() {
        init_logger();
        let err = tokenize("x @").unwrap_err();
        assert_eq!(err.span().map(|s| s.start.offset), Some(2));
        assert!(matches!(
            err,
            FangError::Engine(EngineError::Lexical {
                offset: 2,
                byte: Some(b'@'),
                ..
            })
        ));
    }

    #[test]
    fn lone_minus_is_lexical_error() {
        init_logger();
        assert!(matches!(
            tokenize("- 1"),
            Err(FangError::Engine(EngineError::Lexical {
                offset: 1,
                byte: Some(b' '),
                ..
            }))
        ));
    }
}
