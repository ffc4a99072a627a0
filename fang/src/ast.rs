//! # Typed AST
//!
//! [`lower`] walks a [`FangTree`] and produces owned, typed values: integer
//! literals are read (with `_` separators removed), booleans become `bool`
//! and identifiers carry their text. Lambda parameters are collected from
//! the positional identifiers between `\` and `->`, which covers the
//! multi-parameter form where only `body` is a field.
//!
//! Lowering recurses, so nesting deeper than [`MAX_DEPTH`] is rejected with
//! [`FangError::TooDeep`]. The syntax tree itself has no such limit.

use crate::error::FangError;
use crate::parser::FangTree;
use crate::parser_data::{FieldID, TokenID};
use fang_engine::Span;
use smartstring::alias::String;

/// Deepest expression nesting [`lower`] accepts.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub exprs: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Integer {
        value: i64,
        span: Span,
    },
    Bool {
        value: bool,
        span: Span,
    },
    Ident(Ident),
    Binding {
        name: Ident,
        value: Box<Expr>,
        span: Span,
    },
    Lambda {
        params: Vec<Ident>,
        body: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Integer { span, .. }
            | Expr::Bool { span, .. }
            | Expr::Binding { span, .. }
            | Expr::Lambda { span, .. } => *span,
            Expr::Ident(ident) => ident.span,
        }
    }
}

/// Lowers a parsed `unit` tree; `source` is the text it was parsed from.
pub fn lower(tree: &FangTree, source: &str) -> Result<Unit, FangError> {
    if tree.kind() != TokenID::Unit {
        return Err(unexpected(tree));
    }
    let exprs = tree
        .children()
        .iter()
        .map(|child| lower_expr(child, source, 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Unit {
        exprs,
        span: tree.span(),
    })
}

fn lower_expr(node: &FangTree, source: &str, depth: usize) -> Result<Expr, FangError> {
    let span = node.span();
    if depth > MAX_DEPTH {
        return Err(FangError::TooDeep {
            limit: MAX_DEPTH,
            span,
        });
    }
    match node.kind() {
        TokenID::Integer => {
            let text = node.text(source);
            let digits: std::string::String = text.chars().filter(|c| *c != '_').collect();
            let value = digits.parse::<i64>().map_err(|e| FangError::Integer {
                text: text.into(),
                span,
                source: e,
            })?;
            Ok(Expr::Integer { value, span })
        }
        TokenID::Ident => Ok(Expr::Ident(lower_ident(node, source)?)),
        TokenID::Bool => {
            let value = match node.child(0).map(|c| c.kind()) {
                Some(TokenID::True) => true,
                Some(TokenID::False) => false,
                _ => return Err(unexpected(node)),
            };
            Ok(Expr::Bool { value, span })
        }
        TokenID::Binding => {
            let mut named = node.named_children();
            let (Some(name), Some(value)) = (named.next(), named.next()) else {
                return Err(unexpected(node));
            };
            Ok(Expr::Binding {
                name: lower_ident(name, source)?,
                value: Box::new(lower_expr(value, source, depth + 1)?),
                span,
            })
        }
        TokenID::Lambda => {
            let params = node
                .children()
                .iter()
                .skip(1)
                .take_while(|c| c.kind() != TokenID::Arrow)
                .map(|c| lower_ident(c, source))
                .collect::<Result<Vec<_>, _>>()?;
            let body = node
                .child_by_field(FieldID::Body)
                .ok_or_else(|| unexpected(node))?;
            Ok(Expr::Lambda {
                params,
                body: Box::new(lower_expr(body, source, depth + 1)?),
                span,
            })
        }
        _ => Err(unexpected(node)),
    }
}

fn lower_ident(node: &FangTree, source: &str) -> Result<Ident, FangError> {
    if node.kind() != TokenID::Ident {
        return Err(unexpected(node));
    }
    Ok(Ident {
        name: node.text(source).into(),
        span: node.span(),
    })
}

fn unexpected(node: &FangTree) -> FangError {
    FangError::UnexpectedNode {
        kind: node.kind_label(),
        span: node.span(),
    }
}
