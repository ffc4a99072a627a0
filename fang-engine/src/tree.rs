//! Syntax tree produced by the parser.
//!
//! A [`Node`] is either a token [`Node::Leaf`] or a [`Node::Branch`] built by
//! a reduction. Nonterminals whose [`SymbolMetadata::visible`] flag is unset
//! (hidden choice symbols and auxiliary repetition symbols) exist only on the
//! parse stack: when a visible parent is built, their children are spliced
//! into the parent in place and field indices are remapped accordingly.
//! The finished tree therefore contains visible symbols only.

use crate::cursor::Span;
use crate::parser::{ParserFieldID, ParserTokenID};

/// Per-symbol display information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMetadata {
    pub name: &'static str,
    /// Appears in the finished tree.
    pub visible: bool,
    /// Addressable by a semantic name (`identifier`, `lambda`), as opposed to
    /// anonymous punctuation (`=`, `->`).
    pub named: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<K, F> {
    Leaf {
        kind: K,
        span: Span,
    },
    Branch {
        kind: K,
        span: Span,
        children: Vec<Node<K, F>>,
        /// `(field, index into children)`.
        fields: Vec<(F, usize)>,
    },
}

impl<K, F> Node<K, F>
where
    K: ParserTokenID,
    F: ParserFieldID,
{
    /// Builds the node for a reduction to `kind` over the popped `children`.
    ///
    /// `fields` index into `children` as popped. `empty_at` is the span used
    /// when nothing remains after splicing.
    pub fn build(kind: K, children: Vec<Self>, fields: &[(F, usize)], empty_at: Span) -> Self {
        let mut out: Vec<Self> = Vec::new();
        let mut out_fields: Vec<(F, usize)> = Vec::new();
        let mut starts = Vec::with_capacity(children.len());

        for mut child in children {
            starts.push(out.len());
            if child.is_leaf() || child.kind().metadata().visible {
                out.push(child);
                continue;
            }
            if let Node::Branch {
                children: inner,
                fields: inner_fields,
                ..
            } = &mut child
            {
                let base = out.len();
                out_fields.extend(inner_fields.drain(..).map(|(f, i)| (f, base + i)));
                if out.is_empty() {
                    out = std::mem::take(inner);
                } else {
                    out.append(inner);
                }
            }
        }

        out_fields.extend(
            fields
                .iter()
                .filter_map(|&(f, i)| starts.get(i).map(|&at| (f, at))),
        );

        let span = match (out.first(), out.last()) {
            (Some(first), Some(last)) => first.span().merge(&last.span()),
            _ => empty_at,
        };

        Node::Branch {
            kind,
            span,
            children: out,
            fields: out_fields,
        }
    }

    #[inline]
    pub fn kind(&self) -> K {
        match self {
            Node::Leaf { kind, .. } | Node::Branch { kind, .. } => *kind,
        }
    }

    #[inline]
    pub fn kind_label(&self) -> &'static str {
        self.kind().label()
    }

    #[inline]
    pub fn span(&self) -> Span {
        match self {
            Node::Leaf { span, .. } | Node::Branch { span, .. } => *span,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn is_named(&self) -> bool {
        self.kind().metadata().named
    }

    /// All children in source order; empty for a leaf.
    pub fn children(&self) -> &[Self] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Branch { children, .. } => children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children().get(index)
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Self> {
        self.children().iter().filter(|c| c.is_named())
    }

    /// Field attached to the child at `index`, if any.
    pub fn field_of(&self, index: usize) -> Option<F> {
        match self {
            Node::Leaf { .. } => None,
            Node::Branch { fields, .. } => {
                fields.iter().find(|(_, i)| *i == index).map(|(f, _)| *f)
            }
        }
    }

    pub fn child_by_field(&self, field: F) -> Option<&Self> {
        match self {
            Node::Leaf { .. } => None,
            Node::Branch {
                children, fields, ..
            } => fields
                .iter()
                .find(|(f, _)| *f == field)
                .and_then(|(_, i)| children.get(*i)),
        }
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<&Self> {
        match self {
            Node::Leaf { .. } => None,
            Node::Branch {
                children, fields, ..
            } => fields
                .iter()
                .find(|(f, _)| f.name() == name)
                .and_then(|(_, i)| children.get(*i)),
        }
    }

    /// Leaves in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => out.push(node),
                Node::Branch { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        out
    }

    /// Source text covered by this node.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span().range()).unwrap_or("")
    }

    /// S-expression of the named nodes, e.g. `(lambda bound: (identifier) body: (integer))`.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        // `None` closes the innermost open node.
        let mut stack: Vec<Option<(&Self, Option<F>)>> = vec![Some((self, None))];
        while let Some(item) = stack.pop() {
            let Some((node, field)) = item else {
                out.push(')');
                continue;
            };
            if !out.is_empty() {
                out.push(' ');
            }
            if let Some(field) = field {
                out.push_str(field.name());
                out.push_str(": ");
            }
            out.push('(');
            out.push_str(node.kind_label());
            stack.push(None);
            for (i, child) in node.children().iter().enumerate().rev() {
                if child.is_named() {
                    stack.push(Some((child, node.field_of(i))));
                }
            }
        }
        out
    }
}

/// Frees descendants from an explicit stack so that dropping a deeply
/// nested tree does not recurse.
impl<K, F> Drop for Node<K, F> {
    fn drop(&mut self) {
        let Node::Branch { children, .. } = self else {
            return;
        };
        if children.iter().all(|c| matches!(c, Node::Leaf { .. })) {
            return;
        }
        let mut stack = std::mem::take(children);
        while let Some(mut node) = stack.pop() {
            if let Node::Branch { children, .. } = &mut node {
                stack.append(children);
            }
        }
    }
}
