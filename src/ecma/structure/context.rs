//! Contexts and the arena that holds them.

use super::metadata::Metadata;
use crate::ecma::token::TokenId;
use serde::Serialize;
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Root,
    Block,
    CaseBlock,
    ForGroupBlock,
    ImpliedBlock,
    Index,
    ArrayLiteral,
    ObjectLiteral,
    LiteralElement,
    TernaryTrue,
    TernaryFalse,
    Switch,
    Comment,
    Doc,
    Statement,
    Group,
    Parameters,
    Var,
}

impl ContextKind {
    /// Contexts that directly hold statements.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            ContextKind::Root
                | ContextKind::Block
                | ContextKind::CaseBlock
                | ContextKind::ForGroupBlock
                | ContextKind::ImpliedBlock
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContextKind::Root => "root",
            ContextKind::Block => "block",
            ContextKind::CaseBlock => "case_block",
            ContextKind::ForGroupBlock => "for_group_block",
            ContextKind::ImpliedBlock => "implied_block",
            ContextKind::Index => "index",
            ContextKind::ArrayLiteral => "array_literal",
            ContextKind::ObjectLiteral => "object_literal",
            ContextKind::LiteralElement => "literal_element",
            ContextKind::TernaryTrue => "ternary_true",
            ContextKind::TernaryFalse => "ternary_false",
            ContextKind::Switch => "switch",
            ContextKind::Comment => "comment",
            ContextKind::Doc => "doc",
            ContextKind::Statement => "statement",
            ContextKind::Group => "group",
            ContextKind::Parameters => "parameters",
            ContextKind::Var => "var",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContextId(pub(crate) usize);

impl ContextId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the structural nesting tree, spanning `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub kind: ContextKind,
    pub start: TokenId,
    /// Set once when the context is popped.
    pub end: Option<TokenId>,
    pub parent: Option<ContextId>,
    /// In start order.
    pub children: Vec<ContextId>,
}

/// Everything the structural pass learns about a file: the context tree and the per-token
/// metadata.
#[derive(Debug, Clone)]
pub struct ContextTree {
    pub(crate) contexts: Vec<Context>,
    pub(crate) metadata: Vec<Metadata>,
    pub(crate) closed_at_eof: Vec<ContextId>,
}

impl ContextTree {
    pub(crate) fn new(first: TokenId) -> Self {
        Self {
            contexts: vec![Context {
                kind: ContextKind::Root,
                start: first,
                end: None,
                parent: None,
                children: Vec::new(),
            }],
            metadata: Vec::new(),
            closed_at_eof: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, kind: ContextKind, start: TokenId, parent: ContextId) -> ContextId {
        let id = ContextId(self.contexts.len());
        self.contexts.push(Context {
            kind,
            start,
            end: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.contexts[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> ContextId {
        ContextId(0)
    }

    pub fn get(&self, id: ContextId) -> &Context {
        &self.contexts[id.0]
    }

    pub fn kind(&self, id: ContextId) -> ContextKind {
        self.contexts[id.0].kind
    }

    pub fn parent(&self, id: ContextId) -> Option<ContextId> {
        self.contexts[id.0].parent
    }

    pub fn parent_kind(&self, id: ContextId) -> Option<ContextKind> {
        self.parent(id).map(|parent| self.kind(parent))
    }

    pub fn children(&self, id: ContextId) -> &[ContextId] {
        &self.contexts[id.0].children
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// All contexts in creation (start) order.
    pub fn iter(&self) -> impl Iterator<Item = (ContextId, &Context)> {
        self.contexts.iter().enumerate().map(|(i, c)| (ContextId(i), c))
    }

    /// Ids of all contexts of `kind`, in start order.
    pub fn find_all(&self, kind: ContextKind) -> Vec<ContextId> {
        self.iter()
            .filter(|(_, context)| context.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Ancestors of `id`, nearest first, excluding `id`.
    pub fn ancestors(&self, id: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    pub fn metadata(&self, token: TokenId) -> Option<&Metadata> {
        self.metadata.get(token.index())
    }

    /// The context a token was assigned to.
    pub fn context_of(&self, token: TokenId) -> Option<ContextId> {
        self.metadata(token).map(|meta| meta.context)
    }

    /// Number of tokens that received metadata. Smaller than the chain after a parse error.
    pub fn annotated_len(&self) -> usize {
        self.metadata.len()
    }

    /// Contexts still open at the end of the file, closed there by the pass itself
    /// (root excluded), innermost first.
    pub fn closed_at_eof(&self) -> &[ContextId] {
        &self.closed_at_eof
    }
}

impl Index<ContextId> for ContextTree {
    type Output = Context;

    fn index(&self, id: ContextId) -> &Context {
        self.get(id)
    }
}
