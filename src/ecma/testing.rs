//! Testing utilities for token chains and context trees
//!
//! # Guidelines
//!
//!     Tests should assert on the whole shape of a tree, not on node counts. Build the
//!     analysis once with [analyze], then either compare [Analyzed::shape] against the
//!     expected nesting or walk a single context with [ContextAssertion]:
//!
//! ```rust-example
//! let analyzed = analyze("var a = {b: 1};");
//! assert_eq!(analyzed.shape(), "root(statement(var(object_literal(literal_element))))");
//! analyzed
//!     .assert_context(analyzed.find_context(ContextKind::ObjectLiteral, 0))
//!     .starts_at("{")
//!     .ends_at("}")
//!     .has_children(&[ContextKind::LiteralElement]);
//! ```
//!
//!     The helpers panic with a readable message; they are meant for tests only.

use crate::ecma::formats::snapshot;
use crate::ecma::lexing::{tokenize, LexerMode};
use crate::ecma::structure::{build_contexts, ContextId, ContextKind, ContextTree, Metadata};
use crate::ecma::token::{TokenChain, TokenId, TokenKind};

/// A lexed and structured source.
#[derive(Debug, Clone)]
pub struct Analyzed {
    pub chain: TokenChain,
    pub tree: ContextTree,
    pub final_mode: LexerMode,
    /// Token of the structural parse error, if any. The tree is then partial.
    pub error_token: Option<TokenId>,
}

/// Lex and build contexts, keeping the partial tree on a parse error.
pub fn analyze(source: &str) -> Analyzed {
    let lexed = tokenize(source);
    let (tree, error_token) = match build_contexts(&lexed.chain) {
        Ok(tree) => (tree, None),
        Err(error) => {
            let token = error.token();
            (error.partial, Some(token))
        }
    };
    Analyzed {
        chain: lexed.chain,
        tree,
        final_mode: lexed.final_mode,
        error_token,
    }
}

impl Analyzed {
    /// The `n`th token (0-based) whose text is `text`.
    pub fn token(&self, text: &str, n: usize) -> TokenId {
        self.chain
            .iter()
            .filter(|(_, token)| token.text == text)
            .map(|(id, _)| id)
            .nth(n)
            .unwrap_or_else(|| panic!("no token #{n} with text {text:?}"))
    }

    pub fn metadata(&self, token: TokenId) -> &Metadata {
        self.tree
            .metadata(token)
            .unwrap_or_else(|| panic!("token {token} has no metadata"))
    }

    /// The `n`th context (0-based, start order) of `kind`.
    pub fn find_context(&self, kind: ContextKind, n: usize) -> ContextId {
        self.tree
            .find_all(kind)
            .get(n)
            .copied()
            .unwrap_or_else(|| panic!("no {kind} context #{n}"))
    }

    pub fn shape(&self) -> String {
        snapshot(&self.chain, &self.tree).shape()
    }

    /// Texts of the tokens of `kind`, in order.
    pub fn texts_of(&self, kind: TokenKind) -> Vec<&str> {
        self.chain
            .iter()
            .filter(|(_, token)| token.kind == kind)
            .map(|(_, token)| token.text.as_str())
            .collect()
    }

    pub fn assert_context(&self, id: ContextId) -> ContextAssertion<'_> {
        ContextAssertion { analyzed: self, id }
    }

    /// Every child lies within its parent and siblings do not overlap.
    ///
    /// Siblings may share a boundary token: a `)` ends a group and opens the implied
    /// block after it.
    pub fn assert_well_formed(&self) {
        assert_well_formed(&self.chain, &self.tree);
    }

    pub fn assert_balanced_pairs(&self) {
        assert_balanced_pairs(&self.chain, &self.tree);
    }

    /// Kinds of the contexts the pass closed at end of file, innermost first.
    pub fn closed_at_eof(&self) -> Vec<ContextKind> {
        self.tree
            .closed_at_eof()
            .iter()
            .map(|&id| self.tree.kind(id))
            .collect()
    }
}

pub fn assert_well_formed(chain: &TokenChain, tree: &ContextTree) {
    let roots: Vec<_> = tree.iter().filter(|(_, c)| c.parent.is_none()).collect();
    assert_eq!(roots.len(), 1, "exactly one root");
    assert_eq!(roots[0].1.kind, ContextKind::Root);

    let last = chain.last();
    for (id, context) in tree.iter() {
        let end = context.end.unwrap_or(last);
        assert!(context.start <= end, "{} starts after it ends", context.kind);
        if let Some(parent) = context.parent {
            let outer = &tree[parent];
            let outer_end = outer.end.unwrap_or(last);
            assert!(
                outer.start <= context.start && end <= outer_end,
                "{} at {} escapes its parent {}",
                context.kind,
                context.start,
                outer.kind
            );
        }
        let children = tree.children(id);
        for pair in children.windows(2) {
            let (previous, next) = (&tree[pair[0]], &tree[pair[1]]);
            let previous_end = previous.end.unwrap_or(last);
            assert!(
                next.start >= previous_end,
                "{} at {} overlaps its sibling {}",
                next.kind,
                next.start,
                previous.kind
            );
        }
    }
}

/// Every closing bracket, paren, brace or parameter list closed the context its opener
/// started. Not meant for sources with a `switch`, whose closing brace ends the switch.
pub fn assert_balanced_pairs(chain: &TokenChain, tree: &ContextTree) {
    for (id, token) in chain.iter().take(tree.annotated_len()) {
        let opener = match token.kind {
            TokenKind::EndParen => TokenKind::StartParen,
            TokenKind::EndBracket => TokenKind::StartBracket,
            TokenKind::EndBlock => TokenKind::StartBlock,
            TokenKind::EndParameters => TokenKind::StartParameters,
            _ => continue,
        };
        let closed = tree
            .context_of(id)
            .unwrap_or_else(|| panic!("token {id} has no context"));
        let start = &chain[tree[closed].start];
        assert_eq!(
            start.kind, opener,
            "{:?} at line {} closed a {} opened by {:?}",
            token.text, token.line_number, tree[closed].kind, start.text
        );
    }
}

/// Fluent checks on one context.
pub struct ContextAssertion<'a> {
    analyzed: &'a Analyzed,
    id: ContextId,
}

impl<'a> ContextAssertion<'a> {
    pub fn is_kind(self, kind: ContextKind) -> Self {
        assert_eq!(self.analyzed.tree.kind(self.id), kind);
        self
    }

    pub fn starts_at(self, text: &str) -> Self {
        let start = self.analyzed.tree[self.id].start;
        assert_eq!(self.analyzed.chain[start].text, text, "start of {}", self.kind());
        self
    }

    pub fn ends_at(self, text: &str) -> Self {
        let end = self.analyzed.tree[self.id]
            .end
            .unwrap_or_else(|| panic!("{} was never closed", self.kind()));
        assert_eq!(self.analyzed.chain[end].text, text, "end of {}", self.kind());
        self
    }

    pub fn has_parent(self, kind: ContextKind) -> Self {
        assert_eq!(self.analyzed.tree.parent_kind(self.id), Some(kind));
        self
    }

    pub fn has_children(self, kinds: &[ContextKind]) -> Self {
        let actual: Vec<_> = self
            .analyzed
            .tree
            .children(self.id)
            .iter()
            .map(|&child| self.analyzed.tree.kind(child))
            .collect();
        assert_eq!(actual, kinds, "children of {}", self.kind());
        self
    }

    fn kind(&self) -> ContextKind {
        self.analyzed.tree.kind(self.id)
    }
}
