//! Language specific parts of the tracker.
//!
//!     What counts as "top level" and how a `{` is classified differ between dialects. A
//!     [Dialect] is chosen when the tracker is built; there is no fallback implementation.

use super::state::{BlockType, ScopeState};
use crate::ecma::navigation::is_scope_wrapper_block;
use crate::ecma::structure::{ContextKind, ContextTree};
use crate::ecma::token::{TokenChain, TokenId, TokenKind};

pub const DEFAULT_SCOPE_WRAPPER: &str = "goog.scope";

pub trait Dialect {
    /// Called before the generic tracker sees `token`.
    fn handle_token(&mut self, chain: &TokenChain, token: TokenId, state: &ScopeState);

    /// Whether declarations at the current position are documentation targets.
    fn in_top_level(&self, state: &ScopeState) -> bool;

    /// Classify the `{` at `token`.
    fn block_type(&self, tree: &ContextTree, token: TokenId) -> BlockType;
}

/// JavaScript with a scope-aliasing wrapper, `goog.scope(function() { ... });` by default.
///
/// Code inside the wrapper is treated as top level: the scope depth counts open wrappers
/// and is compared with the parenthesis depth.
#[derive(Debug, Clone)]
pub struct JavaScript {
    scope_wrapper: String,
    scope_depth: usize,
    block_stack: Vec<TokenId>,
}

impl JavaScript {
    pub fn new(scope_wrapper: impl Into<String>) -> Self {
        Self {
            scope_wrapper: scope_wrapper.into(),
            scope_depth: 0,
            block_stack: Vec::new(),
        }
    }

    pub fn scope_wrapper(&self) -> &str {
        &self.scope_wrapper
    }

    pub fn scope_depth(&self) -> usize {
        self.scope_depth
    }
}

impl Default for JavaScript {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE_WRAPPER)
    }
}

impl Dialect for JavaScript {
    fn handle_token(&mut self, chain: &TokenChain, token: TokenId, _state: &ScopeState) {
        let current = &chain[token];
        match current.kind {
            TokenKind::StartBlock => self.block_stack.push(token),
            TokenKind::Identifier if current.text == self.scope_wrapper => self.scope_depth += 1,
            TokenKind::EndBlock => {
                if let Some(start) = self.block_stack.pop() {
                    if is_scope_wrapper_block(chain, start, &self.scope_wrapper) {
                        self.scope_depth = self.scope_depth.saturating_sub(1);
                    }
                }
            }
            _ => {}
        }
    }

    fn in_top_level(&self, state: &ScopeState) -> bool {
        self.scope_depth == state.paren_depth()
    }

    fn block_type(&self, tree: &ContextTree, token: TokenId) -> BlockType {
        match tree.context_of(token).map(|context| tree.kind(context)) {
            Some(ContextKind::ObjectLiteral) => BlockType::ObjectLiteral,
            _ => BlockType::Code,
        }
    }
}
