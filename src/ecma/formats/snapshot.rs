//! Serializable view of a context tree.
//!
//!     Token ids are replaced by positions and text so the snapshot stands on its own and
//!     diffs readably.

use crate::ecma::structure::{ContextId, ContextKind, ContextTree};
use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRef {
    pub line: usize,
    pub column: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl TokenRef {
    fn new(chain: &TokenChain, id: TokenId) -> Self {
        let token = &chain[id];
        Self {
            line: token.line_number,
            column: token.start_index,
            kind: token.kind,
            text: token.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSnapshot {
    pub kind: ContextKind,
    pub start: TokenRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<TokenRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContextSnapshot>,
}

impl ContextSnapshot {
    /// Snapshot of the subtree under `id`.
    pub fn from_context(chain: &TokenChain, tree: &ContextTree, id: ContextId) -> Self {
        let context = &tree[id];
        Self {
            kind: context.kind,
            start: TokenRef::new(chain, context.start),
            end: context.end.map(|end| TokenRef::new(chain, end)),
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::from_context(chain, tree, child))
                .collect(),
        }
    }

    /// Nesting of kinds only, e.g. `root(statement(var(object_literal)))`.
    pub fn shape(&self) -> String {
        if self.children.is_empty() {
            return self.kind.to_string();
        }
        let children: Vec<String> = self.children.iter().map(Self::shape).collect();
        format!("{}({})", self.kind, children.join(" "))
    }
}

/// Snapshot of the whole tree.
pub fn snapshot(chain: &TokenChain, tree: &ContextTree) -> ContextSnapshot {
    ContextSnapshot::from_context(chain, tree, tree.root())
}

pub fn to_json(chain: &TokenChain, tree: &ContextTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&snapshot(chain, tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecma::lexing::tokenize;
    use crate::ecma::structure::build_contexts;

    #[test]
    fn test_shape_of_object_literal() {
        let chain = tokenize("var a = {b: 1, c: 2};").chain;
        let tree = build_contexts(&chain).unwrap();
        assert_eq!(
            snapshot(&chain, &tree).shape(),
            "root(statement(var(object_literal(literal_element literal_element))))"
        );
    }

    #[test]
    fn test_json_uses_positions() {
        let chain = tokenize("x;").chain;
        let tree = build_contexts(&chain).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&chain, &tree).unwrap()).unwrap();
        assert_eq!(json["kind"], "root");
        assert_eq!(json["children"][0]["kind"], "statement");
        assert_eq!(json["children"][0]["start"]["text"], "x");
        assert_eq!(json["children"][0]["end"]["kind"], "semicolon");
    }
}
