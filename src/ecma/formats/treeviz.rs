//! Treeviz formatter for context trees
//!
//! One line per context, nesting drawn with the same connectors as a file tree, 2 columns
//! per level. The root itself is not printed; its children are the top level lines.
//!
//! So the format is :
//! <prefix><connector> <kind>: <label>
//!
//! The label is the source text the context covers on its first line, truncated to 30
//! characters. Example:
//!
//!     └─ statement: var a = {b: 1};
//!       └─ var: var a = {b: 1};
//!         └─ object_literal: {b: 1}
//!           └─ literal_element: : 1}

use crate::ecma::structure::{ContextId, ContextTree};
use crate::ecma::token::TokenChain;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(chain: &TokenChain, tree: &ContextTree) -> String {
    let mut result = String::new();
    append_children(&mut result, chain, tree, tree.root(), "");
    result
}

fn append_children(
    result: &mut String,
    chain: &TokenChain,
    tree: &ContextTree,
    parent: ContextId,
    prefix: &str,
) {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_context(result, chain, tree, child, prefix, is_last);
    }
}

fn append_context(
    result: &mut String,
    chain: &TokenChain,
    tree: &ContextTree,
    id: ContextId,
    prefix: &str,
    is_last: bool,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&label(chain, tree, id), 30);
    result.push_str(&format!("{}{} {}: {}\n", prefix, connector, tree.kind(id), label));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, chain, tree, id, &new_prefix);
}

/// Text of the context's tokens on its start line, trimmed.
fn label(chain: &TokenChain, tree: &ContextTree, id: ContextId) -> String {
    let context = &tree[id];
    let line = chain[context.start].line_number;
    let end = context.end.unwrap_or(context.start);
    let mut text = String::new();
    let mut current = Some(context.start);
    while let Some(token) = current.filter(|&token| token <= end) {
        if chain[token].line_number != line {
            break;
        }
        text.push_str(&chain[token].text);
        current = chain.next(token);
    }
    text.trim().to_string()
}
