use super::doc_comment::DocCommentId;
use crate::ecma::token::TokenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) usize);

impl FunctionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A function literal or declaration seen by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Dotted name, empty for anonymous functions.
    pub name: String,
    /// Block depth at the `function` keyword. The body is one deeper.
    pub block_depth: usize,
    /// Assigned with `=`, `||`, `&&` or a `:` outside an object literal.
    pub is_assigned: bool,
    pub doc: Option<DocCommentId>,
    pub is_constructor: bool,
    pub is_interface: bool,
    /// Declared parameter names, type annotations stripped.
    pub parameters: Vec<String>,
    pub has_return: bool,
    pub has_throw: bool,
    pub has_this: bool,
    pub start: TokenId,
    pub end: Option<TokenId>,
}

impl Function {
    pub(crate) fn new(name: String, block_depth: usize, is_assigned: bool, start: TokenId) -> Self {
        Self {
            name,
            block_depth,
            is_assigned,
            doc: None,
            is_constructor: false,
            is_interface: false,
            parameters: Vec::new(),
            has_return: false,
            has_throw: false,
            has_this: false,
            start,
            end: None,
        }
    }

    /// `Class.prototype.method` gives `Class`.
    pub fn class_name(&self) -> Option<&str> {
        self.name
            .find(".prototype.")
            .map(|index| &self.name[..index])
    }
}
