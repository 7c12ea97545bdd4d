//! Per-token facts recorded by the structural pass.

use super::context::ContextId;
use crate::ecma::token::TokenId;
use serde::Serialize;

/// Arity of an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    Unary,
    UnaryPost,
    Binary,
    Ternary,
}

/// Operators that are always unary.
pub const UNARY_OPERATORS: [&str; 5] = ["!", "new", "delete", "typeof", "void"];
/// Operators that may be used in prefix position.
pub const UNARY_OK_OPERATORS: [&str; 9] = ["--", "++", "-", "+", "!", "new", "delete", "typeof", "void"];
/// Operators that may be used in postfix position.
pub const UNARY_POST_OPERATORS: [&str; 2] = ["--", "++"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Innermost context the token belongs to. For a token that closes a context this is
    /// the closed context.
    pub context: ContextId,
    /// Nearest code token before this one.
    pub last_code: Option<TokenId>,
    pub operator_type: Option<OperatorType>,
    /// The statement ends after this token although no `;` follows.
    pub is_implied_semicolon: bool,
    /// The token opens a single statement block without braces.
    pub is_implied_block: bool,
    /// The token also closes a single statement block.
    pub is_implied_block_close: bool,
}

impl Metadata {
    pub(crate) fn new(context: ContextId, last_code: Option<TokenId>) -> Self {
        Self {
            context,
            last_code,
            operator_type: None,
            is_implied_semicolon: false,
            is_implied_block: false,
            is_implied_block_close: false,
        }
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(
            self.operator_type,
            Some(OperatorType::Unary | OperatorType::UnaryPost)
        )
    }

    pub fn is_unary_post_operator(&self) -> bool {
        self.operator_type == Some(OperatorType::UnaryPost)
    }
}
