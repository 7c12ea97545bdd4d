use super::context::ContextTree;
use crate::ecma::token::TokenId;
use thiserror::Error;

/// The context stack could not be closed as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Popping went past the root. At end of file this is how the pass finishes; anywhere
    /// else a closing token had no matching opener.
    #[error("no open context left to close at token {token}")]
    RootReached { token: TokenId },
    #[error("case or default without an enclosing switch at token {token}")]
    CaseWithoutSwitch { token: TokenId },
}

impl ParseError {
    /// The token being processed when the error occurred.
    pub fn token(&self) -> TokenId {
        match self {
            ParseError::RootReached { token } | ParseError::CaseWithoutSwitch { token } => *token,
        }
    }
}

/// A parse error together with everything built before it.
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct StructureError {
    #[source]
    pub error: ParseError,
    /// Tree and metadata for the tokens before the offending one.
    pub partial: ContextTree,
}

impl StructureError {
    pub fn token(&self) -> TokenId {
        self.error.token()
    }
}
