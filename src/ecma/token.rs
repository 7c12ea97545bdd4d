//! Token types shared by every stage of the pipeline.
//!
//!     Lexing produces a flat chain of tokens. The chain is an arena: tokens are stored in
//!     source order and addressed by [TokenId], so "previous" and "next" are index arithmetic
//!     with bounds checks rather than links. Later passes never mutate tokens; what they learn
//!     about a token (its context, the last code token before it, implied statement ends) is
//!     kept in side tables indexed by the same id.
//!
//! Kinds
//!
//!     The kind set is deliberately flat (see [kind]). Some kinds only make sense inside a
//!     lexer mode: doc kinds appear between `/**` and `*/`, PARAMETERS only between the
//!     parentheses after `function`. Helper sets group kinds the way the structural passes
//!     consume them (code vs. non-code, expression enders, flag endings).
//!
//! Lines
//!
//!     The chain remembers every source line and the terminator that was stripped from it.
//!     Together with the token texts this makes lexing lossless, see
//!     [detokenize](crate::ecma::formats::detokenize).

pub mod chain;
pub mod kind;

pub use chain::{SourceLine, Token, TokenChain, TokenId};
pub use kind::TokenKind;
