//! Output format implementations for tokens and context trees
//!
//! This module contains the serializations the command line and the tests use:
//! - Context trees to treeviz and JSON
//! - Token chains back to source text (detokenizer) and to a token listing

pub mod detokenizer;
pub mod registry;
pub mod snapshot;
pub mod treeviz;

pub use detokenizer::{detokenize, to_token_listing};
pub use registry::{Analysis, FormatError, FormatRegistry, Formatter};
pub use snapshot::{snapshot, to_json, ContextSnapshot, TokenRef};
pub use treeviz::to_treeviz_str;
