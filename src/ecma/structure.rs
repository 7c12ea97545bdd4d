//! Structural recovery
//!
//!     The language has optional semicolons and several ambiguous tokens (is `{` a block or
//!     an object literal, is `[` an index or an array literal, does this line end the
//!     statement). This module recovers enough structure to answer those questions without a
//!     grammar: a single forward pass over the token chain maintains a stack of contexts and
//!     records, for every token, its [Metadata].
//!
//! Contexts
//!
//!     Contexts form a tree stored in an arena, [ContextTree]. Every context knows its kind,
//!     its start and end token, its parent and its children in start order. There is exactly
//!     one root. A statement context is opened in front of any token that arrives while a
//!     block-like context (root, block, case block, for group, implied block) is on top,
//!     except directly inside a switch body.
//!
//! Implied Statements And Blocks
//!
//!     A statement also ends at the last code token of a line when the context allows it and
//!     nothing suggests a continuation (trailing operator or dot, operator or `{` at the start
//!     of the next line, an open multi-line string, a `var` whose names start on the next
//!     line). `if`, `for`, `while` and `else` without braces open an implied block that the
//!     end of the next statement closes.
//!
//! Failure
//!
//!     When a closing token finds no context to close, the pass stops with a [ParseError]
//!     naming the token; [StructureError] carries the partial tree so callers can keep what
//!     was learned up to that point. Contexts still open at the end of the file are closed
//!     there and listed in [ContextTree::closed_at_eof].

pub mod builder;
pub mod context;
pub mod error;
pub mod metadata;

pub use builder::{build_contexts, MetaDataPass};
pub use context::{Context, ContextId, ContextKind, ContextTree};
pub use error::{ParseError, StructureError};
pub use metadata::{Metadata, OperatorType};
