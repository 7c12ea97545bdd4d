//! Scope, function and documentation tracking
//!
//!     The third pass over a file. It walks the same chain in the same order as the
//!     structural pass and keeps a [ScopeState]: block and parenthesis depth, the stack of
//!     open functions, the pending doc comment and the names declared in the current scope.
//!
//! Documentation
//!
//!     A doc comment is attached to the declaration directly after it. Whether a function
//!     can take the pending comment depends on the [Dialect]'s notion of top level, so code
//!     inside a scope-aliasing wrapper is still documented like code at file level. Each
//!     `@flag` inside the comment is parsed into a [DocFlag]; a malformed flag invalidates
//!     the whole comment and checks must skip it.
//!
//! End Of File
//!
//!     On well formed input every depth is back to zero and no function is open when the
//!     last token has been handled ([StateTracker::is_balanced]).

pub mod dialect;
pub mod doc_comment;
pub mod doc_flag;
pub mod function;
pub mod state;

pub use dialect::{Dialect, JavaScript, DEFAULT_SCOPE_WRAPPER};
pub use doc_comment::{DocComment, DocCommentId, EditOp, ParameterDiff};
pub use doc_flag::DocFlag;
pub use function::{Function, FunctionId};
pub use state::{BlockType, Phase, ScopeState, StateTracker};
