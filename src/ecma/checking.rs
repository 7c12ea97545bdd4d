//! Checking pipeline
//!
//!     [Runner] drives one file through the three passes and hands every token to a
//!     [LintRules] implementation between the tracker's two hooks. Findings flow into an
//!     [ErrorSink]; codes disabled in the configuration are dropped on the way.
//!
//! File Level Findings
//!
//!     The core reports a handful of problems itself: a file that cannot be read, a file that
//!     ends inside a string or comment, a structural parse error (checking stops at the
//!     offending token) and a missing final newline.

pub mod findings;
pub mod rules;
pub mod runner;

pub use findings::{
    ErrorCode, ErrorSink, FileFindings, FilteredSink, Finding, FindingCollector, Position,
};
pub use rules::{FileContext, LintRules, NoRules};
pub use runner::{CheckError, FileReport, Runner};
