//! The seam between the core passes and a rule catalogue.

use super::findings::ErrorSink;
use crate::config::LintConfig;
use crate::ecma::structure::ContextTree;
use crate::ecma::token::{TokenChain, TokenId};
use crate::ecma::tracking::StateTracker;

/// What a rule set knows about the file being checked.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    pub filename: &'a str,
    pub chain: &'a TokenChain,
    pub tree: &'a ContextTree,
    pub config: &'a LintConfig,
    /// Documentation checks are relaxed for this file.
    pub limited_doc: bool,
}

/// A rule catalogue driven token by token.
///
/// `check_token` runs between the tracker's two hooks, so the tracker reflects the state on
/// entering `token`.
pub trait LintRules {
    fn begin_file(&mut self, file: &FileContext<'_>);

    fn check_token(
        &mut self,
        file: &FileContext<'_>,
        token: TokenId,
        state: &StateTracker<'_>,
        sink: &mut dyn ErrorSink,
    );

    fn finalize(&mut self, file: &FileContext<'_>, state: &StateTracker<'_>, sink: &mut dyn ErrorSink);
}

/// Checks nothing. Only the core passes report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl LintRules for NoRules {
    fn begin_file(&mut self, _file: &FileContext<'_>) {}

    fn check_token(
        &mut self,
        _file: &FileContext<'_>,
        _token: TokenId,
        _state: &StateTracker<'_>,
        _sink: &mut dyn ErrorSink,
    ) {
    }

    fn finalize(&mut self, _file: &FileContext<'_>, _state: &StateTracker<'_>, _sink: &mut dyn ErrorSink) {}
}
