//! Per-file driver: lex, build contexts, then walk the chain with the tracker and the rules.

use super::findings::{ErrorCode, ErrorSink, FilteredSink, Finding};
use super::rules::{FileContext, LintRules};
use crate::config::LintConfig;
use crate::ecma::lexing::{tokenize, LexerMode};
use crate::ecma::structure::{build_contexts, ParseError};
use crate::ecma::token::TokenId;
use crate::ecma::tracking::{JavaScript, StateTracker};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub filename: String,
    pub final_mode: LexerMode,
    pub parse_error: Option<ParseError>,
    /// Tokens that went through the tracker and the rules.
    pub tokens_checked: usize,
    pub token_count: usize,
    /// Line number of every token, indexed by token.
    token_lines: Vec<usize>,
}

impl FileReport {
    /// Every token was checked.
    pub fn is_complete(&self) -> bool {
        self.parse_error.is_none() && self.tokens_checked == self.token_count
    }

    /// First token left unchecked after a parse error.
    pub fn stop_token(&self) -> Option<TokenId> {
        self.parse_error.map(|error| error.token())
    }

    /// Line a finding of this file points at, if it names a token.
    pub fn line_of(&self, finding: &Finding) -> Option<usize> {
        finding
            .token
            .and_then(|token| self.token_lines.get(token.index()))
            .copied()
    }
}

/// Checks files against one configuration. Holds no per-file state.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'c> {
    config: &'c LintConfig,
}

impl<'c> Runner<'c> {
    pub fn new(config: &'c LintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LintConfig {
        self.config
    }

    /// Read and check a file. An unreadable file is reported as FILE_NOT_FOUND.
    pub fn check_path(
        &self,
        path: &Path,
        rules: &mut dyn LintRules,
        sink: &mut dyn ErrorSink,
    ) -> Result<FileReport, CheckError> {
        let filename = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(self.check_source(&filename, &source, rules, sink)),
            Err(source) => {
                let mut sink = self.filtered(sink);
                sink.handle_file(&filename);
                sink.handle_error(Finding::new(
                    ErrorCode::FILE_NOT_FOUND,
                    format!("File not found: {filename}"),
                    None,
                ));
                sink.finish_file();
                Err(CheckError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Check `source` as the contents of `filename`.
    pub fn check_source(
        &self,
        filename: &str,
        source: &str,
        rules: &mut dyn LintRules,
        sink: &mut dyn ErrorSink,
    ) -> FileReport {
        let mut sink = self.filtered(sink);
        sink.handle_file(filename);
        info!(filename, "checking");

        let lexed = tokenize(source);
        let chain = &lexed.chain;
        if lexed.final_mode != LexerMode::Text {
            sink.handle_error(Finding::new(
                ErrorCode::FILE_IN_BLOCK,
                format!("File ended in mode \"{}\".", lexed.final_mode),
                Some(chain.last()),
            ));
        }

        let (tree, parse_error) = match build_contexts(chain) {
            Ok(tree) => (tree, None),
            Err(failure) => {
                let token = failure.token();
                sink.handle_error(Finding::new(
                    ErrorCode::FILE_DOES_NOT_PARSE,
                    format!(
                        "Error parsing file at token \"{}\". Unable to check the rest of file.",
                        chain[token].text
                    ),
                    Some(token),
                ));
                (failure.partial, Some(failure.error))
            }
        };
        let stop = parse_error.map(|error| error.token());

        let file = FileContext {
            filename,
            chain,
            tree: &tree,
            config: self.config,
            limited_doc: self.config.is_limited_doc_file(filename),
        };
        rules.begin_file(&file);

        let dialect = JavaScript::new(self.config.scope_wrapper.as_str());
        let mut tracker = StateTracker::with_dialect(chain, &tree, dialect);
        let mut tokens_checked = 0;
        for id in chain.ids().take_while(|&id| Some(id) != stop) {
            tracker.handle_token(id);
            rules.check_token(&file, id, &tracker, &mut sink);
            tracker.handle_after_token(id);
            tokens_checked += 1;
        }
        if let Some(stop) = stop {
            debug!(filename, token = %stop, "stopped at parse error");
        }

        rules.finalize(&file, &tracker, &mut sink);
        tracker.finalize(&mut sink);
        sink.finish_file();

        FileReport {
            filename: filename.to_string(),
            final_mode: lexed.final_mode,
            parse_error,
            tokens_checked,
            token_count: chain.len(),
            token_lines: chain.iter().map(|(_, token)| token.line_number).collect(),
        }
    }

    fn filtered<'s>(&self, sink: &'s mut dyn ErrorSink) -> FilteredSink<'s> {
        FilteredSink::new(sink, self.config.disable.iter().copied().map(ErrorCode))
    }
}
