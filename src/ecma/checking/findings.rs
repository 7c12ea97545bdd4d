//! Findings and the sinks that receive them.

use crate::ecma::token::{TokenChain, TokenId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Numeric identifier of a kind of finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const FILE_NOT_FOUND: ErrorCode = ErrorCode(-1);
    pub const FILE_DOES_NOT_PARSE: ErrorCode = ErrorCode(-2);
    pub const FILE_MISSING_NEWLINE: ErrorCode = ErrorCode(300);
    pub const FILE_IN_BLOCK: ErrorCode = ErrorCode(301);

    pub fn name(self) -> Option<&'static str> {
        match self {
            ErrorCode::FILE_NOT_FOUND => Some("FILE_NOT_FOUND"),
            ErrorCode::FILE_DOES_NOT_PARSE => Some("FILE_DOES_NOT_PARSE"),
            ErrorCode::FILE_MISSING_NEWLINE => Some("FILE_MISSING_NEWLINE"),
            ErrorCode::FILE_IN_BLOCK => Some("FILE_IN_BLOCK"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Span inside a token's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub start: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: ErrorCode,
    pub message: String,
    pub token: Option<TokenId>,
    pub position: Option<Position>,
    /// Opaque data for an automatic fixer.
    pub fix_data: Option<String>,
}

impl Finding {
    pub fn new(code: ErrorCode, message: impl Into<String>, token: Option<TokenId>) -> Self {
        Self {
            code,
            message: message.into(),
            token,
            position: None,
            fix_data: None,
        }
    }

    pub fn with_position(mut self, start: usize, length: usize) -> Self {
        self.position = Some(Position { start, length });
        self
    }

    pub fn with_fix_data(mut self, fix_data: impl Into<String>) -> Self {
        self.fix_data = Some(fix_data.into());
        self
    }

    /// Line of the finding's token, if it has one.
    pub fn line_number(&self, chain: &TokenChain) -> Option<usize> {
        self.token
            .and_then(|token| chain.get(token))
            .map(|token| token.line_number)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E:{}: {}", self.code, self.message)
    }
}

/// Receives findings file by file.
pub trait ErrorSink {
    fn handle_file(&mut self, filename: &str);

    fn handle_error(&mut self, finding: Finding);

    fn finish_file(&mut self) {}
}

/// Findings of one file, as the sink received them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileFindings {
    pub filename: String,
    pub findings: Vec<Finding>,
}

/// Keeps every finding in memory.
#[derive(Debug, Clone, Default)]
pub struct FindingCollector {
    files: Vec<FileFindings>,
    loose: Vec<Finding>,
}

impl FindingCollector {
    /// All findings in arrival order.
    pub fn findings(&self) -> Vec<&Finding> {
        self.loose
            .iter()
            .chain(self.files.iter().flat_map(|file| file.findings.iter()))
            .collect()
    }

    pub fn files(&self) -> &[FileFindings] {
        &self.files
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.findings().iter().map(|finding| finding.code).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.loose.is_empty() && self.files.iter().all(|file| file.findings.is_empty())
    }
}

impl ErrorSink for FindingCollector {
    fn handle_file(&mut self, filename: &str) {
        self.files.push(FileFindings {
            filename: filename.to_string(),
            findings: Vec::new(),
        });
    }

    fn handle_error(&mut self, finding: Finding) {
        match self.files.last_mut() {
            Some(file) => file.findings.push(finding),
            None => self.loose.push(finding),
        }
    }
}

/// Drops findings whose code is disabled and forwards the rest.
pub struct FilteredSink<'a> {
    inner: &'a mut dyn ErrorSink,
    disabled: BTreeSet<ErrorCode>,
}

impl<'a> FilteredSink<'a> {
    pub fn new(inner: &'a mut dyn ErrorSink, disabled: impl IntoIterator<Item = ErrorCode>) -> Self {
        Self {
            inner,
            disabled: disabled.into_iter().collect(),
        }
    }
}

impl ErrorSink for FilteredSink<'_> {
    fn handle_file(&mut self, filename: &str) {
        self.inner.handle_file(filename);
    }

    fn handle_error(&mut self, finding: Finding) {
        if !self.disabled.contains(&finding.code) {
            self.inner.handle_error(finding);
        }
    }

    fn finish_file(&mut self) {
        self.inner.finish_file();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FILE_MISSING_NEWLINE.to_string(), "0300");
        assert_eq!(ErrorCode::FILE_IN_BLOCK.name(), Some("FILE_IN_BLOCK"));
        assert_eq!(ErrorCode(42).name(), None);
    }

    #[test]
    fn test_collector_groups_by_file() {
        let mut collector = FindingCollector::default();
        collector.handle_file("a.js");
        collector.handle_error(Finding::new(ErrorCode::FILE_IN_BLOCK, "x", None));
        collector.handle_file("b.js");
        collector.handle_error(Finding::new(ErrorCode::FILE_MISSING_NEWLINE, "y", None));
        assert_eq!(collector.files().len(), 2);
        assert_eq!(
            collector.codes(),
            vec![ErrorCode::FILE_IN_BLOCK, ErrorCode::FILE_MISSING_NEWLINE]
        );
    }

    #[test]
    fn test_filtered_sink_drops_disabled_codes() {
        let mut collector = FindingCollector::default();
        {
            let mut sink = FilteredSink::new(&mut collector, [ErrorCode::FILE_MISSING_NEWLINE]);
            sink.handle_file("a.js");
            sink.handle_error(Finding::new(ErrorCode::FILE_MISSING_NEWLINE, "dropped", None));
            sink.handle_error(Finding::new(ErrorCode::FILE_IN_BLOCK, "kept", None));
        }
        assert_eq!(collector.codes(), vec![ErrorCode::FILE_IN_BLOCK]);
    }

    #[test]
    fn test_finding_builders() {
        let finding = Finding::new(ErrorCode::FILE_IN_BLOCK, "m", None)
            .with_position(2, 3)
            .with_fix_data("fix");
        assert_eq!(finding.position, Some(Position { start: 2, length: 3 }));
        assert_eq!(finding.fix_data.as_deref(), Some("fix"));
        assert_eq!(finding.to_string(), "E:0301: m");
    }
}
