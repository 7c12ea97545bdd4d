//! Format registry for analysis output
//!
//! Each format implements the `Formatter` trait and is looked up by name, which is how the
//! command line's `--format` flag is resolved.

use super::{detokenizer, snapshot, treeviz};
use crate::ecma::structure::ContextTree;
use crate::ecma::token::TokenChain;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// A lexed and structured file.
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    pub chain: &'a TokenChain,
    pub tree: &'a ContextTree,
}

pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, analysis: &Analysis<'_>) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, analysis: &Analysis<'_>) -> Result<String, FormatError> {
        Ok(treeviz::to_treeviz_str(analysis.chain, analysis.tree))
    }

    fn description(&self) -> &str {
        "Context tree, one line per context"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, analysis: &Analysis<'_>) -> Result<String, FormatError> {
        snapshot::to_json(analysis.chain, analysis.tree)
            .map_err(|error| FormatError::SerializationError(error.to_string()))
    }

    fn description(&self) -> &str {
        "Context tree as JSON"
    }
}

pub struct TokensFormatter;

impl Formatter for TokensFormatter {
    fn name(&self) -> &str {
        "tokens"
    }

    fn serialize(&self, analysis: &Analysis<'_>) -> Result<String, FormatError> {
        Ok(detokenizer::to_token_listing(analysis.chain))
    }

    fn description(&self) -> &str {
        "Token chain, one token per line"
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing one with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, analysis: &Analysis<'_>, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(analysis)
    }

    /// All available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TreevizFormatter);
        registry.register(JsonFormatter);
        registry.register(TokensFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
