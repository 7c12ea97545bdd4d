//! Configuration loading for the checker.
//!
//! `defaults/jsstyle.default.toml` is embedded into the binary so documented defaults and
//! runtime behavior cannot drift. Callers layer their own files and single-key overrides on
//! top through [`Loader`] and receive an immutable [`LintConfig`] that is threaded through
//! every pass explicitly.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/jsstyle.default.toml");

/// Settings read by the checker. Never mutated while files are being checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LintConfig {
    pub max_line_length: usize,
    /// Enable the stricter optional rules.
    pub strict: bool,
    /// Optional rule groups to enable.
    pub jslint_error: Vec<String>,
    /// Base names of files that only receive relaxed documentation checks.
    pub limited_doc_files: Vec<String>,
    /// Error codes that are never reported.
    pub disable: Vec<i32>,
    /// Doc flags accepted in addition to the standard catalogue.
    pub custom_jsdoc_tags: Vec<String>,
    /// Identifier of the scope-aliasing wrapper call.
    pub scope_wrapper: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_line_length: 80,
            strict: false,
            jslint_error: Vec::new(),
            limited_doc_files: vec!["dummy.js".to_string(), "externs.js".to_string()],
            disable: Vec::new(),
            custom_jsdoc_tags: Vec::new(),
            scope_wrapper: crate::ecma::tracking::DEFAULT_SCOPE_WRAPPER.to_string(),
        }
    }
}

/// Name of the per-project file picked up by [`Loader::with_project_dir`].
pub const PROJECT_FILE: &str = ".jsstyle.toml";

/// Layers configuration sources over the embedded defaults. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file. A missing file is an error at build time.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer `.jsstyle.toml` from `dir` when there is one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(PROJECT_FILE), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Replace the disabled error codes.
    pub fn disable(self, codes: &[i32]) -> Result<Self, ConfigError> {
        let codes: Vec<i64> = codes.iter().copied().map(i64::from).collect();
        self.set("disable", codes)
    }

    pub fn strict(self, strict: bool) -> Result<Self, ConfigError> {
        self.set("strict", strict)
    }

    pub fn max_line_length(self, length: usize) -> Result<Self, ConfigError> {
        let length = i64::try_from(length)
            .map_err(|_| ConfigError::Message(format!("max_line_length {length} is too large")))?;
        self.set("max_line_length", length)
    }

    /// Replace the accepted custom doc flags.
    pub fn custom_jsdoc_tags(self, tags: &[String]) -> Result<Self, ConfigError> {
        self.set("custom_jsdoc_tags", tags.to_vec())
    }

    fn set<I: Into<ValueKind>>(mut self, key: &str, value: I) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer and validate the result.
    pub fn build(self) -> Result<LintConfig, ConfigError> {
        let config: LintConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl LintConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_length == 0 {
            return Err(ConfigError::Message("max_line_length must be positive".into()));
        }
        if self.scope_wrapper.trim().is_empty() {
            return Err(ConfigError::Message("scope_wrapper must not be empty".into()));
        }
        if let Some(tag) = self.custom_jsdoc_tags.iter().find(|tag| tag.starts_with('@')) {
            return Err(ConfigError::Message(format!(
                "custom_jsdoc_tags entry {tag:?} must not start with '@'"
            )));
        }
        Ok(())
    }

    /// Whether `filename` only gets the relaxed documentation checks.
    pub fn is_limited_doc_file(&self, filename: &str) -> bool {
        let base = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(filename);
        self.limited_doc_files
            .iter()
            .any(|limited| limited == base || limited == filename)
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<LintConfig, ConfigError> {
    Loader::new().build()
}
