//! # jsstyle
//!
//! The analysis core of a style checker for ECMAScript source.
//!
//! A file goes through three passes, strictly in this order:
//!
//! 1. [lexing](ecma::lexing) turns the text into a chain of typed tokens;
//! 2. [structure](ecma::structure) recovers the nesting of statements, blocks and literals;
//! 3. [tracking](ecma::tracking) follows scopes, functions and doc comments token by token.
//!
//! [checking](ecma::checking) drives the passes per file and hands every token to a rule
//! set. All per-file state is created for the file and dropped afterwards; only the
//! read-only [config::LintConfig] is shared.
//!
//! ## Testing
//!
//! See the [testing module](ecma::testing) for the helpers the tests build on.

pub mod config;
pub mod ecma;
