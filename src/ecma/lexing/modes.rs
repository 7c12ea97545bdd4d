//! Lexer modes.

use crate::ecma::token::TokenKind;
use serde::Serialize;
use std::fmt;

/// The sub-grammar the tokenizer is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexerMode {
    #[default]
    Text,
    SingleQuoteString,
    DoubleQuoteString,
    TemplateString,
    BlockComment,
    DocComment,
    /// Doc comment mode right after a flag whose type/name tokens are space separated.
    DocCommentLexSpaces,
    LineComment,
    Parameter,
    Function,
}

impl LexerMode {
    /// Kind given to runs of characters that no matcher of the mode accepts.
    pub fn default_kind(self) -> TokenKind {
        match self {
            LexerMode::DocComment | LexerMode::DocCommentLexSpaces => TokenKind::Comment,
            _ => TokenKind::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LexerMode::Text => "text",
            LexerMode::SingleQuoteString => "single_quote_string",
            LexerMode::DoubleQuoteString => "double_quote_string",
            LexerMode::TemplateString => "template_string",
            LexerMode::BlockComment => "block_comment",
            LexerMode::DocComment => "doc_comment",
            LexerMode::DocCommentLexSpaces => "doc_comment_spaces",
            LexerMode::LineComment => "line_comment",
            LexerMode::Parameter => "parameter",
            LexerMode::Function => "function",
        }
    }
}

impl fmt::Display for LexerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
