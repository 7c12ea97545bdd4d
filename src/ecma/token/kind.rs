//! The token kind catalogue and the kind sets the structural passes work with.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Normal,
    Whitespace,
    BlankLine,
    Number,

    // Comments
    StartSingleLineComment,
    StartBlockComment,
    StartDocComment,
    EndBlockComment,
    EndDocComment,
    Comment,

    // Strings
    SingleQuoteStringStart,
    SingleQuoteStringEnd,
    DoubleQuoteStringStart,
    DoubleQuoteStringEnd,
    TemplateStringStart,
    TemplateStringEnd,
    StringText,

    // Brackets
    StartBlock,
    EndBlock,
    StartParen,
    EndParen,
    StartBracket,
    EndBracket,

    Regex,

    // Function declarations
    FunctionDeclaration,
    FunctionName,
    StartParameters,
    Parameters,
    EndParameters,

    Semicolon,

    // Doc comment internals
    DocFlag,
    DocInlineFlag,
    DocStartBrace,
    DocEndBrace,
    DocPrefix,
    DocTypeStartBlock,
    DocTypeEndBlock,
    DocTypeModifier,

    SimpleLvalue,
    Keyword,
    Operator,
    Identifier,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            Normal => "normal",
            Whitespace => "whitespace",
            BlankLine => "blank line",
            Number => "number",
            StartSingleLineComment => "//",
            StartBlockComment => "/*",
            StartDocComment => "/**",
            EndBlockComment => "*/",
            EndDocComment => "doc */",
            Comment => "comment",
            SingleQuoteStringStart => "'string",
            SingleQuoteStringEnd => "string'",
            DoubleQuoteStringStart => "\"string",
            DoubleQuoteStringEnd => "string\"",
            TemplateStringStart => "`string",
            TemplateStringEnd => "string`",
            StringText => "string",
            StartBlock => "{",
            EndBlock => "}",
            StartParen => "(",
            EndParen => ")",
            StartBracket => "[",
            EndBracket => "]",
            Regex => "regex",
            FunctionDeclaration => "function",
            FunctionName => "function name",
            StartParameters => "start params",
            Parameters => "parameters",
            EndParameters => "end params",
            Semicolon => ";",
            DocFlag => "doc flag",
            DocInlineFlag => "doc inline flag",
            DocStartBrace => "doc {",
            DocEndBrace => "doc }",
            DocPrefix => "comment prefix: * ",
            DocTypeStartBlock => "Type <",
            DocTypeEndBlock => "Type >",
            DocTypeModifier => "modifier",
            SimpleLvalue => "lvalue=",
            Keyword => "keyword",
            Operator => "operator",
            Identifier => "identifier",
        }
    }

    /// Comment delimiters and comment text, doc comments included.
    pub fn is_comment(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            StartSingleLineComment
                | Comment
                | StartBlockComment
                | EndBlockComment
                | StartDocComment
                | EndDocComment
                | DocInlineFlag
                | DocFlag
                | DocStartBrace
                | DocEndBrace
                | DocPrefix
                | DocTypeStartBlock
                | DocTypeEndBlock
                | DocTypeModifier
        )
    }

    /// Kinds that carry no code: comments, whitespace and blank lines.
    pub fn is_non_code(self) -> bool {
        self.is_comment() || matches!(self, TokenKind::Whitespace | TokenKind::BlankLine)
    }

    pub fn is_code(self) -> bool {
        !self.is_non_code()
    }

    pub fn is_string_start(self) -> bool {
        matches!(
            self,
            TokenKind::SingleQuoteStringStart
                | TokenKind::DoubleQuoteStringStart
                | TokenKind::TemplateStringStart
        )
    }

    pub fn is_string_end(self) -> bool {
        matches!(
            self,
            TokenKind::SingleQuoteStringEnd
                | TokenKind::DoubleQuoteStringEnd
                | TokenKind::TemplateStringEnd
        )
    }

    /// Kinds that can terminate a value expression.
    ///
    /// An operator after one of these is binary (or postfix), and a `[` after one of these is
    /// an index rather than an array literal.
    pub fn is_expression_ender(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Normal
                | Identifier
                | Number
                | SimpleLvalue
                | EndBracket
                | EndParen
                | EndBlock
                | SingleQuoteStringEnd
                | DoubleQuoteStringEnd
                | TemplateStringEnd
        )
    }

    /// Kinds that end the extent of a doc flag.
    pub fn is_flag_ending(self) -> bool {
        matches!(self, TokenKind::DocFlag | TokenKind::EndDocComment)
    }

    /// Kinds that can start a doc flag's free-text description.
    pub fn is_flag_description(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            DocInlineFlag
                | Comment
                | DocStartBrace
                | DocEndBrace
                | DocTypeStartBlock
                | DocTypeEndBlock
                | DocTypeModifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_kinds_are_comments() {
        assert!(TokenKind::DocFlag.is_comment());
        assert!(TokenKind::DocPrefix.is_non_code());
        assert!(!TokenKind::DocPrefix.is_code());
    }

    #[test]
    fn test_whitespace_is_not_code() {
        assert!(TokenKind::Whitespace.is_non_code());
        assert!(TokenKind::BlankLine.is_non_code());
        assert!(TokenKind::Identifier.is_code());
        assert!(TokenKind::StringText.is_code());
    }

    #[test]
    fn test_expression_enders() {
        assert!(TokenKind::EndParen.is_expression_ender());
        assert!(TokenKind::DoubleQuoteStringEnd.is_expression_ender());
        assert!(!TokenKind::Operator.is_expression_ender());
        assert!(!TokenKind::Keyword.is_expression_ender());
    }
}
