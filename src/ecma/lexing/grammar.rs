//! Per-mode matcher tables.
//!
//!     Order inside a table is priority: the first matcher that accepts the current offset
//!     wins. Regexes are anchored at the current offset; anything a regex would express with
//!     look-around is a [Guard] on the matcher.

use super::matcher::{Guard, Matcher, Pattern, Scanner};
use super::modes::LexerMode;
use super::scanners;
use crate::ecma::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! anchored {
    ($name:ident, $($pattern:tt)+) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new(concat!("^(?:", $($pattern)+, ")")).unwrap());
    };
}

/// A possibly dotted name: `a`, `a.b`, `$x.y_z`.
macro_rules! nested_identifier {
    () => {
        r"[a-zA-Z_$](?:[a-zA-Z0-9_$]|\.[a-zA-Z_$])*"
    };
}

anchored!(START_DOC_COMMENT, r"/\*\*");
// `/**/` is an empty block comment, not a doc comment.
anchored!(SLASH, r"/");
anchored!(START_BLOCK_COMMENT, r"/\*");
anchored!(END_BLOCK_COMMENT, r"\*/");
anchored!(END_OF_LINE_SINGLE_LINE_COMMENT, r"//$");
anchored!(START_SINGLE_LINE_COMMENT, r"//");
anchored!(SINGLE_QUOTE, r"'");
anchored!(DOUBLE_QUOTE, r#"""#);
anchored!(BACKTICK, r"`");
anchored!(SINGLE_QUOTE_TEXT, r"(?:[^'\\]|\\(?:.|$))+");
anchored!(DOUBLE_QUOTE_TEXT, r#"(?:[^"\\]|\\(?:.|$))+"#);
anchored!(TEMPLATE_TEXT, r"[^`]+");
// A pattern literal may not start with `*` (that would be a comment).
anchored!(
    REGEX,
    r"/(?:[^*/\\\[]|\\.|\[(?:[^\]\\]|\\.)*\])(?:[^/\\\[]|\\.|\[(?:[^\]\\]|\\.)*\])*/[gimsuy]*"
);
// Tokens that can follow a pattern literal but never a divisor.
anchored!(REGEX_FOLLOW, r"\s*(?:;|,|\.|\)|\]|$|//|/\*|:|\})");
anchored!(START_BLOCK, r"\{");
anchored!(END_BLOCK, r"\}");
anchored!(FUNCTION_DECLARATION, r"function\b");
anchored!(START_PAREN, r"\(");
anchored!(END_PAREN, r"\)");
anchored!(START_BRACKET, r"\[");
anchored!(END_BRACKET, r"\]");
anchored!(
    NUMBER,
    r"0[xX][0-9a-fA-F]+|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?"
);
anchored!(SIMPLE_LVALUE, concat!("(?P<identifier>", nested_identifier!(), ")"));
// A single `=`: not `==` and not `=>`.
anchored!(SINGLE_ASSIGNMENT, r"\s*=(?:[^=>]|$)");
anchored!(
    OPERATOR,
    concat!(
        r",|\+\+|===|!==|>>>=|>>>|==|>=|<=|!=|<<=|>>=|<<|>>|=>|>|<|\+=|\+|--|\^=|-=|-|/=|/",
        r"|\*=|\*|%=|%|&&|\|\||&=|&|\|=|\||=|!|:|\?|\^",
        r"|delete\b|in\b|instanceof\b|new\b|typeof\b|void\b|\."
    )
);
anchored!(
    KEYWORD,
    concat!(
        "break|case|catch|const|continue|default|do|else|finally|for|if|let",
        "|return|switch|throw|try|var|while|with"
    )
);
anchored!(IDENTIFIER_CHAR, r"[a-zA-Z0-9_$]");
anchored!(WHITESPACE, r"\s+");
anchored!(IDENTIFIER, nested_identifier!());
anchored!(SEMICOLON, r";");
anchored!(ANYTHING, r".*");
anchored!(PARAMETERS, r"[^)]+");
anchored!(END_PARAMETERS, r"\)\s*");

anchored!(DOC_INLINE_FLAG, r"@(?P<name>[a-zA-Z]+)");
// Flags whose type and name are lexed as separate, space delimited tokens.
anchored!(
    DOC_FLAG_LEX_SPACES,
    concat!(
        r"@(?P<name>const|enum|export|extends|final|implements|package|param|private",
        r"|protected|public|return|type|typedef)\b"
    )
);
anchored!(DOC_FLAG, r"@(?P<name>[a-zA-Z]+)");
anchored!(DOC_TYPE_BLOCK_START, r"[<(]");
anchored!(DOC_TYPE_BLOCK_END, r"[>)]");
anchored!(DOC_TYPE_MODIFIERS, r"[!?|,:=]");

fn regex(pattern: &'static Lazy<Regex>, kind: TokenKind) -> Matcher {
    Matcher::new(Pattern::Regex(pattern), kind)
}

fn scanner(scan: Scanner, kind: TokenKind) -> Matcher {
    Matcher::new(Pattern::Scanner(scan), kind)
}

static TEXT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    use TokenKind::*;
    vec![
        regex(&START_DOC_COMMENT, StartDocComment)
            .guarded(Guard::NotFollowedBy(&SLASH))
            .switching_to(LexerMode::DocComment),
        regex(&START_BLOCK_COMMENT, StartBlockComment).switching_to(LexerMode::BlockComment),
        regex(&END_OF_LINE_SINGLE_LINE_COMMENT, StartSingleLineComment),
        regex(&START_SINGLE_LINE_COMMENT, StartSingleLineComment)
            .switching_to(LexerMode::LineComment),
        regex(&SINGLE_QUOTE, SingleQuoteStringStart).switching_to(LexerMode::SingleQuoteString),
        regex(&DOUBLE_QUOTE, DoubleQuoteStringStart).switching_to(LexerMode::DoubleQuoteString),
        regex(&BACKTICK, TemplateStringStart).switching_to(LexerMode::TemplateString),
        regex(&REGEX, TokenKind::Regex).guarded(Guard::FollowedBy(&REGEX_FOLLOW)),
        regex(&START_BLOCK, StartBlock),
        regex(&END_BLOCK, EndBlock),
        regex(&FUNCTION_DECLARATION, FunctionDeclaration)
            .guarded(Guard::WordBoundary)
            .switching_to(LexerMode::Function),
        regex(&START_PAREN, StartParen),
        regex(&END_PAREN, EndParen),
        regex(&START_BRACKET, StartBracket),
        regex(&END_BRACKET, EndBracket),
        regex(&NUMBER, Number),
        regex(&SIMPLE_LVALUE, SimpleLvalue).guarded(Guard::FollowedBy(&SINGLE_ASSIGNMENT)),
        regex(&OPERATOR, Operator).guarded(Guard::WordBoundary),
        regex(&KEYWORD, Keyword).guarded(Guard::NotFollowedBy(&IDENTIFIER_CHAR)),
        regex(&WHITESPACE, Whitespace),
        regex(&IDENTIFIER, Identifier),
        regex(&SEMICOLON, Semicolon),
    ]
});

static SINGLE_QUOTE_STRING: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&SINGLE_QUOTE_TEXT, TokenKind::StringText),
        regex(&SINGLE_QUOTE, TokenKind::SingleQuoteStringEnd).switching_to(LexerMode::Text),
    ]
});

static DOUBLE_QUOTE_STRING: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&DOUBLE_QUOTE_TEXT, TokenKind::StringText),
        regex(&DOUBLE_QUOTE, TokenKind::DoubleQuoteStringEnd).switching_to(LexerMode::Text),
    ]
});

static TEMPLATE_STRING: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&TEMPLATE_TEXT, TokenKind::StringText),
        regex(&BACKTICK, TokenKind::TemplateStringEnd).switching_to(LexerMode::Text),
    ]
});

static BLOCK_COMMENT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&END_BLOCK_COMMENT, TokenKind::EndBlockComment).switching_to(LexerMode::Text),
        scanner(scanners::block_comment_text, TokenKind::Comment),
    ]
});

/// Matchers shared by both doc comment modes.
fn doc_common() -> Vec<Matcher> {
    use TokenKind::*;
    vec![
        regex(&END_BLOCK_COMMENT, EndDocComment).switching_to(LexerMode::Text),
        regex(&DOC_INLINE_FLAG, DocInlineFlag).guarded(Guard::After('{')),
        regex(&DOC_FLAG_LEX_SPACES, DocFlag)
            .guarded(Guard::AfterSpaceOrLineStart)
            .switching_to(LexerMode::DocCommentLexSpaces),
        regex(&DOC_FLAG, DocFlag)
            .guarded(Guard::AfterSpaceOrLineStart)
            .switching_to(LexerMode::DocComment),
        regex(&START_BLOCK, DocStartBrace),
        regex(&END_BLOCK, DocEndBrace),
        regex(&DOC_TYPE_BLOCK_START, DocTypeStartBlock),
        regex(&DOC_TYPE_BLOCK_END, DocTypeEndBlock),
        regex(&DOC_TYPE_MODIFIERS, DocTypeModifier),
        scanner(scanners::doc_type_text, Comment),
        scanner(scanners::doc_prefix, DocPrefix).at_line_start(),
    ]
}

static DOC_COMMENT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    let mut matchers = doc_common();
    matchers.push(scanner(scanners::doc_comment_text, TokenKind::Comment));
    matchers
});

static DOC_COMMENT_LEX_SPACES: Lazy<Vec<Matcher>> = Lazy::new(|| {
    let mut matchers = doc_common();
    matchers.push(regex(&WHITESPACE, TokenKind::Comment));
    matchers.push(scanner(scanners::doc_comment_no_spaces_text, TokenKind::Comment));
    matchers
});

static LINE_COMMENT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![regex(&ANYTHING, TokenKind::Comment).switching_to(LexerMode::Text)]
});

static PARAMETER: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&END_PARAMETERS, TokenKind::EndParameters).switching_to(LexerMode::Text),
        regex(&PARAMETERS, TokenKind::Parameters),
    ]
});

static FUNCTION: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        regex(&START_PAREN, TokenKind::StartParameters).switching_to(LexerMode::Parameter),
        regex(&WHITESPACE, TokenKind::Whitespace),
        regex(&IDENTIFIER, TokenKind::FunctionName),
    ]
});

/// The ordered matcher table of a mode.
pub fn matchers(mode: LexerMode) -> &'static [Matcher] {
    match mode {
        LexerMode::Text => &TEXT,
        LexerMode::SingleQuoteString => &SINGLE_QUOTE_STRING,
        LexerMode::DoubleQuoteString => &DOUBLE_QUOTE_STRING,
        LexerMode::TemplateString => &TEMPLATE_STRING,
        LexerMode::BlockComment => &BLOCK_COMMENT,
        LexerMode::DocComment => &DOC_COMMENT,
        LexerMode::DocCommentLexSpaces => &DOC_COMMENT_LEX_SPACES,
        LexerMode::LineComment => &LINE_COMMENT,
        LexerMode::Parameter => &PARAMETER,
        LexerMode::Function => &FUNCTION,
    }
}
