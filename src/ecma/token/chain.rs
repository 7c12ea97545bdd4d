//! Tokens and the arena that chains them.

use super::kind::TokenKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, Range};

/// Stable handle of a token inside its [TokenChain].
///
/// Ids are assigned in source order, so comparing ids compares positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId(pub(crate) usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based.
    pub line_number: usize,
    /// Byte offset of the token inside its line.
    pub start_index: usize,
    /// Named sub-matches of the pattern that produced the token.
    pub values: BTreeMap<String, String>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line_number: usize, start_index: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line_number,
            start_index,
            values: BTreeMap::new(),
        }
    }

    pub fn end_index(&self) -> usize {
        self.start_index + self.text.len()
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == operator
    }

    /// True for `=` and the compound assignment operators.
    pub fn is_assignment(&self) -> bool {
        self.kind == TokenKind::Operator
            && self.text.ends_with('=')
            && !matches!(self.text.as_str(), "==" | "!=" | ">=" | "<=" | "===" | "!==")
    }

    pub fn is_code(&self) -> bool {
        self.kind.is_code()
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A source line with its terminator split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// The stripped `\n`, `\r` and `\f` characters, empty for an unterminated last line.
    pub ending: String,
    pub(crate) tokens: Range<usize>,
}

impl SourceLine {
    pub fn first_token(&self) -> TokenId {
        TokenId(self.tokens.start)
    }

    pub fn last_token(&self) -> TokenId {
        TokenId(self.tokens.end - 1)
    }
}

/// All tokens of one file, in source order.
///
/// A chain is never empty: every line yields at least one token and empty input is a
/// single empty line.
#[derive(Debug, Clone, Default)]
pub struct TokenChain {
    tokens: Vec<Token>,
    lines: Vec<SourceLine>,
}

impl TokenChain {
    pub(crate) fn push_line(&mut self, text: String, ending: String, tokens: Vec<Token>) {
        let start = self.tokens.len();
        self.tokens.extend(tokens);
        self.lines.push(SourceLine {
            text,
            ending,
            tokens: start..self.tokens.len(),
        });
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> TokenId {
        TokenId(0)
    }

    pub fn last(&self) -> TokenId {
        TokenId(self.tokens.len().saturating_sub(1))
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        let next = id.0 + 1;
        (next < self.tokens.len()).then_some(TokenId(next))
    }

    pub fn previous(&self, id: TokenId) -> Option<TokenId> {
        id.0.checked_sub(1).map(TokenId)
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = TokenId> + ExactSizeIterator {
        (0..self.tokens.len()).map(TokenId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens.iter().enumerate().map(|(i, t)| (TokenId(i), t))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// The line with the given 1-based number.
    pub fn line(&self, line_number: usize) -> Option<&SourceLine> {
        line_number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Full text of the line a token sits on.
    pub fn line_text(&self, id: TokenId) -> &str {
        self.line(self[id].line_number)
            .map(|l| l.text.as_str())
            .unwrap_or("")
    }

    pub fn first_in_line(&self, id: TokenId) -> TokenId {
        self.line(self[id].line_number)
            .map(SourceLine::first_token)
            .unwrap_or(id)
    }

    pub fn last_in_line(&self, id: TokenId) -> TokenId {
        self.line(self[id].line_number)
            .map(SourceLine::last_token)
            .unwrap_or(id)
    }

    pub fn is_first_in_line(&self, id: TokenId) -> bool {
        self.first_in_line(id) == id
    }

    pub fn is_last_in_line(&self, id: TokenId) -> bool {
        self.last_in_line(id) == id
    }

    /// True when the last line carries a terminator.
    pub fn ends_with_newline(&self) -> bool {
        self.lines.last().is_some_and(|l| !l.ending.is_empty())
    }
}

impl Index<TokenId> for TokenChain {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Token {
        &self.tokens[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenChain {
        let mut chain = TokenChain::default();
        chain.push_line(
            "a b".into(),
            "\n".into(),
            vec![
                Token::new(TokenKind::Identifier, "a", 1, 0),
                Token::new(TokenKind::Whitespace, " ", 1, 1),
                Token::new(TokenKind::Identifier, "b", 1, 2),
            ],
        );
        chain.push_line(
            String::new(),
            String::new(),
            vec![Token::new(TokenKind::BlankLine, "", 2, 0)],
        );
        chain
    }

    #[test]
    fn test_neighbors_are_bounded() {
        let chain = sample();
        assert_eq!(chain.previous(chain.first()), None);
        assert_eq!(chain.next(chain.last()), None);
        assert_eq!(chain.next(TokenId(0)), Some(TokenId(1)));
    }

    #[test]
    fn test_line_boundaries() {
        let chain = sample();
        assert_eq!(chain.first_in_line(TokenId(2)), TokenId(0));
        assert!(chain.is_last_in_line(TokenId(2)));
        assert!(chain.is_first_in_line(TokenId(3)));
        assert_eq!(chain.line_text(TokenId(1)), "a b");
        assert!(!chain.ends_with_newline());
    }

    #[test]
    fn test_assignment_operators() {
        let op = |s: &str| Token::new(TokenKind::Operator, s, 1, 0);
        assert!(op("=").is_assignment());
        assert!(op(">>>=").is_assignment());
        assert!(!op("===").is_assignment());
        assert!(!op("<=").is_assignment());
    }
}
