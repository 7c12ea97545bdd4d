//! The mode-switching tokenizer.

use super::grammar;
use super::modes::LexerMode;
use crate::ecma::token::{Token, TokenChain, TokenKind};
use tracing::debug;

/// Output of lexing a whole source text.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub chain: TokenChain,
    /// Mode the tokenizer was in after the last line. Anything but
    /// [LexerMode::Text] means the file ended inside a string, comment or parameter list.
    pub final_mode: LexerMode,
}

#[derive(Debug, Default)]
pub struct Tokenizer {
    mode: LexerMode,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LexerMode {
        self.mode
    }

    pub fn tokenize(mut self, source: &str) -> Lexed {
        let mut chain = TokenChain::default();
        for (index, (text, ending)) in split_lines(source).into_iter().enumerate() {
            let tokens = self.tokenize_line(text, index + 1);
            chain.push_line(text.to_string(), ending.to_string(), tokens);
        }
        debug!(
            lines = chain.lines().len(),
            tokens = chain.len(),
            final_mode = %self.mode,
            "tokenized source"
        );
        Lexed {
            chain,
            final_mode: self.mode,
        }
    }

    /// Tokenize one line (terminator already stripped), carrying the mode over from the
    /// previous line.
    pub fn tokenize_line(&mut self, line: &str, line_number: usize) -> Vec<Token> {
        if line.is_empty() {
            return vec![Token::new(TokenKind::BlankLine, "", line_number, 0)];
        }

        let mut tokens = Vec::new();
        let mut unmatched_start = None;
        let mut index = 0;
        while index < line.len() {
            let hit = grammar::matchers(self.mode)
                .iter()
                .find_map(|matcher| matcher.try_match(line, index).map(|hit| (matcher, hit)));
            match hit {
                Some((matcher, hit)) => {
                    if let Some(start) = unmatched_start.take() {
                        tokens.push(self.unmatched_token(line, start, index, line_number));
                    }
                    let mut token = Token::new(matcher.kind, &line[index..hit.end], line_number, index);
                    token.values = hit.values;
                    tokens.push(token);
                    if let Some(mode) = matcher.next_mode {
                        self.mode = mode;
                    }
                    index = hit.end;
                }
                None => {
                    unmatched_start.get_or_insert(index);
                    index += line[index..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        if let Some(start) = unmatched_start {
            tokens.push(self.unmatched_token(line, start, line.len(), line_number));
        }
        tokens
    }

    fn unmatched_token(&self, line: &str, start: usize, end: usize, line_number: usize) -> Token {
        Token::new(self.mode.default_kind(), &line[start..end], line_number, start)
    }
}

/// Lex a whole source text.
pub fn tokenize(source: &str) -> Lexed {
    Tokenizer::new().tokenize(source)
}

/// Split into (text, terminator) pairs. A trailing terminator does not open another line;
/// empty input is one empty line.
fn split_lines(source: &str) -> Vec<(&str, &str)> {
    if source.is_empty() {
        return vec![("", "")];
    }
    source
        .split_inclusive('\n')
        .map(|raw| {
            let text = raw.trim_end_matches(|c| matches!(c, '\n' | '\r' | '\x0c'));
            (text, &raw[text.len()..])
        })
        .collect()
}
