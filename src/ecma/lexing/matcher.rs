//! A single entry of a mode's matcher table.
//!
//!     A matcher couples a pattern, which must match exactly at the current offset, with an
//!     optional guard over the rest of the line. Guards stand in for the look-behind and
//!     look-ahead assertions the regex engine does not support. Patterns are either anchored
//!     regexes or small scanner functions for the character classes that are easier to walk
//!     by hand.

use super::modes::LexerMode;
use crate::ecma::token::TokenKind;
use regex::Regex;
use std::collections::BTreeMap;

/// Returns the byte length matched at `at`, or `None`.
pub type Scanner = fn(line: &str, at: usize) -> Option<usize>;

pub enum Pattern {
    /// Must be anchored with `^`; applied to the remainder of the line.
    Regex(&'static Regex),
    Scanner(Scanner),
}

pub enum Guard {
    /// At line start or right after whitespace.
    AfterSpaceOrLineStart,
    /// Right after the given character.
    After(char),
    /// When the match starts with a word character, the preceding character is not one.
    WordBoundary,
    /// The remainder of the line after the match matches this anchored regex.
    FollowedBy(&'static Regex),
    /// The remainder of the line after the match does not match this anchored regex.
    NotFollowedBy(&'static Regex),
}

pub struct Matcher {
    pub pattern: Pattern,
    pub kind: TokenKind,
    pub next_mode: Option<LexerMode>,
    pub guard: Option<Guard>,
    pub line_start_only: bool,
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub end: usize,
    pub values: BTreeMap<String, String>,
}

impl Matcher {
    pub fn new(pattern: Pattern, kind: TokenKind) -> Self {
        Self {
            pattern,
            kind,
            next_mode: None,
            guard: None,
            line_start_only: false,
        }
    }

    pub fn switching_to(mut self, mode: LexerMode) -> Self {
        self.next_mode = Some(mode);
        self
    }

    pub fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn at_line_start(mut self) -> Self {
        self.line_start_only = true;
        self
    }

    /// Try the matcher at byte offset `at` of `line`. Empty matches are rejected.
    pub fn try_match(&self, line: &str, at: usize) -> Option<Match> {
        if self.line_start_only && at != 0 {
            return None;
        }
        let rest = &line[at..];
        let (len, values) = match &self.pattern {
            Pattern::Regex(regex) => {
                let captures = regex.captures(rest)?;
                let whole = captures.get(0)?;
                let values = regex
                    .capture_names()
                    .flatten()
                    .filter_map(|name| {
                        captures
                            .name(name)
                            .map(|m| (name.to_string(), m.as_str().to_string()))
                    })
                    .collect();
                (whole.end(), values)
            }
            Pattern::Scanner(scan) => (scan(line, at)?, BTreeMap::new()),
        };
        if len == 0 {
            return None;
        }
        let end = at + len;
        if let Some(guard) = &self.guard {
            if !guard.allows(line, at, end) {
                return None;
            }
        }
        Some(Match { end, values })
    }
}

impl Guard {
    fn allows(&self, line: &str, start: usize, end: usize) -> bool {
        let before = line[..start].chars().next_back();
        match self {
            Guard::AfterSpaceOrLineStart => before.map_or(true, char::is_whitespace),
            Guard::After(c) => before == Some(*c),
            Guard::WordBoundary => {
                let starts_word = line[start..].chars().next().is_some_and(is_word_char);
                !starts_word || !before.is_some_and(is_word_char)
            }
            Guard::FollowedBy(regex) => regex.is_match(&line[end..]),
            Guard::NotFollowedBy(regex) => !regex.is_match(&line[end..]),
        }
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<word>[a-z]+)").unwrap());
    static PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(").unwrap());

    #[test]
    fn test_regex_match_collects_named_values() {
        let matcher = Matcher::new(Pattern::Regex(&WORD), TokenKind::Identifier);
        let found = matcher.try_match("  abc(", 2).unwrap();
        assert_eq!(found.end, 5);
        assert_eq!(found.values.get("word").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_guards() {
        let followed = Matcher::new(Pattern::Regex(&WORD), TokenKind::Identifier)
            .guarded(Guard::FollowedBy(&PAREN));
        assert!(followed.try_match("abc(", 0).is_some());
        assert!(followed.try_match("abc ", 0).is_none());

        let after_space = Matcher::new(Pattern::Regex(&WORD), TokenKind::Identifier)
            .guarded(Guard::AfterSpaceOrLineStart);
        assert!(after_space.try_match("x abc", 2).is_some());
        assert!(after_space.try_match("xabc", 1).is_none());
        assert!(after_space.try_match("abc", 0).is_some());

        let boundary = Matcher::new(Pattern::Regex(&WORD), TokenKind::Operator)
            .guarded(Guard::WordBoundary);
        assert!(boundary.try_match("1in", 1).is_none());
        assert!(boundary.try_match(" in", 1).is_some());
    }

    #[test]
    fn test_line_start_only() {
        let matcher = Matcher::new(Pattern::Regex(&WORD), TokenKind::Comment).at_line_start();
        assert!(matcher.try_match("ab cd", 3).is_none());
        assert!(matcher.try_match("ab cd", 0).is_some());
    }
}
