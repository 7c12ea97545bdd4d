//! Token navigation
//!
//!     Pure queries over a [TokenChain]: ordering, directional searches and identifier
//!     reconstruction. Nothing here mutates or fails; "not found" is `None`.
//!
//!     The general search is [custom_search]. It walks one token at a time in either
//!     direction, stops at the first token the predicate accepts, and gives up when the abort
//!     predicate fires or after a maximum number of hops. The kind based helpers are thin
//!     wrappers over it.

use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Order two tokens by (line, offset).
pub fn compare(chain: &TokenChain, a: TokenId, b: TokenId) -> Ordering {
    let (a, b) = (&chain[a], &chain[b]);
    a.line_number
        .cmp(&b.line_number)
        .then(a.start_index.cmp(&b.start_index))
}

fn step(chain: &TokenChain, id: TokenId, direction: Direction) -> Option<TokenId> {
    match direction {
        Direction::Forward => chain.next(id),
        Direction::Backward => chain.previous(id),
    }
}

/// Search from `start` (exclusive) for the first token accepted by `accept`.
///
/// The search stops without a result when `abort` accepts a token first, or after
/// `distance` hops when a distance is given.
pub fn custom_search(
    chain: &TokenChain,
    start: TokenId,
    accept: impl Fn(TokenId) -> bool,
    abort: Option<&dyn Fn(TokenId) -> bool>,
    distance: Option<usize>,
    direction: Direction,
) -> Option<TokenId> {
    let mut hops = 0;
    let mut current = step(chain, start, direction);
    while let Some(id) = current {
        if distance.is_some_and(|limit| hops >= limit) {
            return None;
        }
        if abort.is_some_and(|abort| abort(id)) {
            return None;
        }
        if accept(id) {
            return Some(id);
        }
        hops += 1;
        current = step(chain, id, direction);
    }
    None
}

/// First token of one of `kinds`.
pub fn search(
    chain: &TokenChain,
    start: TokenId,
    kinds: &[TokenKind],
    distance: Option<usize>,
    direction: Direction,
) -> Option<TokenId> {
    custom_search(chain, start, |id| chain[id].is_any_of(kinds), None, distance, direction)
}

/// First token not of one of `kinds`.
pub fn search_except(
    chain: &TokenChain,
    start: TokenId,
    kinds: &[TokenKind],
    distance: Option<usize>,
    direction: Direction,
) -> Option<TokenId> {
    custom_search(chain, start, |id| !chain[id].is_any_of(kinds), None, distance, direction)
}

/// First token of one of `kinds`, giving up at any token of `until`.
pub fn search_until(
    chain: &TokenChain,
    start: TokenId,
    kinds: &[TokenKind],
    until: &[TokenKind],
    direction: Direction,
) -> Option<TokenId> {
    let abort: &dyn Fn(TokenId) -> bool = &|id| chain[id].is_any_of(until);
    custom_search(chain, start, |id| chain[id].is_any_of(kinds), Some(abort), None, direction)
}

pub fn next_code_token(chain: &TokenChain, start: TokenId) -> Option<TokenId> {
    custom_search(chain, start, |id| chain[id].is_code(), None, None, Direction::Forward)
}

pub fn previous_code_token(chain: &TokenChain, start: TokenId) -> Option<TokenId> {
    custom_search(chain, start, |id| chain[id].is_code(), None, None, Direction::Backward)
}

fn next_non_space(chain: &TokenChain, start: TokenId, direction: Direction) -> Option<TokenId> {
    search_except(
        chain,
        start,
        &[TokenKind::Whitespace, TokenKind::BlankLine],
        None,
        direction,
    )
}

fn is_dot(chain: &TokenChain, id: TokenId) -> bool {
    chain[id].is_operator(".")
}

fn is_identifier_or_dot(chain: &TokenChain, id: TokenId) -> bool {
    chain[id].is_any_of(&[TokenKind::Identifier, TokenKind::SimpleLvalue]) || is_dot(chain, id)
}

fn is_identifier(chain: &TokenChain, id: TokenId) -> bool {
    chain[id].is_any_of(&[TokenKind::Identifier, TokenKind::SimpleLvalue])
}

/// Walk back from `token` to the first token of the dotted identifier it belongs to.
/// Whitespace and comments between the parts are skipped.
pub fn get_identifier_start(chain: &TokenChain, token: TokenId) -> Option<TokenId> {
    if !is_identifier_or_dot(chain, token) {
        return None;
    }
    let mut start = token;
    while let Some(previous) = previous_code_token(chain, start) {
        let joins = if is_dot(chain, start) {
            is_identifier(chain, previous)
        } else {
            is_dot(chain, previous)
        };
        if !joins {
            break;
        }
        start = previous;
    }
    if is_dot(chain, start) {
        return next_code_token(chain, start).filter(|&next| is_identifier(chain, next));
    }
    Some(start)
}

/// The full dotted identifier starting at `token`, e.g. `a.b.c` spread over
/// `a` `.` `b.c` with whitespace or comments in between.
///
/// Returns `None` when `token` is not an identifier, or is not the first token of the
/// identifier it belongs to.
pub fn get_identifier_for_token(chain: &TokenChain, token: TokenId) -> Option<String> {
    if !is_identifier(chain, token) || get_identifier_start(chain, token) != Some(token) {
        return None;
    }

    let mut identifier = chain[token].text.clone();
    let mut expect_dot = true;
    let mut current = token;
    while let Some(next) = next_code_token(chain, current) {
        if expect_dot && is_dot(chain, next) {
            identifier.push('.');
        } else if !expect_dot && is_identifier(chain, next) {
            identifier.push_str(&chain[next].text);
        } else {
            break;
        }
        expect_dot = !expect_dot;
        current = next;
    }
    Some(identifier)
}

/// True when the `{` at `block` opens the body of a function passed to `wrapper`, as in
/// `goog.scope(function() {`.
pub fn is_scope_wrapper_block(chain: &TokenChain, block: TokenId, wrapper: &str) -> bool {
    let expected = [
        TokenKind::EndParameters,
        TokenKind::StartParameters,
        TokenKind::FunctionDeclaration,
        TokenKind::StartParen,
    ];
    if !chain[block].is_kind(TokenKind::StartBlock) {
        return false;
    }
    let mut current = block;
    for kind in expected {
        match previous_code_token(chain, current) {
            Some(previous) if chain[previous].is_kind(kind) => current = previous,
            _ => return false,
        }
    }
    previous_code_token(chain, current).is_some_and(|previous| {
        chain[previous].is_kind(TokenKind::Identifier) && chain[previous].text == wrapper
    })
}

/// First token on the line of `token`.
pub fn first_in_line(chain: &TokenChain, token: TokenId) -> TokenId {
    chain.first_in_line(token)
}

/// Last token on the line of `token`.
pub fn last_in_line(chain: &TokenChain, token: TokenId) -> TokenId {
    chain.last_in_line(token)
}

/// Next token that is neither whitespace nor a blank line.
pub fn next_non_space_token(chain: &TokenChain, token: TokenId) -> Option<TokenId> {
    next_non_space(chain, token, Direction::Forward)
}

/// Previous token that is neither whitespace nor a blank line.
pub fn previous_non_space_token(chain: &TokenChain, token: TokenId) -> Option<TokenId> {
    next_non_space(chain, token, Direction::Backward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecma::lexing::tokenize;

    fn find(chain: &TokenChain, text: &str) -> TokenId {
        chain
            .iter()
            .find(|(_, t)| t.text == text)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn test_compare_orders_by_line_then_offset() {
        let chain = tokenize("a b\nc").chain;
        let (a, b, c) = (find(&chain, "a"), find(&chain, "b"), find(&chain, "c"));
        assert_eq!(compare(&chain, a, b), Ordering::Less);
        assert_eq!(compare(&chain, c, b), Ordering::Greater);
        assert_eq!(compare(&chain, a, a), Ordering::Equal);
    }

    #[test]
    fn test_search_respects_distance_and_abort() {
        let chain = tokenize("a ( b ) ;").chain;
        let a = find(&chain, "a");
        assert!(search(&chain, a, &[TokenKind::Semicolon], None, Direction::Forward).is_some());
        assert!(search(&chain, a, &[TokenKind::Semicolon], Some(3), Direction::Forward).is_none());
        assert!(search_until(
            &chain,
            a,
            &[TokenKind::Semicolon],
            &[TokenKind::EndParen],
            Direction::Forward
        )
        .is_none());
    }

    #[test]
    fn test_identifier_across_lines_and_comments() {
        let chain = tokenize("foo.bar.\n  /* x */ baz.qux;").chain;
        let first = find(&chain, "foo.bar");
        assert_eq!(
            get_identifier_for_token(&chain, first).as_deref(),
            Some("foo.bar.baz.qux")
        );
        let later = find(&chain, "baz.qux");
        assert_eq!(get_identifier_for_token(&chain, later), None);
        assert_eq!(get_identifier_start(&chain, later), Some(first));
    }

    #[test]
    fn test_identifier_with_separate_dot() {
        let chain = tokenize("a\n  .b();").chain;
        let a = find(&chain, "a");
        assert_eq!(get_identifier_for_token(&chain, a).as_deref(), Some("a.b"));
    }

    #[test]
    fn test_scope_wrapper_block() {
        let chain = tokenize("goog.scope(function() {\n});").chain;
        let open = find(&chain, "{");
        assert!(is_scope_wrapper_block(&chain, open, "goog.scope"));
        assert!(!is_scope_wrapper_block(&chain, open, "other.scope"));
    }
}
