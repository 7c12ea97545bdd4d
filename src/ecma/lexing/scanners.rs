//! Hand-written scanners for comment text.
//!
//!     Comment bodies run until `*/`, which needs a "star not followed by slash" rule. Each
//!     scanner walks characters greedily and returns the matched byte length, or `None` when
//!     nothing matched.

/// Text inside a block comment, up to `*/`.
pub fn block_comment_text(line: &str, at: usize) -> Option<usize> {
    let rest = &line[at..];
    let len = rest.find("*/").unwrap_or(rest.len());
    (len > 0).then_some(len)
}

/// Free text of a doc comment. An `@` directly after a non-space character is part of the
/// text, so flags are only recognized at line start or after whitespace.
pub fn doc_comment_text(line: &str, at: usize) -> Option<usize> {
    scan_doc_text(line, at, true)
}

/// Doc text right after a space-lexed flag: like [doc_comment_text] but stops at whitespace.
pub fn doc_comment_no_spaces_text(line: &str, at: usize) -> Option<usize> {
    scan_doc_text(line, at, false)
}

fn scan_doc_text(line: &str, at: usize, allow_spaces: bool) -> Option<usize> {
    let rest = &line[at..];
    let mut chars = rest.char_indices().peekable();
    let mut end = 0;
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let plain = !matches!(c, '*' | '{' | '}');
        if plain && !c.is_whitespace() && next == Some('@') {
            chars.next();
            end = i + c.len_utf8() + 1;
        } else if plain && c != '@' && (allow_spaces || !c.is_whitespace()) {
            end = i + c.len_utf8();
        } else if c == '*' && next != Some('/') {
            end = i + 1;
        } else {
            break;
        }
    }
    (end > 0).then_some(end)
}

/// Words inside a doc type expression.
pub fn doc_type_text(line: &str, at: usize) -> Option<usize> {
    let rest = &line[at..];
    let mut chars = rest.char_indices().peekable();
    let mut end = 0;
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let accepted = match c {
            '*' => next != Some('/'),
            '|' | '!' | '?' | '=' | '<' | '>' | '(' | ')' | '{' | '}' | ':' | ',' => false,
            c => !c.is_whitespace(),
        };
        if !accepted {
            break;
        }
        end = i + c.len_utf8();
    }
    (end > 0).then_some(end)
}

/// The ` * ` prefix that starts a doc comment line. Does not match the closing ` */`.
pub fn doc_prefix(line: &str, at: usize) -> Option<usize> {
    let rest = &line[at..];
    let star = rest.len() - rest.trim_start().len();
    if !rest[star..].starts_with('*') {
        return None;
    }
    let after = &rest[star + 1..];
    let spaces = after.len() - after.trim_start().len();
    if spaces == 0 && after.starts_with('/') {
        return None;
    }
    Some(star + 1 + spaces)
}
