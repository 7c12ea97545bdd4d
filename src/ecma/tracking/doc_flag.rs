//! Documentation flags (`@param {string} name Description.`).
//!
//!     A flag is parsed by scanning forward from its DOC_FLAG token. The scan never goes past
//!     the next flag or the end of the comment. The type is either brace delimited
//!     (`{Array.<string>}`, nesting aware) or, for type-only flags, a bare word on the same
//!     line. A brace that never closes before the flag ends makes the flag malformed.

use crate::ecma::navigation::{search_until, Direction};
use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Flags of the standard documentation catalogue.
pub const STANDARD_FLAGS: &[&str] = &[
    "author", "bug", "classTemplate", "consistentIdGenerator", "const", "constructor", "define",
    "deprecated", "dict", "enum", "export", "expose", "extends", "externs", "fileoverview",
    "idGenerator", "implements", "implicitCast", "interface", "lends", "license", "ngInject",
    "owner", "nocompile", "nosideeffects", "override", "package", "param", "polymerBehavior",
    "preserve", "private", "protected", "public", "record", "return", "see", "stableIdGenerator",
    "struct", "supported", "template", "this", "type", "typedef", "unrestricted",
];

/// Flags that change how the compiler treats the code rather than documenting it.
pub const ANNOTATION_FLAGS: &[&str] = &["preserveTry", "suppress"];

/// Flags only meaningful in the JavaScript dialect.
pub const EXTENDED_FLAGS: &[&str] = &[
    "class", "code", "desc", "final", "hidden", "inheritDoc", "link", "meaning", "provideGoog",
    "throws",
];

/// Flags that take a free-text description.
pub const HAS_DESCRIPTION: &[&str] = &[
    "define", "deprecated", "desc", "fileoverview", "license", "param", "preserve", "return",
    "supported",
];

/// Flags that take a type.
pub const HAS_TYPE: &[&str] = &[
    "const", "define", "enum", "export", "extends", "final", "implements", "mods", "package",
    "param", "private", "protected", "public", "return", "suppress", "type", "typedef",
];

/// Flags whose type may be omitted.
pub const CAN_OMIT_TYPE: &[&str] = &[
    "const", "enum", "export", "final", "package", "private", "protected", "public", "suppress",
];

/// Flags that take a type and nothing else; the type may be written without braces.
pub const TYPE_ONLY: &[&str] = &[
    "const", "enum", "extends", "implements", "package", "suppress", "type",
];

/// Flags that take a name.
pub const HAS_NAME: &[&str] = &["param"];

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z_$](?:[a-zA-Z0-9_$]|\.[a-zA-Z_$])*").unwrap());

/// A doc comment line with nothing but the prefix.
static EMPTY_COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*?\s*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFlag {
    pub flag_token: TokenId,
    /// Flag name without `@`.
    pub flag_type: String,
    pub type_text: Option<String>,
    pub type_start: Option<TokenId>,
    pub type_end: Option<TokenId>,
    pub name: Option<String>,
    pub name_token: Option<TokenId>,
    pub description: Option<String>,
    pub description_start: Option<TokenId>,
    pub description_end: Option<TokenId>,
    /// The type expression never closed.
    pub malformed: bool,
}

impl DocFlag {
    pub fn parse(chain: &TokenChain, flag_token: TokenId) -> Self {
        let token = &chain[flag_token];
        let flag_type = token
            .value("name")
            .map(str::to_string)
            .unwrap_or_else(|| token.text.trim_start_matches('@').to_string());

        let mut flag = DocFlag {
            flag_token,
            flag_type,
            type_text: None,
            type_start: None,
            type_end: None,
            name: None,
            name_token: None,
            description: None,
            description_start: None,
            description_end: None,
            malformed: false,
        };
        flag.parse_type(chain);
        flag.parse_name(chain);
        flag.parse_description(chain);
        flag
    }

    fn parse_type(&mut self, chain: &TokenChain) {
        if !HAS_TYPE.contains(&self.flag_type.as_str()) {
            return;
        }
        let brace = search_until(
            chain,
            self.flag_token,
            &[TokenKind::DocStartBrace],
            &[TokenKind::DocFlag, TokenKind::EndDocComment],
            Direction::Forward,
        );
        if let Some(start) = brace {
            match matching_brace(chain, start) {
                Some((end, text)) => {
                    self.type_start = Some(start);
                    self.type_end = Some(end);
                    self.type_text = Some(text);
                }
                None => self.malformed = true,
            }
        } else if TYPE_ONLY.contains(&self.flag_type.as_str()) {
            self.parse_bare_type(chain);
        }
    }

    /// `@const string` style: the next word on the flag's line.
    fn parse_bare_type(&mut self, chain: &TokenChain) {
        let line = chain[self.flag_token].line_number;
        let mut current = self.flag_token;
        while let Some(next) = chain.next(current) {
            let token = &chain[next];
            if token.line_number != line || token.kind.is_flag_ending() {
                return;
            }
            if token.is_kind(TokenKind::Comment) && !token.text.trim().is_empty() {
                self.type_start = Some(next);
                self.type_end = Some(next);
                self.type_text = Some(token.text.trim().to_string());
                return;
            }
            current = next;
        }
    }

    fn parse_name(&mut self, chain: &TokenChain) {
        if !HAS_NAME.contains(&self.flag_type.as_str()) {
            return;
        }
        let mut found = self.next_identifier(chain, self.flag_token);
        // A name written before the type (`@param name {type}`) is not the name.
        let before_type = match (&found, self.type_start) {
            (Some((token, _)), Some(type_start)) => *token < type_start,
            _ => false,
        };
        if before_type {
            found = self.type_end.and_then(|end| self.next_identifier(chain, end));
        }
        if let Some((token, name)) = found {
            self.name_token = Some(token);
            self.name = Some(name);
        }
    }

    fn next_identifier(&self, chain: &TokenChain, from: TokenId) -> Option<(TokenId, String)> {
        let mut current = from;
        while let Some(next) = chain.next(current) {
            let token = &chain[next];
            if token.kind.is_flag_ending() {
                return None;
            }
            let inside_type = self
                .type_start
                .zip(self.type_end)
                .is_some_and(|(start, end)| start <= next && next <= end);
            if token.is_kind(TokenKind::Comment) && !inside_type {
                if let Some(found) = IDENTIFIER.find(&token.text) {
                    return Some((next, found.as_str().to_string()));
                }
            }
            current = next;
        }
        None
    }

    fn parse_description(&mut self, chain: &TokenChain) {
        if !HAS_DESCRIPTION.contains(&self.flag_type.as_str()) {
            return;
        }
        let search_from = self
            .name_token
            .or(self.type_end)
            .unwrap_or(self.flag_token);

        let mut current = search_from;
        let start = loop {
            let Some(next) = chain.next(current) else {
                return;
            };
            let token = &chain[next];
            if token.kind.is_flag_ending() {
                return;
            }
            if token.kind.is_flag_description() && !token.text.trim().is_empty() {
                break next;
            }
            current = next;
        };

        let (end, text) = description_extent(chain, start);
        self.description_start = Some(start);
        self.description_end = Some(end);
        self.description = Some(text);
    }

    /// Whether the flag is known, counting configured custom tags.
    pub fn is_legal(&self, custom_tags: &[String]) -> bool {
        let name = self.flag_type.as_str();
        STANDARD_FLAGS.contains(&name)
            || ANNOTATION_FLAGS.contains(&name)
            || EXTENDED_FLAGS.contains(&name)
            || custom_tags.iter().any(|tag| tag == name)
    }

    pub fn has_type(&self) -> bool {
        self.type_text.is_some()
    }

    pub fn can_omit_type(&self) -> bool {
        CAN_OMIT_TYPE.contains(&self.flag_type.as_str())
    }
}

/// Find the `}` closing the type brace at `start`, skipping doc prefixes and counting nested
/// braces. Returns the closing token and the type text in between.
fn matching_brace(chain: &TokenChain, start: TokenId) -> Option<(TokenId, String)> {
    let mut depth = 1;
    let mut text = String::new();
    let mut current = start;
    while let Some(next) = chain.next(current) {
        let token = &chain[next];
        match token.kind {
            kind if kind.is_flag_ending() => return None,
            TokenKind::DocStartBrace => depth += 1,
            TokenKind::DocEndBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some((next, text.trim().to_string()));
                }
            }
            TokenKind::DocPrefix | TokenKind::BlankLine => {
                current = next;
                continue;
            }
            _ => {}
        }
        text.push_str(&token.text);
        current = next;
    }
    None
}

/// Description text from `start` until a blank comment line, a closing inline-flag brace at
/// depth zero, or the end of the flag.
fn description_extent(chain: &TokenChain, start: TokenId) -> (TokenId, String) {
    let mut text = String::new();
    let mut end = start;
    let mut depth = 0usize;
    let mut current = Some(start);
    while let Some(id) = current {
        let token = &chain[id];
        if token.kind.is_flag_ending() {
            break;
        }
        if token.line_number != chain[end].line_number
            && EMPTY_COMMENT_LINE.is_match(chain.line_text(id))
        {
            break;
        }
        match token.kind {
            TokenKind::DocStartBrace => depth += 1,
            TokenKind::DocEndBrace if depth == 0 => break,
            TokenKind::DocEndBrace => depth -= 1,
            _ => {}
        }
        if token.kind != TokenKind::DocPrefix {
            if token.line_number != chain[end].line_number && !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&token.text);
            if !token.text.trim().is_empty() {
                end = id;
            }
        }
        current = chain.next(id);
    }
    (end, collapse_spaces(&text))
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
