//! Documentation comments and what they document.

use super::doc_flag::DocFlag;
use crate::ecma::navigation::next_code_token;
use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocCommentId(pub(crate) usize);

impl DocCommentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One step of the edit script turning documented parameters into declared ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Same name in both lists.
    Keep,
    /// A documented name differs from the declared one at that position.
    Substitute,
    /// A declared parameter is missing from the documentation.
    Insert,
    /// A documented parameter is not declared.
    Delete,
}

/// Result of [DocComment::compare_parameters].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDiff {
    pub distance: usize,
    pub edits: Vec<EditOp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub start: TokenId,
    /// Set at the closing `*/`.
    pub end: Option<TokenId>,
    flags: Vec<DocFlag>,
    inline_flags: Vec<DocFlag>,
    suppressions: BTreeSet<String>,
    invalidated: bool,
}

impl DocComment {
    pub fn new(start: TokenId) -> Self {
        Self {
            start,
            end: None,
            flags: Vec::new(),
            inline_flags: Vec::new(),
            suppressions: BTreeSet::new(),
            invalidated: false,
        }
    }

    /// Record a flag. A malformed flag invalidates the whole comment; `@suppress {a|b}`
    /// registers its suppressions.
    pub fn add_flag(&mut self, flag: DocFlag) {
        if flag.malformed {
            self.invalidated = true;
        }
        if flag.flag_type == "suppress" {
            if let Some(types) = &flag.type_text {
                self.suppressions.extend(
                    types
                        .split(['|', ','])
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string),
                );
            }
        }
        self.flags.push(flag);
    }

    pub fn add_inline_flag(&mut self, flag: DocFlag) {
        self.inline_flags.push(flag);
    }

    /// Checks derived from an invalidated comment are meaningless and must be skipped.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn flags(&self) -> &[DocFlag] {
        &self.flags
    }

    pub fn inline_flags(&self) -> &[DocFlag] {
        &self.inline_flags
    }

    pub fn has_flag(&self, flag_type: &str) -> bool {
        self.flags.iter().any(|flag| flag.flag_type == flag_type)
    }

    pub fn get_flag(&self, flag_type: &str) -> Option<&DocFlag> {
        self.flags.iter().find(|flag| flag.flag_type == flag_type)
    }

    /// Names of the `@param` flags in the order they are written.
    pub fn ordered_params(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|flag| flag.flag_type == "param")
            .filter_map(|flag| flag.name.as_deref())
            .collect()
    }

    pub fn suppressions(&self) -> &BTreeSet<String> {
        &self.suppressions
    }

    pub fn is_suppressed(&self, name: &str) -> bool {
        self.suppressions.contains(name)
    }

    /// The comment only carries `@suppress` flags.
    pub fn suppression_only(&self) -> bool {
        !self.flags.is_empty() && self.flags.iter().all(|flag| flag.flag_type == "suppress")
    }

    /// Documentation comes from a parent declaration.
    pub fn inherits_documentation(&self) -> bool {
        self.has_flag("inheritDoc") || self.has_flag("override")
    }

    /// The token this comment documents: the name in `var name`, `function name` or
    /// `name = ...` directly after the comment. File overviews document no token.
    pub fn target_token(&self, chain: &TokenChain) -> Option<TokenId> {
        if self.has_flag("fileoverview") {
            return None;
        }
        let mut current = chain.next(self.end?);
        while let Some(id) = current {
            let token = &chain[id];
            if token.is_any_of(&[
                TokenKind::FunctionName,
                TokenKind::Identifier,
                TokenKind::SimpleLvalue,
            ]) {
                return Some(id);
            }
            if token.is_keyword("var") || token.is_keyword("let") || token.is_keyword("const") {
                return next_code_token(chain, id).filter(|&next| {
                    chain[next].is_any_of(&[TokenKind::SimpleLvalue, TokenKind::Identifier])
                });
            }
            if token.is_kind(TokenKind::FunctionDeclaration) {
                return next_code_token(chain, id)
                    .filter(|&next| chain[next].is_kind(TokenKind::FunctionName));
            }
            if !(token.kind.is_non_code() || token.is_kind(TokenKind::StartParen)) {
                return None;
            }
            current = chain.next(id);
        }
        None
    }

    /// Full dotted name of [Self::target_token].
    pub fn target_identifier(&self, chain: &TokenChain) -> Option<String> {
        let target = self.target_token(chain)?;
        let token = &chain[target];
        match token.kind {
            TokenKind::FunctionName => Some(token.text.clone()),
            TokenKind::SimpleLvalue => token
                .value("identifier")
                .map(str::to_string)
                .or_else(|| Some(token.text.clone())),
            _ => crate::ecma::navigation::get_identifier_for_token(chain, target),
        }
    }

    /// Levenshtein distance and edit script from the documented parameters to `params`.
    ///
    /// Ties prefer deletion, then insertion, then substitution.
    pub fn compare_parameters(&self, params: &[String]) -> ParameterDiff {
        let source = self.ordered_params();
        let (rows, cols) = (source.len(), params.len());

        let mut distance = vec![vec![0usize; cols + 1]; rows + 1];
        let mut edits: Vec<Vec<Vec<EditOp>>> = vec![vec![Vec::new(); cols + 1]; rows + 1];
        for j in 1..=cols {
            distance[0][j] = j;
            edits[0][j] = vec![EditOp::Insert; j];
        }
        for i in 1..=rows {
            distance[i][0] = i;
            edits[i][0] = vec![EditOp::Delete; i];
        }

        for i in 0..rows {
            for j in 0..cols {
                let same = source[i] == params[j];
                let deletion = distance[i][j + 1] + 1;
                let insertion = distance[i + 1][j] + 1;
                let substitution = distance[i][j] + usize::from(!same);

                let (best, mut script, op) = if deletion <= insertion && deletion <= substitution {
                    (deletion, edits[i][j + 1].clone(), EditOp::Delete)
                } else if insertion <= substitution {
                    (insertion, edits[i + 1][j].clone(), EditOp::Insert)
                } else if same {
                    (substitution, edits[i][j].clone(), EditOp::Keep)
                } else {
                    (substitution, edits[i][j].clone(), EditOp::Substitute)
                };
                script.push(op);
                distance[i + 1][j + 1] = best;
                edits[i + 1][j + 1] = script;
            }
        }

        ParameterDiff {
            distance: distance[rows][cols],
            edits: std::mem::take(&mut edits[rows][cols]),
        }
    }
}
