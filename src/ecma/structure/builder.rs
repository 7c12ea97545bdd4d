//! The structural pass.
//!
//!     One forward walk over the chain. Each token first gets a [Metadata] entry, then the
//!     token-kind rules push or pop contexts, then the pass decides whether the statement
//!     ends after the token even though no `;` follows.
//!
//!     The context stack is the parent chain of the current context. A context is closed by
//!     popping it, which records the current token as its end.

use super::context::{ContextId, ContextKind, ContextTree};
use super::error::{ParseError, StructureError};
use super::metadata::{Metadata, OperatorType, UNARY_OK_OPERATORS, UNARY_OPERATORS, UNARY_POST_OPERATORS};
use crate::ecma::navigation::next_code_token;
use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use tracing::{debug, trace};

/// Keywords that open a declaration list.
const DECLARATION_KEYWORDS: [&str; 3] = ["var", "let", "const"];

/// Contexts a `,` stops at.
const COMMA_STOPS: [ContextKind; 6] = [
    ContextKind::Var,
    ContextKind::ArrayLiteral,
    ContextKind::ObjectLiteral,
    ContextKind::Statement,
    ContextKind::Parameters,
    ContextKind::Group,
];

pub struct MetaDataPass<'a> {
    chain: &'a TokenChain,
    tree: ContextTree,
    current: ContextId,
    token: TokenId,
    last_code: Option<TokenId>,
}

impl<'a> MetaDataPass<'a> {
    pub fn new(chain: &'a TokenChain) -> Self {
        let tree = ContextTree::new(chain.first());
        let root = tree.root();
        Self {
            chain,
            tree,
            current: root,
            token: chain.first(),
            last_code: None,
        }
    }

    /// Walk the whole chain. On a parse error the tree built so far is handed back inside
    /// the error.
    pub fn process(mut self) -> Result<ContextTree, StructureError> {
        for id in self.chain.ids() {
            self.token = id;
            if let Err(error) = self.process_token() {
                debug!(%error, line = self.chain[id].line_number, "structural parse error");
                self.tree.metadata.truncate(id.index());
                return Err(StructureError {
                    error,
                    partial: self.tree,
                });
            }
            if self.chain[id].is_code() {
                self.last_code = Some(id);
            }
        }
        self.close_at_eof();
        Ok(self.tree)
    }

    fn close_at_eof(&mut self) {
        self.token = self.chain.last();
        let open: Vec<ContextId> =
            std::iter::successors(Some(self.current), |&id| self.tree.parent(id))
                .filter(|&id| id != self.tree.root())
                .collect();
        if !open.is_empty() {
            debug!(count = open.len(), "closing contexts still open at end of file");
        }
        self.tree.closed_at_eof = open;
        // Popping the root is the expected way out.
        while self.pop_context().is_ok() {}
    }

    fn process_token(&mut self) -> Result<(), ParseError> {
        self.tree
            .metadata
            .push(Metadata::new(self.current, self.last_code));

        let closed = self.process_context()?;
        let context = closed.unwrap_or(self.current);
        self.meta_mut().context = context;

        let chain = self.chain;
        let token = &chain[self.token];
        if token.kind == TokenKind::Operator {
            let operator_type = self.operator_type();
            self.meta_mut().operator_type = Some(operator_type);
        }

        if token.kind != TokenKind::Semicolon && self.is_implied_semicolon() {
            self.meta_mut().is_implied_semicolon = true;
            self.end_statement()?;
        }
        Ok(())
    }

    /// Apply the token-kind rules. Returns the context closed by the token, if any; that
    /// context becomes the token's own context.
    fn process_context(&mut self) -> Result<Option<ContextId>, ParseError> {
        use ContextKind::*;

        let chain = self.chain;
        let token = &chain[self.token];

        let top = self.tree.kind(self.current);
        if top.is_block() {
            // Switch bodies hold case labels, never bare statements.
            if self.tree.parent_kind(self.current) != Some(Switch) {
                self.push(Statement);
            }
        } else if top == ArrayLiteral {
            self.push(LiteralElement);
        }

        match token.kind {
            TokenKind::StartBlockComment | TokenKind::StartSingleLineComment => {
                self.push(Comment);
            }
            TokenKind::StartDocComment => {
                self.push(Doc);
            }
            TokenKind::EndBlockComment => return self.pop_context_type(&[Comment]).map(Some),
            TokenKind::EndDocComment => return self.pop_context_type(&[Doc]).map(Some),

            TokenKind::StartParen => {
                let kind = if self.last_code.is_some_and(|code| chain[code].is_keyword("for")) {
                    ForGroupBlock
                } else {
                    Group
                };
                self.push(kind);
            }
            TokenKind::EndParen => {
                let group = self.pop_context_type(&[Group, ForGroupBlock])?;
                self.open_implied_block_after_condition(group);
                return Ok(Some(group));
            }
            TokenKind::Keyword if token.text == "else" => {
                let opens_block = next_code_token(chain, self.token).is_some_and(|next| {
                    chain[next].is_kind(TokenKind::StartBlock) || chain[next].is_keyword("if")
                });
                if !opens_block {
                    self.push(ImpliedBlock);
                    self.meta_mut().is_implied_block = true;
                }
            }

            TokenKind::StartParameters => {
                self.push(Parameters);
            }
            TokenKind::EndParameters => return self.pop_context_type(&[Parameters]).map(Some),

            TokenKind::StartBracket => {
                let after_value = self
                    .last_code
                    .is_some_and(|code| chain[code].kind.is_expression_ender());
                self.push(if after_value { Index } else { ArrayLiteral });
            }
            TokenKind::EndBracket => return self.pop_context_type(&[Index, ArrayLiteral]).map(Some),

            TokenKind::StartBlock => {
                let kind = if self.opens_code_block() { Block } else { ObjectLiteral };
                self.push(kind);
            }
            TokenKind::EndBlock => {
                let closed = self.pop_context_type(&[Block, ObjectLiteral])?;
                // A switch ends with its body.
                if self.tree.kind(self.current) == Switch {
                    return self.pop_context().map(Some);
                }
                return Ok(Some(closed));
            }

            TokenKind::Keyword if token.text == "switch" => {
                self.push(Switch);
            }
            TokenKind::Keyword
                if matches!(token.text.as_str(), "case" | "default")
                    && self.tree.kind(self.current) != ObjectLiteral =>
            {
                // Pop up to, but not including, the switch body.
                loop {
                    match self.tree.parent(self.current) {
                        None => return Err(ParseError::CaseWithoutSwitch { token: self.token }),
                        Some(parent) if self.tree.kind(parent) == Switch => break,
                        Some(_) => {
                            self.pop_context()?;
                        }
                    }
                }
            }

            TokenKind::Operator if token.text == "?" => {
                self.push(TernaryTrue);
            }
            TokenKind::Operator if token.text == ":" => {
                let current = self.tree.kind(self.current);
                let parent = self.tree.parent_kind(self.current);
                if current == ObjectLiteral {
                    self.push(LiteralElement);
                } else if current == TernaryTrue {
                    self.pop_context()?;
                    self.push(TernaryFalse);
                } else if current == TernaryFalse && parent == Some(TernaryTrue) {
                    // `a ? b ? 1 : 2 : 3`: leave the inner false branch and the outer true
                    // branch.
                    self.pop_context()?;
                    self.pop_context()?;
                    self.push(TernaryFalse);
                } else if parent == Some(Switch) {
                    self.push(CaseBlock);
                }
            }

            TokenKind::Keyword if DECLARATION_KEYWORDS.contains(&token.text.as_str()) => {
                self.push(Var);
            }
            TokenKind::Operator if token.text == "," => {
                while !COMMA_STOPS.contains(&self.tree.kind(self.current)) {
                    self.pop_context()?;
                }
            }
            TokenKind::Semicolon => self.end_statement()?,
            _ => {}
        }

        if self.closes_line_comment() {
            return self.pop_context().map(Some);
        }
        Ok(None)
    }

    /// After the `)` of `if (...)`, `for (...)` or `while (...)` without a following `{`,
    /// the next statement is an implied block. The `while` of a `do {} while (...)` is not.
    fn open_implied_block_after_condition(&mut self, group: ContextId) {
        let chain = self.chain;
        let open = self.tree[group].start;
        let Some(keyword) = self.tree.metadata(open).and_then(|meta| meta.last_code) else {
            return;
        };
        if !["if", "for", "while"].iter().any(|k| chain[keyword].is_keyword(k)) {
            return;
        }
        let next_is_block = next_code_token(chain, self.token)
            .is_some_and(|next| chain[next].is_kind(TokenKind::StartBlock));
        if next_is_block || self.is_do_while(keyword) {
            return;
        }
        self.push(ContextKind::ImpliedBlock);
        self.meta_mut().is_implied_block = true;
    }

    fn is_do_while(&self, keyword: TokenId) -> bool {
        let chain = self.chain;
        let Some(before) = self.tree.metadata(keyword).and_then(|meta| meta.last_code) else {
            return false;
        };
        if !chain[before].is_kind(TokenKind::EndBlock) {
            return false;
        }
        self.tree
            .context_of(before)
            .map(|block| self.tree[block].start)
            .and_then(|start| self.tree.metadata(start))
            .and_then(|meta| meta.last_code)
            .is_some_and(|code| chain[code].is_keyword("do"))
    }

    /// Whether the `{` being processed opens a code block rather than an object literal.
    fn opens_code_block(&self) -> bool {
        let Some(code) = self.last_code else {
            return true;
        };
        let previous = &self.chain[code];
        previous.is_any_of(&[TokenKind::EndParen, TokenKind::EndParameters])
            || ["else", "do", "try", "finally"]
                .iter()
                .any(|keyword| previous.is_keyword(keyword))
            || previous.is_operator("=>")
            || (previous.is_operator(":")
                && self.tree.context_of(code).map(|id| self.tree.kind(id))
                    == Some(ContextKind::CaseBlock))
    }

    fn closes_line_comment(&self) -> bool {
        let top = &self.tree[self.current];
        top.kind == ContextKind::Comment
            && self.chain[top.start].is_kind(TokenKind::StartSingleLineComment)
            && self.chain.is_last_in_line(self.token)
    }

    fn operator_type(&self) -> OperatorType {
        let chain = self.chain;
        let text = chain[self.token].text.as_str();
        if text == "?" {
            return OperatorType::Ternary;
        }
        if UNARY_OPERATORS.contains(&text) {
            return OperatorType::Unary;
        }
        let Some(code) = self.last_code else {
            return OperatorType::Unary;
        };
        let previous = &chain[code];
        if previous.is_kind(TokenKind::EndBlock) {
            return OperatorType::Unary;
        }
        let after_value = previous.kind.is_expression_ender();
        if UNARY_POST_OPERATORS.contains(&text) && after_value {
            return OperatorType::UnaryPost;
        }
        if UNARY_OK_OPERATORS.contains(&text)
            && !after_value
            && !UNARY_POST_OPERATORS.contains(&previous.text.as_str())
        {
            return OperatorType::Unary;
        }
        OperatorType::Binary
    }

    fn statement_could_end(&self) -> bool {
        match self.tree.kind(self.current) {
            ContextKind::Statement | ContextKind::Var => true,
            ContextKind::TernaryFalse => matches!(
                self.tree.parent_kind(self.current),
                Some(ContextKind::Statement | ContextKind::Var)
            ),
            _ => false,
        }
    }

    fn is_implied_semicolon(&self) -> bool {
        let chain = self.chain;
        let token = &chain[self.token];
        if !token.is_code() {
            return false;
        }
        let next_code = next_code_token(chain, self.token).map(|id| &chain[id]);
        let is_last_code_in_line = next_code.map_or(true, |next| next.line_number != token.line_number);
        if !is_last_code_in_line || !self.statement_could_end() {
            return false;
        }

        let meta = self.meta();
        let is_multiline_string = token.kind == TokenKind::StringText;
        let is_end_of_block = token.kind == TokenKind::EndBlock
            && self.tree.kind(meta.context) != ContextKind::ObjectLiteral;
        let is_continued_declaration = token.kind == TokenKind::Keyword
            && DECLARATION_KEYWORDS.contains(&token.text.as_str())
            && next_code.is_some_and(|next| {
                next.is_any_of(&[TokenKind::Identifier, TokenKind::SimpleLvalue])
                    && token.line_number < next.line_number
            });
        let is_continued_operator =
            token.kind == TokenKind::Operator && !meta.is_unary_post_operator();
        let is_continued_dot = token.text == ".";
        let next_is_operator = next_code.is_some_and(|next| next.kind == TokenKind::Operator);
        let next_is_block = next_code.is_some_and(|next| next.kind == TokenKind::StartBlock);

        !(is_multiline_string
            || is_end_of_block
            || is_continued_declaration
            || is_continued_operator
            || is_continued_dot
            || next_is_operator
            || next_is_block)
    }

    /// Close the current statement; a statement that was the body of an implied block
    /// closes the block too.
    fn end_statement(&mut self) -> Result<(), ParseError> {
        self.pop_context_type(&[ContextKind::Statement])?;
        if self.tree.kind(self.current) == ContextKind::ImpliedBlock {
            self.meta_mut().is_implied_block_close = true;
            self.pop_context()?;
        }
        Ok(())
    }

    fn push(&mut self, kind: ContextKind) -> ContextId {
        let id = self.tree.add(kind, self.token, self.current);
        trace!(%kind, token = %self.token, "open context");
        self.current = id;
        id
    }

    fn pop_context(&mut self) -> Result<ContextId, ParseError> {
        let top = self.current;
        let context = &mut self.tree.contexts[top.index()];
        context.end.get_or_insert(self.token);
        trace!(kind = %context.kind, token = %self.token, "close context");
        match context.parent {
            Some(parent) => {
                self.current = parent;
                Ok(top)
            }
            None => Err(ParseError::RootReached { token: self.token }),
        }
    }

    /// Pop until a context of one of `kinds` has been popped, and return it.
    fn pop_context_type(&mut self, kinds: &[ContextKind]) -> Result<ContextId, ParseError> {
        loop {
            let popped = self.pop_context()?;
            if kinds.contains(&self.tree.kind(popped)) {
                return Ok(popped);
            }
        }
    }

    fn meta(&self) -> &Metadata {
        &self.tree.metadata[self.token.index()]
    }

    fn meta_mut(&mut self) -> &mut Metadata {
        &mut self.tree.metadata[self.token.index()]
    }
}

/// Run the structural pass over a chain.
pub fn build_contexts(chain: &TokenChain) -> Result<ContextTree, StructureError> {
    MetaDataPass::new(chain).process()
}
