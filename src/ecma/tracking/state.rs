//! The forward state pass.
//!
//!     The runner calls [StateTracker::handle_token] before a token is checked and
//!     [StateTracker::handle_after_token] once checking is done, so rules always see the
//!     state as of "just entered this token". Functions and doc comments live in arenas;
//!     the stacks hold ids.
//!
//! Scope
//!
//!     Locally declared names are pushed on a single stack. Opening a function pushes a
//!     boundary marker and closing it unwinds the stack down to that marker.

use super::dialect::{Dialect, JavaScript};
use super::doc_comment::{DocComment, DocCommentId};
use super::doc_flag::DocFlag;
use super::function::{Function, FunctionId};
use crate::ecma::checking::{ErrorCode, ErrorSink, Finding};
use crate::ecma::navigation::{
    get_identifier_for_token, get_identifier_start, next_code_token, search_until, Direction,
};
use crate::ecma::structure::{ContextKind, ContextTree};
use crate::ecma::token::{TokenChain, TokenId, TokenKind};
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Code,
    ObjectLiteral,
}

/// Coarse position of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InDocComment,
    /// `depth` open functions.
    InFunction { depth: usize },
    /// Inside `depth` blocks, outside any function.
    InBlock { depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScopeEntry {
    FunctionBoundary,
    Variable(String),
}

/// Everything the tracker knows at the current token. Fresh for every file.
#[derive(Debug, Clone, Default)]
pub struct ScopeState {
    block_depth: usize,
    is_block_close: bool,
    paren_depth: usize,
    block_types: Vec<BlockType>,

    functions: Vec<Function>,
    function_stack: Vec<FunctionId>,
    functions_by_name: HashMap<String, FunctionId>,

    doc_comments: Vec<DocComment>,
    doc_comment: Option<DocCommentId>,
    last_comment: Option<TokenId>,
    documented_identifiers: HashSet<String>,

    cumulative_params: String,
    variables_in_scope: Vec<ScopeEntry>,

    last_non_space_token: Option<TokenId>,
    last_line: Option<usize>,
}

impl ScopeState {
    pub fn block_depth(&self) -> usize {
        self.block_depth
    }

    pub fn paren_depth(&self) -> usize {
        self.paren_depth
    }

    /// The current token closed a block.
    pub fn is_block_close(&self) -> bool {
        self.is_block_close
    }

    pub fn function_depth(&self) -> usize {
        self.function_stack.len()
    }

    /// The innermost open function.
    pub fn function(&self) -> Option<&Function> {
        self.function_stack.last().map(|&id| &self.functions[id.0])
    }

    fn function_mut(&mut self) -> Option<&mut Function> {
        let id = *self.function_stack.last()?;
        Some(&mut self.functions[id.0])
    }

    /// Parameter names from the parameter list read so far.
    pub fn params(&self) -> Vec<String> {
        let compact: String = self
            .cumulative_params
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        compact
            .split(',')
            .filter(|param| !param.is_empty())
            .map(|param| param.split(':').next().unwrap_or(param).to_string())
            .collect()
    }
}

pub struct StateTracker<'a, D: Dialect = JavaScript> {
    chain: &'a TokenChain,
    tree: &'a ContextTree,
    dialect: D,
    state: ScopeState,
}

impl<'a> StateTracker<'a, JavaScript> {
    pub fn new(chain: &'a TokenChain, tree: &'a ContextTree) -> Self {
        Self::with_dialect(chain, tree, JavaScript::default())
    }
}

impl<'a, D: Dialect> StateTracker<'a, D> {
    pub fn with_dialect(chain: &'a TokenChain, tree: &'a ContextTree, dialect: D) -> Self {
        Self {
            chain,
            tree,
            dialect,
            state: ScopeState::default(),
        }
    }

    pub fn state(&self) -> &ScopeState {
        &self.state
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    fn last_code(&self, token: TokenId) -> Option<TokenId> {
        match self.tree.metadata(token) {
            Some(meta) => meta.last_code,
            None => crate::ecma::navigation::previous_code_token(self.chain, token),
        }
    }

    /// Update the state on entering `token`.
    pub fn handle_token(&mut self, token: TokenId) {
        self.dialect.handle_token(self.chain, token, &self.state);
        self.state.is_block_close = false;

        let chain = self.chain;
        let current = &chain[token];
        match current.kind {
            TokenKind::StartBlock => {
                self.state.block_depth += 1;
                let block_type = self.dialect.block_type(self.tree, token);
                self.state.block_types.push(block_type);
                if self.is_function_open() {
                    let params = self.state.params();
                    self.state
                        .variables_in_scope
                        .extend(params.iter().cloned().map(ScopeEntry::Variable));
                    if let Some(function) = self.state.function_mut() {
                        function.parameters = params;
                    }
                }
            }
            TokenKind::EndBlock => {
                self.state.is_block_close = !self.in_object_literal();
                self.state.block_depth = self.state.block_depth.saturating_sub(1);
                self.state.block_types.pop();
            }
            TokenKind::StartParen => self.state.paren_depth += 1,
            TokenKind::EndParen => {
                self.state.paren_depth = self.state.paren_depth.saturating_sub(1);
            }
            TokenKind::Comment => self.state.last_comment = Some(token),
            TokenKind::StartDocComment => {
                let id = DocCommentId(self.state.doc_comments.len());
                self.state.doc_comments.push(DocComment::new(token));
                self.state.doc_comment = Some(id);
                self.state.last_comment = Some(token);
            }
            TokenKind::EndDocComment => {
                if let Some(doc) = self.doc_comment_mut() {
                    doc.end = Some(token);
                }
            }
            TokenKind::DocFlag => {
                let flag = DocFlag::parse(chain, token);
                if let Some(doc) = self.doc_comment_mut() {
                    doc.add_flag(flag);
                }
            }
            TokenKind::DocInlineFlag => {
                let flag = DocFlag::parse(chain, token);
                if let Some(doc) = self.doc_comment_mut() {
                    doc.add_inline_flag(flag);
                }
            }
            TokenKind::FunctionDeclaration => self.open_function(token),
            TokenKind::StartParameters => self.state.cumulative_params.clear(),
            TokenKind::Parameters => self.state.cumulative_params.push_str(&current.text),
            TokenKind::Keyword => self.handle_keyword(token),
            TokenKind::SimpleLvalue => {
                let identifier = current.value("identifier").unwrap_or(&current.text);
                if self.state.doc_comment.is_some() {
                    self.state.documented_identifiers.insert(identifier.to_string());
                }
                self.declare_listed_variable(token, identifier);
                self.handle_identifier(identifier);
            }
            TokenKind::Identifier => {
                self.declare_listed_variable(token, &current.text);
                self.handle_identifier(&current.text);
                // `/** @type {number} */ foo.bar;` documents without assigning.
                let documented = self
                    .state
                    .last_non_space_token
                    .is_some_and(|last| chain[last].is_kind(TokenKind::EndDocComment));
                let ends_statement = next_code_token(chain, token)
                    .is_some_and(|next| chain[next].is_kind(TokenKind::Semicolon));
                if documented && ends_statement {
                    self.state.documented_identifiers.insert(current.text.clone());
                }
            }
            _ => {}
        }
    }

    fn handle_keyword(&mut self, token: TokenId) {
        let chain = self.chain;
        let current = &chain[token];
        match current.text.as_str() {
            "return" => {
                let bare = next_code_token(chain, token)
                    .is_some_and(|next| chain[next].is_kind(TokenKind::Semicolon));
                if !bare {
                    if let Some(function) = self.state.function_mut() {
                        function.has_return = true;
                    }
                }
            }
            "throw" => {
                if let Some(function) = self.state.function_mut() {
                    function.has_throw = true;
                }
            }
            "var" | "let" | "const" => {
                let declared = next_code_token(chain, token).and_then(|next| {
                    let next = &chain[next];
                    match next.kind {
                        TokenKind::SimpleLvalue => {
                            Some(next.value("identifier").unwrap_or(&next.text).to_string())
                        }
                        TokenKind::Identifier => Some(next.text.clone()),
                        _ => None,
                    }
                });
                if let Some(name) = declared {
                    self.state.variables_in_scope.push(ScopeEntry::Variable(name));
                }
            }
            _ => {}
        }
    }

    /// `b` in `var a = 1, b;` is declared by the comma, not the keyword.
    fn declare_listed_variable(&mut self, token: TokenId, name: &str) {
        let listed = self.last_code(token).is_some_and(|comma| {
            self.chain[comma].is_operator(",")
                && self
                    .tree
                    .context_of(comma)
                    .is_some_and(|context| self.tree.kind(context) == ContextKind::Var)
        });
        if listed {
            self.state
                .variables_in_scope
                .push(ScopeEntry::Variable(name.to_string()));
        }
    }

    fn handle_identifier(&mut self, identifier: &str) {
        if identifier == "this" || identifier.starts_with("this.") {
            if let Some(function) = self.state.function_mut() {
                function.has_this = true;
            }
        }
    }

    fn open_function(&mut self, token: TokenId) {
        let chain = self.chain;
        let last_code = self.last_code(token);
        let doc = self
            .state
            .doc_comment
            .filter(|_| self.dialect.in_top_level(&self.state));

        let is_assigned = last_code.is_some_and(|code| {
            let code = &chain[code];
            code.is_operator("=")
                || code.is_operator("||")
                || code.is_operator("&&")
                || (code.is_operator(":") && !self.in_object_literal())
        });

        let name = if is_assigned {
            last_code
                .and_then(|code| assigned_name(chain, code))
                .unwrap_or_default()
        } else {
            declared_name(chain, token)
        };

        let mut function = Function::new(name, self.state.block_depth, is_assigned, token);
        if let Some(doc) = doc {
            let comment = &self.state.doc_comments[doc.0];
            function.is_constructor = comment.has_flag("constructor");
            function.is_interface = comment.has_flag("interface");
            function.doc = Some(doc);
        }
        trace!(name = %function.name, depth = function.block_depth, "function opened");

        let id = FunctionId(self.state.functions.len());
        self.state
            .functions_by_name
            .insert(function.name.clone(), id);
        self.state.functions.push(function);
        self.state.function_stack.push(id);
        self.state.variables_in_scope.push(ScopeEntry::FunctionBoundary);
    }

    /// Update the state once checking of `token` is done.
    pub fn handle_after_token(&mut self, token: TokenId) {
        let chain = self.chain;
        let current = &chain[token];
        match current.kind {
            TokenKind::Semicolon | TokenKind::EndParen => self.clear_comments(),
            TokenKind::EndBracket => {
                // `x['exported'] = ...` keeps the pending doc.
                let after_string = self
                    .state
                    .last_non_space_token
                    .is_some_and(|last| chain[last].kind.is_string_end());
                if !after_string {
                    self.clear_comments();
                }
            }
            TokenKind::EndBlock => {
                self.clear_comments();
                if self.is_function_close() {
                    self.close_function(token);
                }
            }
            TokenKind::EndParameters => {
                if self.state.doc_comment.is_some() {
                    self.clear_comments();
                }
            }
            _ => {}
        }

        if !current.is_any_of(&[TokenKind::Whitespace, TokenKind::BlankLine]) {
            self.state.last_non_space_token = Some(token);
        }
        self.state.last_line = Some(current.line_number);
    }

    fn clear_comments(&mut self) {
        self.state.doc_comment = None;
        self.state.last_comment = None;
    }

    fn close_function(&mut self, token: TokenId) {
        let Some(id) = self.state.function_stack.pop() else {
            return;
        };
        let function = &mut self.state.functions[id.0];
        function.end = Some(token);
        trace!(name = %function.name, "function closed");
        while let Some(entry) = self.state.variables_in_scope.pop() {
            if entry == ScopeEntry::FunctionBoundary {
                break;
            }
        }
    }

    fn doc_comment_mut(&mut self) -> Option<&mut DocComment> {
        let id = self.state.doc_comment?;
        self.state.doc_comments.get_mut(id.0)
    }

    /// Report file level problems once every token was handled.
    pub fn finalize(&self, sink: &mut dyn ErrorSink) {
        if self.chain.ends_with_newline() {
            return;
        }
        // Trailing whitespace after the last newline is not a missing newline.
        let last_line_blank = self
            .chain
            .lines()
            .last()
            .is_some_and(|line| line.text.trim().is_empty());
        if last_line_blank {
            return;
        }
        if let Some(last) = self.state.last_non_space_token {
            sink.handle_error(Finding::new(
                ErrorCode::FILE_MISSING_NEWLINE,
                "File does not end with new line.",
                Some(last),
            ));
        }
    }

    pub fn in_function(&self) -> bool {
        !self.state.function_stack.is_empty()
    }

    pub fn function(&self) -> Option<&Function> {
        self.state.function()
    }

    pub fn function_by_name(&self, name: &str) -> Option<&Function> {
        self.state
            .functions_by_name
            .get(name)
            .map(|&id| &self.state.functions[id.0])
    }

    /// Every function seen so far, in declaration order.
    pub fn functions(&self) -> &[Function] {
        &self.state.functions
    }

    pub fn in_constructor(&self) -> bool {
        self.function().is_some_and(|function| function.is_constructor)
    }

    /// Inside an `@interface` function, or a prototype method of one.
    pub fn in_interface_method(&self) -> bool {
        let Some(function) = self.function() else {
            return false;
        };
        if function.is_interface {
            return true;
        }
        function
            .class_name()
            .and_then(|class| self.function_by_name(class))
            .is_some_and(|class| class.is_interface)
    }

    pub fn in_top_level(&self) -> bool {
        self.dialect.in_top_level(&self.state)
    }

    pub fn in_top_level_function(&self) -> bool {
        self.state.function_stack.len() == 1 && self.in_top_level()
    }

    pub fn in_assigned_function(&self) -> bool {
        self.function().is_some_and(|function| function.is_assigned)
    }

    /// The current token opened the body of the innermost function.
    pub fn is_function_open(&self) -> bool {
        self.function()
            .is_some_and(|function| function.block_depth + 1 == self.state.block_depth)
    }

    /// The current token closes the body of the innermost function.
    pub fn is_function_close(&self) -> bool {
        self.function()
            .is_some_and(|function| function.block_depth == self.state.block_depth)
    }

    pub fn in_block(&self) -> bool {
        self.state.block_depth > 0
    }

    pub fn block_depth(&self) -> usize {
        self.state.block_depth
    }

    pub fn paren_depth(&self) -> usize {
        self.state.paren_depth
    }

    pub fn in_object_literal(&self) -> bool {
        self.state.block_types.last() == Some(&BlockType::ObjectLiteral)
    }

    pub fn in_parentheses(&self) -> bool {
        self.state.paren_depth > 0
    }

    pub fn params(&self) -> Vec<String> {
        self.state.params()
    }

    /// The pending doc comment, waiting for its target.
    pub fn doc_comment(&self) -> Option<&DocComment> {
        self.state.doc_comment.map(|id| &self.state.doc_comments[id.0])
    }

    pub fn doc_comment_by_id(&self, id: DocCommentId) -> Option<&DocComment> {
        self.state.doc_comments.get(id.0)
    }

    /// Every doc comment seen so far, in source order.
    pub fn doc_comments(&self) -> &[DocComment] {
        &self.state.doc_comments
    }

    pub fn has_doc_comment(&self, identifier: &str) -> bool {
        self.state.documented_identifiers.contains(identifier)
    }

    /// Between `/**` and `*/`.
    pub fn in_doc_comment(&self) -> bool {
        self.doc_comment().is_some_and(|doc| doc.end.is_none())
    }

    pub fn is_variable_in_scope(&self, name: &str) -> bool {
        self.state
            .variables_in_scope
            .iter()
            .any(|entry| matches!(entry, ScopeEntry::Variable(variable) if variable == name))
    }

    pub fn last_comment(&self) -> Option<TokenId> {
        self.state.last_comment
    }

    pub fn last_non_space_token(&self) -> Option<TokenId> {
        self.state.last_non_space_token
    }

    pub fn last_line(&self) -> Option<usize> {
        self.state.last_line
    }

    pub fn phase(&self) -> Phase {
        if self.in_doc_comment() {
            Phase::InDocComment
        } else if self.in_function() {
            Phase::InFunction {
                depth: self.state.function_stack.len(),
            }
        } else if self.in_block() {
            Phase::InBlock {
                depth: self.state.block_depth,
            }
        } else {
            Phase::Idle
        }
    }

    /// No open block, parenthesis or function.
    pub fn is_balanced(&self) -> bool {
        self.state.block_depth == 0
            && self.state.paren_depth == 0
            && self.state.function_stack.is_empty()
    }
}

/// Dotted name on the left of the assignment ending at `last_code`, joined across
/// line breaks and comments (`a.b.\n    c = function`).
fn assigned_name(chain: &TokenChain, last_code: TokenId) -> Option<String> {
    let lvalue = search_until(
        chain,
        last_code,
        &[TokenKind::SimpleLvalue],
        &[TokenKind::Semicolon, TokenKind::StartBlock, TokenKind::EndBlock],
        Direction::Backward,
    )?;
    let start = get_identifier_start(chain, lvalue).unwrap_or(lvalue);
    get_identifier_for_token(chain, start).or_else(|| Some(chain[lvalue].text.clone()))
}

/// Name written after `function`, empty for a literal.
fn declared_name(chain: &TokenChain, token: TokenId) -> String {
    let mut name = String::new();
    let mut current = token;
    while let Some(next) = next_code_token(chain, current) {
        if !chain[next].is_kind(TokenKind::FunctionName) {
            break;
        }
        name.push_str(&chain[next].text);
        current = next;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecma::checking::FindingCollector;
    use crate::ecma::lexing::tokenize;
    use crate::ecma::structure::build_contexts;

    /// Run the tracker over `source`, calling `probe` on every token between the two hooks.
    fn track(source: &str, mut probe: impl FnMut(&StateTracker<'_>, TokenId)) -> (usize, bool) {
        let chain = tokenize(source).chain;
        let tree = build_contexts(&chain).unwrap();
        let mut tracker = StateTracker::new(&chain, &tree);
        for id in chain.ids() {
            tracker.handle_token(id);
            probe(&tracker, id);
            tracker.handle_after_token(id);
        }
        (tracker.functions().len(), tracker.is_balanced())
    }

    fn final_tracker_functions(source: &str) -> Vec<Function> {
        let chain = tokenize(source).chain;
        let tree = build_contexts(&chain).unwrap();
        let mut tracker = StateTracker::new(&chain, &tree);
        for id in chain.ids() {
            tracker.handle_token(id);
            tracker.handle_after_token(id);
        }
        tracker.functions().to_vec()
    }

    #[test]
    fn test_params_strip_types_and_spaces() {
        let state = ScopeState {
            cumulative_params: "a: number, b,\n  c".to_string(),
            ..ScopeState::default()
        };
        assert_eq!(state.params(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_assigned_function_name_and_params() {
        let functions = final_tracker_functions("foo.bar = function(x, y) {\n  return x;\n};\n");
        assert_eq!(functions.len(), 1);
        let function = &functions[0];
        assert_eq!(function.name, "foo.bar");
        assert!(function.is_assigned);
        assert_eq!(function.parameters, vec!["x", "y"]);
        assert!(function.has_return);
        assert!(function.end.is_some());
    }

    #[test]
    fn test_declared_function_name() {
        let functions = final_tracker_functions("function answer() {\n  throw err;\n}\n");
        assert_eq!(functions[0].name, "answer");
        assert!(!functions[0].is_assigned);
        assert!(functions[0].has_throw);
        assert!(!functions[0].has_return);
    }

    #[test]
    fn test_bare_return_is_not_a_return_value() {
        let functions = final_tracker_functions("function f() {\n  return;\n}\n");
        assert!(!functions[0].has_return);
    }

    #[test]
    fn test_this_reference() {
        let functions = final_tracker_functions("function C() {\n  this.x = 1;\n}\n");
        assert!(functions[0].has_this);
    }

    #[test]
    fn test_doc_comment_marks_constructor() {
        let functions =
            final_tracker_functions("/** @constructor */\nvar Thing = function() {\n};\n");
        assert_eq!(functions[0].name, "Thing");
        assert!(functions[0].is_constructor);
        assert!(functions[0].doc.is_some());
    }

    #[test]
    fn test_doc_not_attached_inside_parentheses() {
        let functions = final_tracker_functions("run(/** @constructor */ function() {\n});\n");
        assert!(functions[0].doc.is_none());
    }

    #[test]
    fn test_scope_wrapper_counts_as_top_level() {
        let source = "goog.scope(function() {\n/** @constructor */\nx.Y = function() {\n};\n});\n";
        let functions = final_tracker_functions(source);
        let inner = functions.iter().find(|f| f.name == "x.Y").unwrap();
        assert!(inner.is_constructor);
    }

    #[test]
    fn test_function_boundaries_and_balance() {
        let mut opened = Vec::new();
        let mut closed = Vec::new();
        let (count, balanced) = track("var f = function(a) {\n  if (a) {\n    a();\n  }\n};\n", |tracker, id| {
            if tracker.is_function_open() && tracker.state().block_depth() == 1 {
                opened.push(id);
            }
            if tracker.state().is_block_close() && tracker.is_function_close() {
                closed.push(id);
            }
        });
        assert_eq!(count, 1);
        assert!(balanced);
        assert_eq!(closed.len(), 1);
        assert!(!opened.is_empty());
    }

    #[test]
    fn test_variables_leave_scope_with_their_function() {
        let mut inside = false;
        let mut after = true;
        track("function f(p) {\n  var local = 1;\n  g();\n}\nh();\n", |tracker, _| {
            if tracker.in_function() && tracker.is_variable_in_scope("local") {
                inside = tracker.is_variable_in_scope("p");
            }
            if !tracker.in_function() && tracker.block_depth() == 0 {
                after = tracker.is_variable_in_scope("local") || tracker.is_variable_in_scope("p");
            }
        });
        assert!(inside);
        assert!(!after);
    }

    #[test]
    fn test_object_literal_blocks() {
        let mut seen = false;
        track("var o = {\n  a: 1\n};\n", |tracker, _| {
            if tracker.block_depth() == 1 {
                seen |= tracker.in_object_literal();
            }
        });
        assert!(seen);
    }

    #[test]
    fn test_phase_transitions() {
        let mut phases = Vec::new();
        track("/** Doc. */\nfunction f() {\n}\nif (x) {\n}\n", |tracker, _| {
            let phase = tracker.phase();
            if phases.last() != Some(&phase) {
                phases.push(phase);
            }
        });
        assert_eq!(
            phases,
            vec![
                Phase::InDocComment,
                Phase::Idle,
                Phase::InFunction { depth: 1 },
                Phase::Idle,
                Phase::InBlock { depth: 1 },
                Phase::Idle,
            ]
        );
    }

    #[test]
    fn test_documented_identifiers() {
        let chain = tokenize("/** @type {number} */\nfoo.bar = 1;\n/** @type {string} */\nfoo.baz;\n").chain;
        let tree = build_contexts(&chain).unwrap();
        let mut tracker = StateTracker::new(&chain, &tree);
        for id in chain.ids() {
            tracker.handle_token(id);
            tracker.handle_after_token(id);
        }
        assert!(tracker.has_doc_comment("foo.bar"));
        assert!(tracker.has_doc_comment("foo.baz"));
        assert!(!tracker.has_doc_comment("foo.qux"));
    }

    #[test]
    fn test_finalize_reports_missing_newline() {
        let chain = tokenize("var x = 1;").chain;
        let tree = build_contexts(&chain).unwrap();
        let mut tracker = StateTracker::new(&chain, &tree);
        for id in chain.ids() {
            tracker.handle_token(id);
            tracker.handle_after_token(id);
        }
        let mut sink = FindingCollector::default();
        tracker.finalize(&mut sink);
        assert_eq!(sink.findings().len(), 1);
        assert_eq!(sink.findings()[0].code, ErrorCode::FILE_MISSING_NEWLINE);
    }

    #[test]
    fn test_finalize_ignores_a_blank_last_line() {
        let chain = tokenize("var x = 1;\n   ").chain;
        let tree = build_contexts(&chain).unwrap();
        let mut tracker = StateTracker::new(&chain, &tree);
        for id in chain.ids() {
            tracker.handle_token(id);
            tracker.handle_after_token(id);
        }
        let mut sink = FindingCollector::default();
        tracker.finalize(&mut sink);
        assert!(sink.findings().is_empty());
    }

    #[test]
    fn test_only_code_blocks_close_as_blocks() {
        let source = "var o = {a: 1};\nif (x) {\n}\n";
        let mut closes = Vec::new();
        track(source, |tracker, id| {
            if tracker.state().is_block_close() {
                closes.push(id);
            }
        });
        let chain = tokenize(source).chain;
        let lines: Vec<_> = closes.iter().map(|&id| chain[id].line_number).collect();
        assert_eq!(lines, vec![3]);
    }
}
