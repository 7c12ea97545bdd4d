//! Lexer behavior on whole sources: token kinds, mode switches and losslessness.

use jsstyle::ecma::formats::detokenize;
use jsstyle::ecma::lexing::{tokenize, LexerMode};
use jsstyle::ecma::token::TokenKind;
use rstest::rstest;

/// Helper: kind and text of every token
fn tokens(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .chain
        .iter()
        .map(|(_, token)| (token.kind, token.text.clone()))
        .collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

/// Helper: only the code tokens, whitespace dropped
fn code_kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .chain
        .iter()
        .filter(|(_, token)| token.kind != TokenKind::Whitespace)
        .map(|(_, token)| token.kind)
        .collect()
}

#[test]
fn test_var_declaration() {
    use TokenKind::*;
    assert_eq!(
        tokens("var x = 5;"),
        vec![
            tok(Keyword, "var"),
            tok(Whitespace, " "),
            tok(SimpleLvalue, "x"),
            tok(Whitespace, " "),
            tok(Operator, "="),
            tok(Whitespace, " "),
            tok(Number, "5"),
            tok(Semicolon, ";"),
        ]
    );
}

#[test]
fn test_dotted_simple_lvalue_keeps_identifier_value() {
    let lexed = tokenize("foo.bar = 1;");
    let first = &lexed.chain[lexed.chain.first()];
    assert_eq!(first.kind, TokenKind::SimpleLvalue);
    assert_eq!(first.text, "foo.bar");
    assert_eq!(first.value("identifier"), Some("foo.bar"));
}

#[rstest]
#[case::equality("a == b;")]
#[case::arrow("a => b;")]
#[case::compound("a += b;")]
fn test_not_a_simple_lvalue(#[case] source: &str) {
    assert_eq!(code_kinds(source)[0], TokenKind::Identifier);
}

#[rstest]
#[case::keyword_prefix("returnValue;", TokenKind::Identifier)]
#[case::operator_prefix("newValue;", TokenKind::Identifier)]
#[case::keyword("return;", TokenKind::Keyword)]
#[case::word_operator("new Foo();", TokenKind::Operator)]
#[case::let_keyword("let y;", TokenKind::Keyword)]
#[case::const_keyword("const y;", TokenKind::Keyword)]
fn test_keywords_need_a_word_boundary(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(code_kinds(source)[0], expected);
}

#[rstest]
#[case("0x1F")]
#[case("1.5e3")]
#[case(".5")]
#[case("42")]
fn test_numbers(#[case] literal: &str) {
    let source = format!("x = {literal};");
    let lexed = tokenize(&source);
    let numbers: Vec<_> = lexed
        .chain
        .iter()
        .filter(|(_, token)| token.kind == TokenKind::Number)
        .map(|(_, token)| token.text.as_str())
        .collect();
    assert_eq!(numbers, vec![literal]);
}

#[test]
fn test_single_quoted_string_with_escape() {
    use TokenKind::*;
    assert_eq!(
        tokens(r"s = 'it\'s';")[4..],
        [
            tok(SingleQuoteStringStart, "'"),
            tok(StringText, r"it\'s"),
            tok(SingleQuoteStringEnd, "'"),
            tok(Semicolon, ";"),
        ]
    );
}

#[test]
fn test_template_string_is_its_own_mode() {
    use TokenKind::*;
    assert_eq!(
        tokens("`a ${b}`"),
        vec![
            tok(TemplateStringStart, "`"),
            tok(StringText, "a ${b}"),
            tok(TemplateStringEnd, "`"),
        ]
    );
}

#[test]
fn test_pattern_literal_followed_by_terminator() {
    let kinds = code_kinds("x = /ab+c/g;");
    assert_eq!(kinds[2], TokenKind::Regex);
    let lexed = tokenize("x = /a/.test(y);");
    assert!(lexed
        .chain
        .iter()
        .any(|(_, token)| token.kind == TokenKind::Regex && token.text == "/a/"));
}

#[test]
fn test_division_is_an_operator() {
    use TokenKind::*;
    assert_eq!(
        code_kinds("a = b / c / d;"),
        vec![SimpleLvalue, Operator, Identifier, Operator, Identifier, Operator, Identifier, Semicolon]
    );
}

/// The follow-set heuristic misreads a pattern literal that is followed by an operator.
#[test]
fn test_pattern_literal_before_operator_is_misread_as_division() {
    let lexed = tokenize("if (/ab/ && ok) {}");
    let kinds: Vec<_> = lexed.chain.iter().map(|(_, token)| token.kind).collect();
    assert!(!kinds.contains(&TokenKind::Regex));
    let operators: Vec<_> = lexed
        .chain
        .iter()
        .filter(|(_, token)| token.kind == TokenKind::Operator)
        .map(|(_, token)| token.text.as_str())
        .collect();
    assert_eq!(operators, vec!["/", "/", "&&"]);
}

#[test]
fn test_named_function_declaration() {
    use TokenKind::*;
    assert_eq!(
        tokens("function foo(a, b) {}"),
        vec![
            tok(FunctionDeclaration, "function"),
            tok(Whitespace, " "),
            tok(FunctionName, "foo"),
            tok(StartParameters, "("),
            tok(Parameters, "a, b"),
            tok(EndParameters, ") "),
            tok(StartBlock, "{"),
            tok(EndBlock, "}"),
        ]
    );
}

#[test]
fn test_function_literal_without_parameters() {
    use TokenKind::*;
    assert_eq!(
        code_kinds("f = function() {};"),
        vec![SimpleLvalue, Operator, FunctionDeclaration, StartParameters, EndParameters, StartBlock, EndBlock, Semicolon]
    );
}

#[test]
fn test_line_comment_runs_to_end_of_line() {
    use TokenKind::*;
    let lexed = tokenize("x; // note\ny;");
    let kinds: Vec<_> = lexed.chain.iter().map(|(_, t)| (t.kind, t.line_number)).collect();
    assert_eq!(
        kinds,
        vec![
            (Identifier, 1),
            (Semicolon, 1),
            (Whitespace, 1),
            (StartSingleLineComment, 1),
            (Comment, 1),
            (Identifier, 2),
            (Semicolon, 2),
        ]
    );
    assert_eq!(lexed.final_mode, LexerMode::Text);
}

#[test]
fn test_empty_line_comment_at_end_of_line() {
    let lexed = tokenize("x; //");
    let last = &lexed.chain[lexed.chain.last()];
    assert_eq!(last.kind, TokenKind::StartSingleLineComment);
    assert_eq!(lexed.final_mode, LexerMode::Text);
}

#[test]
fn test_single_line_doc_comment() {
    let lexed = tokenize("/** @param {number} x The value. */");
    let chain = &lexed.chain;
    let flags: Vec<_> = chain
        .iter()
        .filter(|(_, token)| token.kind == TokenKind::DocFlag)
        .collect();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].1.text, "@param");
    assert_eq!(flags[0].1.value("name"), Some("param"));

    let kinds: Vec<_> = chain.iter().map(|(_, token)| token.kind).collect();
    assert!(kinds.contains(&TokenKind::DocStartBrace));
    assert!(kinds.contains(&TokenKind::DocEndBrace));
    assert_eq!(kinds.first(), Some(&TokenKind::StartDocComment));
    assert_eq!(kinds.last(), Some(&TokenKind::EndDocComment));
    assert_eq!(lexed.final_mode, LexerMode::Text);
}

#[test]
fn test_doc_comment_prefix_on_continuation_lines() {
    use TokenKind::*;
    assert_eq!(
        tokens("/**\n * Adds.\n */"),
        vec![
            tok(StartDocComment, "/**"),
            tok(DocPrefix, " * "),
            tok(Comment, "Adds."),
            tok(Comment, " "),
            tok(EndDocComment, "*/"),
        ]
    );
}

#[rstest]
#[case::block_comment("/* unterminated", LexerMode::BlockComment)]
#[case::doc_comment("/**\n * never closed", LexerMode::DocComment)]
#[case::single_quote("s = 'abc", LexerMode::SingleQuoteString)]
#[case::double_quote("s = \"abc", LexerMode::DoubleQuoteString)]
#[case::template("s = `abc", LexerMode::TemplateString)]
#[case::parameters("function f(a,", LexerMode::Parameter)]
#[case::closed("a = 'b';\n", LexerMode::Text)]
#[case::empty_block_comment("/**/\nx = 1;\n", LexerMode::Text)]
fn test_final_mode(#[case] source: &str, #[case] expected: LexerMode) {
    assert_eq!(tokenize(source).final_mode, expected);
}

#[test]
fn test_empty_block_comment_is_not_a_doc_comment() {
    use TokenKind::*;
    assert_eq!(
        tokens("/**/ x;"),
        vec![
            tok(StartBlockComment, "/*"),
            tok(EndBlockComment, "*/"),
            tok(Whitespace, " "),
            tok(Identifier, "x"),
            tok(Semicolon, ";"),
        ]
    );
}

#[test]
fn test_block_comment_spans_lines() {
    use TokenKind::*;
    let lexed = tokenize("/* one\ntwo */ x");
    let kinds: Vec<_> = lexed.chain.iter().map(|(_, token)| token.kind).collect();
    assert_eq!(
        kinds,
        vec![StartBlockComment, Comment, Comment, EndBlockComment, Whitespace, Identifier]
    );
}

#[test]
fn test_blank_lines_are_tokens() {
    let lexed = tokenize("a;\n\nb;\n");
    let blank: Vec<_> = lexed
        .chain
        .iter()
        .filter(|(_, token)| token.kind == TokenKind::BlankLine)
        .map(|(_, token)| token.line_number)
        .collect();
    assert_eq!(blank, vec![2]);
    assert!(lexed.chain.ends_with_newline());
}

#[test]
fn test_empty_source_is_one_blank_line() {
    let lexed = tokenize("");
    assert_eq!(lexed.chain.len(), 1);
    assert_eq!(lexed.chain[lexed.chain.first()].kind, TokenKind::BlankLine);
    assert!(!lexed.chain.ends_with_newline());
}

#[test]
fn test_positions() {
    let lexed = tokenize("a;\n  b = 2;");
    let b = lexed
        .chain
        .iter()
        .find(|(_, token)| token.text == "b")
        .map(|(_, token)| token.clone())
        .unwrap();
    assert_eq!(b.line_number, 2);
    assert_eq!(b.start_index, 2);
    assert_eq!(b.end_index(), 3);
}

#[rstest]
#[case("var x = 5;\n")]
#[case("a = b\r\n  + c\r\n")]
#[case("/**\n * @param {string} s The string.\n */\nfunction f(s) {\n  return s;\n}\n")]
#[case("x = /re/g; // trailing\n\n\ny = `t`;")]
#[case("weird ## input \u{7f} é\n")]
fn test_lexing_is_lossless(#[case] source: &str) {
    assert_eq!(detokenize(&tokenize(source).chain), source);
}
