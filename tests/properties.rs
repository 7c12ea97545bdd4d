//! Property-based tests over the three passes
//!
//! Arbitrary text must lex losslessly. Sources assembled from well-formed statements must
//! build a well-formed tree with balanced brackets and leave the tracker balanced.

use jsstyle::ecma::formats::detokenize;
use jsstyle::ecma::lexing::tokenize;
use jsstyle::ecma::testing::{analyze, Analyzed};
use jsstyle::ecma::tracking::StateTracker;
use proptest::prelude::*;

/// Lines of printable text, tabs and a non-ASCII letter, with or without a final newline
fn text_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[ -~\té]{0,60}", 0..8),
        any::<bool>(),
    )
        .prop_map(|(lines, newline)| {
            let mut text = lines.join("\n");
            if newline {
                text.push('\n');
            }
            text
        })
}

fn statement_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "a = 1",
        "foo(b)",
        "x = y + z",
        "if (a) b()",
        "var c = [1, 2]",
        "d = {e: 1}",
        "return f",
        "g.h = i ? j : k",
        "function k(m) {\n  return m;\n}",
        "n = function(p, q) {\n  r(p);\n}",
        "while (s) {\n  t--;\n}",
    ])
}

/// One statement per line, each with or without its semicolon
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((statement_strategy(), any::<bool>()), 1..8).prop_map(|statements| {
        statements
            .into_iter()
            .map(|(statement, semicolon)| {
                if semicolon {
                    format!("{statement};\n")
                } else {
                    format!("{statement}\n")
                }
            })
            .collect()
    })
}

/// Helper: rebuild the source with an explicit `;` after every implied semicolon
fn with_explicit_semicolons(analyzed: &Analyzed) -> String {
    let mut source = String::new();
    let mut line = 1;
    for (id, token) in analyzed.chain.iter() {
        while line < token.line_number {
            source.push('\n');
            line += 1;
        }
        source.push_str(&token.text);
        if analyzed
            .tree
            .metadata(id)
            .is_some_and(|metadata| metadata.is_implied_semicolon)
        {
            source.push(';');
        }
    }
    source.push('\n');
    source
}

proptest! {
    #[test]
    fn test_lexing_is_lossless(text in text_strategy()) {
        let lexed = tokenize(&text);
        prop_assert!(!lexed.chain.is_empty());
        prop_assert_eq!(detokenize(&lexed.chain), text);
    }

    #[test]
    fn test_lines_are_numbered_in_order(text in text_strategy()) {
        let lexed = tokenize(&text);
        let lines: Vec<_> = lexed.chain.iter().map(|(_, token)| token.line_number).collect();
        prop_assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(lines.first().copied(), Some(1));
    }

    #[test]
    fn test_generated_sources_build_well_formed_trees(source in source_strategy()) {
        let analyzed = analyze(&source);
        prop_assert_eq!(analyzed.error_token, None);
        prop_assert_eq!(analyzed.tree.annotated_len(), analyzed.chain.len());
        analyzed.assert_well_formed();
        analyzed.assert_balanced_pairs();
    }

    #[test]
    fn test_generated_sources_leave_the_tracker_balanced(source in source_strategy()) {
        let analyzed = analyze(&source);
        let mut tracker = StateTracker::new(&analyzed.chain, &analyzed.tree);
        for id in analyzed.chain.ids() {
            tracker.handle_token(id);
            tracker.handle_after_token(id);
        }
        prop_assert!(tracker.is_balanced());
        prop_assert_eq!(tracker.block_depth(), 0);
    }

    #[test]
    fn test_explicit_semicolons_keep_the_shape(source in source_strategy()) {
        let analyzed = analyze(&source);
        let explicit = analyze(&with_explicit_semicolons(&analyzed));
        prop_assert_eq!(explicit.error_token, None);
        prop_assert_eq!(explicit.shape(), analyzed.shape());
    }
}
