//! Scope, function and doc comment tracking over whole sources.

use jsstyle::ecma::structure::ContextTree;
use jsstyle::ecma::testing::{analyze, Analyzed};
use jsstyle::ecma::token::{TokenChain, TokenId};
use jsstyle::ecma::tracking::{
    BlockType, Dialect, EditOp, Function, JavaScript, Phase, ScopeState, StateTracker,
};

/// Helper: run a tracker over an analyzed source, probing between the two hooks
fn track<D: Dialect>(
    analyzed: &Analyzed,
    dialect: D,
    mut probe: impl FnMut(&StateTracker<'_, D>, TokenId),
) -> StateTrackerSummary {
    let mut tracker = StateTracker::with_dialect(&analyzed.chain, &analyzed.tree, dialect);
    for id in analyzed.chain.ids() {
        tracker.handle_token(id);
        probe(&tracker, id);
        tracker.handle_after_token(id);
    }
    StateTrackerSummary {
        functions: tracker.functions().to_vec(),
        balanced: tracker.is_balanced(),
        phase: tracker.phase(),
        invalidated: tracker
            .doc_comments()
            .iter()
            .map(|doc| doc.is_invalidated())
            .collect(),
    }
}

struct StateTrackerSummary {
    functions: Vec<Function>,
    balanced: bool,
    phase: Phase,
    invalidated: Vec<bool>,
}

/// Treats only unparenthesized code outside functions as top level, with no wrapper.
struct Plain;

impl Dialect for Plain {
    fn handle_token(&mut self, _chain: &TokenChain, _token: TokenId, _state: &ScopeState) {}

    fn in_top_level(&self, state: &ScopeState) -> bool {
        state.paren_depth() == 0 && state.function_depth() == 0
    }

    fn block_type(&self, _tree: &ContextTree, _token: TokenId) -> BlockType {
        BlockType::Code
    }
}

#[test]
fn test_documented_parameter_that_is_not_declared() {
    let source = "/**\n * @param {number} a First.\n * @param {string} missing Not declared.\n */\nvar f = function(a) {\n  return a;\n};\n";
    let analyzed = analyze(source);
    assert_eq!(analyzed.error_token, None);

    let mut tracker = StateTracker::new(&analyzed.chain, &analyzed.tree);
    for id in analyzed.chain.ids() {
        tracker.handle_token(id);
        tracker.handle_after_token(id);
    }

    let function = &tracker.functions()[0];
    assert_eq!(function.name, "f");
    assert_eq!(function.parameters, vec!["a"]);

    let doc = function
        .doc
        .and_then(|id| tracker.doc_comment_by_id(id))
        .expect("the function is documented");
    assert_eq!(doc.ordered_params(), vec!["a", "missing"]);
    let diff = doc.compare_parameters(&function.parameters);
    assert_eq!(diff.distance, 1);
    assert_eq!(diff.edits, vec![EditOp::Keep, EditOp::Delete]);
    assert!(tracker.is_balanced());
}

#[test]
fn test_nested_functions_share_the_outer_scope() {
    let source = "function outer(a) {\n  var inner = function(b) {\n    return b;\n  };\n  return inner(a);\n}\n";
    let analyzed = analyze(source);
    let inner_return = analyzed.token("return", 0);
    let outer_return = analyzed.token("return", 1);

    let mut checked = 0;
    let summary = track(&analyzed, JavaScript::default(), |tracker, id| {
        if id == inner_return {
            assert_eq!(tracker.function().map(|f| f.name.as_str()), Some("inner"));
            assert_eq!(tracker.state().function_depth(), 2);
            assert!(tracker.is_variable_in_scope("a"));
            assert!(tracker.is_variable_in_scope("b"));
            assert!(!tracker.in_top_level_function());
            checked += 1;
        }
        if id == outer_return {
            assert_eq!(tracker.function().map(|f| f.name.as_str()), Some("outer"));
            assert!(tracker.in_top_level_function());
            assert!(tracker.is_variable_in_scope("inner"));
            assert!(!tracker.is_variable_in_scope("b"));
            checked += 1;
        }
    });
    assert_eq!(checked, 2);

    let names: Vec<_> = summary.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["outer", "inner"]);
    assert!(summary.functions.iter().all(|f| f.has_return && f.end.is_some()));
    assert_eq!(summary.functions[1].parameters, vec!["b"]);
    assert!(summary.balanced);
    assert_eq!(summary.phase, Phase::Idle);
}

#[test]
fn test_prototype_method_of_an_interface() {
    let source = "/** @interface */\nfunction Shape() {}\n\nShape.prototype.area = function() {};\n";
    let analyzed = analyze(source);
    let mut seen = false;
    let summary = track(&analyzed, JavaScript::default(), |tracker, _| {
        if tracker.function().is_some_and(|f| f.name == "Shape.prototype.area") {
            seen = true;
            assert!(tracker.in_interface_method());
            assert!(tracker.in_assigned_function());
        }
    });
    assert!(seen);
    assert!(summary.functions[0].is_interface);
    assert_eq!(summary.functions[1].class_name(), Some("Shape"));
}

#[test]
fn test_malformed_doc_comment_is_invalidated() {
    let analyzed = analyze("/**\n * @param {string name\n */\nfunction f(name) {}\n");
    let summary = track(&analyzed, JavaScript::default(), |_, _| {});
    assert_eq!(summary.invalidated, vec![true]);
    assert_eq!(summary.functions[0].parameters, vec!["name"]);
}

#[test]
fn test_dialect_decides_what_is_top_level() {
    let source = "goog.scope(function() {\n/** @constructor */\nx.Y = function() {\n};\n});\n";
    let analyzed = analyze(source);

    let default = track(&analyzed, JavaScript::default(), |_, _| {});
    let wrapped = default.functions.iter().find(|f| f.name == "x.Y").unwrap();
    assert!(wrapped.is_constructor);

    let plain = track(&analyzed, Plain, |tracker, _| {
        assert!(!tracker.in_object_literal());
    });
    let unwrapped = plain.functions.iter().find(|f| f.name == "x.Y").unwrap();
    assert!(!unwrapped.is_constructor);
    assert!(unwrapped.doc.is_none());
    assert!(plain.balanced);
}

#[test]
fn test_configured_scope_wrapper() {
    let source = "my.scope(function() {\n/** @constructor */\nx.Y = function() {\n};\n});\n";
    let analyzed = analyze(source);

    let custom = track(&analyzed, JavaScript::new("my.scope"), |_, _| {});
    assert!(custom.functions.iter().any(|f| f.name == "x.Y" && f.is_constructor));

    let default = track(&analyzed, JavaScript::default(), |_, _| {});
    assert!(default.functions.iter().any(|f| f.name == "x.Y" && !f.is_constructor));
}

#[test]
fn test_scope_balance_on_a_mixed_file() {
    let source = "\
var config = {
  name: 'x',
  run: function(a) {
    if (a) {
      return [a, {b: a}];
    }
    return null;
  }
};

function later(x) {
  switch (x) {
    case 1:
      return (x + 1);
    default:
      return 0;
  }
}
";
    let analyzed = analyze(source);
    assert_eq!(analyzed.error_token, None);
    analyzed.assert_well_formed();

    let mut max_depth = 0;
    let summary = track(&analyzed, JavaScript::default(), |tracker, _| {
        max_depth = max_depth.max(tracker.block_depth());
    });
    // config, run, if, and the literal inside the returned array.
    assert_eq!(max_depth, 4);
    assert!(summary.balanced);
    // A method in an object literal is neither assigned nor named.
    let names: Vec<_> = summary.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["", "later"]);
    assert!(!summary.functions[0].is_assigned);
    assert_eq!(summary.functions[0].parameters, vec!["a"]);
}

#[test]
fn test_every_name_in_a_declaration_list_is_in_scope() {
    let source = "function f() {\n  var a = 1, b = 2;\n  let c, d;\n  return b + d;\n}\n";
    let analyzed = analyze(source);
    let ret = analyzed.token("return", 0);

    let mut checked = false;
    let summary = track(&analyzed, JavaScript::default(), |tracker, id| {
        if id == ret {
            for name in ["a", "b", "c", "d"] {
                assert!(tracker.is_variable_in_scope(name), "{name} should be in scope");
            }
            checked = true;
        }
    });
    assert!(checked);
    assert!(summary.balanced);
}
