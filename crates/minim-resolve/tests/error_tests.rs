//! Tests for error positioning and the overall error-reporting contract:
//! analysis never stops early, and every recorded error carries the exact
//! line and column of the offending identifier.

use minim_resolve::{analyze_names, NameError, NameResolution};
use minim_syntax::{parse, LineIndex};

fn analyzed(source: &str) -> (LineIndex, NameResolution) {
    let program = parse(source).expect("test programs parse");
    (LineIndex::new(source), analyze_names(&program))
}

#[test]
fn errors_carry_exact_positions() {
    let source =
        "integer x.\nboolean x.\nvoid main() {\n    y = 1.\n    x:f = 2.\n    main(z).\n}\n";
    let (index, resolution) = analyzed(source);
    assert!(!resolution.ok());

    let positioned: Vec<(&NameError, (u32, u32))> = resolution
        .errors()
        .iter()
        .map(|error| (error, error.line_col(&index)))
        .collect();

    assert_eq!(positioned.len(), 4, "errors: {positioned:?}");
    assert!(matches!(positioned[0].0, NameError::MultiplyDeclaredName { .. }));
    assert_eq!(positioned[0].1, (2, 9));
    assert!(matches!(positioned[1].0, NameError::UndeclaredName { .. }));
    assert_eq!(positioned[1].1, (4, 5));
    assert!(matches!(positioned[2].0, NameError::InvalidStructAccess { .. }));
    assert_eq!(positioned[2].1, (5, 5));
    assert!(matches!(positioned[3].0, NameError::UndeclaredName { .. }));
    assert_eq!(positioned[3].1, (6, 10));
}

#[test]
fn undeclared_and_not_a_function_are_mutually_exclusive() {
    let source = "integer g.\n\
                  void main() {\n\
                      g().\n\
                      h().\n\
                  }\n";
    let (_, resolution) = analyzed(source);

    // `g()` resolves but is not callable; `h()` does not resolve at all.
    // No call site produces both errors.
    assert_eq!(resolution.errors().len(), 2);
    assert!(matches!(
        &resolution.errors()[0],
        NameError::NotAFunction { name, .. } if name == "g"
    ));
    assert!(matches!(
        &resolution.errors()[1],
        NameError::UndeclaredName { name, .. } if name == "h"
    ));
}

#[test]
fn call_arguments_are_analyzed_even_when_the_callee_is_unknown() {
    let source = "void main() {\n\
                      f(a, b).\n\
                  }\n";
    let (_, resolution) = analyzed(source);
    // One error for the callee and one per unresolved argument.
    assert_eq!(resolution.errors().len(), 3);
    assert!(matches!(resolution.errors()[0], NameError::UndeclaredName { .. }));
    assert!(matches!(resolution.errors()[1], NameError::UndeclaredName { .. }));
    assert!(matches!(resolution.errors()[2], NameError::UndeclaredName { .. }));
}

#[test]
fn siblings_after_a_failure_are_still_analyzed() {
    let source = "void main() {\n\
                      a = 1.\n\
                      b = 2.\n\
                      c = 3.\n\
                  }\n";
    let (_, resolution) = analyzed(source);
    assert_eq!(resolution.errors().len(), 3);
    assert!(resolution
        .errors()
        .iter()
        .all(|error| matches!(error, NameError::UndeclaredName { .. })));
}

#[test]
fn both_sides_of_a_binary_expression_are_checked() {
    let source = "void main() {\n\
                      integer t.\n\
                      t = a + b.\n\
                  }\n";
    let (_, resolution) = analyzed(source);
    assert_eq!(resolution.errors().len(), 2);
}
