//! Tests for struct declarations and `:` field access resolution.

use expect_test::expect;
use minim_resolve::{analyze_names, NameError, NameResolution};
use minim_syntax::ast::{Decl, Expr, ExprKind, FuncDecl, Program, Stmt, StmtKind};
use minim_syntax::{parse, unparse_annotated};

fn analyzed(source: &str) -> (Program, NameResolution) {
    let program = parse(source).expect("test programs parse");
    let resolution = analyze_names(&program);
    (program, resolution)
}

fn func(program: &Program, index: usize) -> &FuncDecl {
    match &program.decls[index] {
        Decl::Func(func) => func,
        other => panic!("expected a function declaration, got {other:?}"),
    }
}

fn assign_target(stmt: &Stmt) -> &Expr {
    match &stmt.kind {
        StmtKind::Assign { target, .. } => target,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn field_access_binds_the_field_symbol() {
    let (program, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
             integer y.\n\
         }\n\
         struct Point p.\n\
         void main() {\n\
             p:x = 3.\n\
         }\n",
    );
    assert!(resolution.ok(), "errors: {:?}", resolution.errors());

    let target = assign_target(&func(&program, 2).body.stmts[0]);
    let ExprKind::StructAccess { base, field } = &target.kind else {
        panic!("expected a struct access");
    };
    // The field resolves to the plain integer symbol stored in Point's
    // private field table; the base resolves to the struct variable.
    assert_eq!(resolution.symbol_of(field.id).unwrap().to_string(), "integer");
    let ExprKind::Ident(base_id) = &base.kind else { panic!() };
    assert_eq!(resolution.symbol_of(base_id.id).unwrap().to_string(), "Point");
}

#[test]
fn unknown_field_is_reported_even_if_the_name_exists_globally() {
    let (_, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
         }\n\
         integer z.\n\
         struct Point p.\n\
         void main() {\n\
             p:z = 4.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(
        &resolution.errors()[0],
        NameError::UnknownStructField { name, struct_name, .. }
            if name == "z" && struct_name == "Point"
    ));
}

#[test]
fn fields_are_invisible_to_ordinary_lookup() {
    let (_, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
         }\n\
         struct Point p.\n\
         void main() {\n\
             x = 1.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::UndeclaredName { .. }));
}

#[test]
fn access_through_a_non_struct_variable() {
    let (_, resolution) = analyzed(
        "integer q.\n\
         void main() {\n\
             q:x = 1.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::InvalidStructAccess { .. }));
}

#[test]
fn access_through_an_undeclared_name_reports_both_errors() {
    let (_, resolution) = analyzed(
        "void main() {\n\
             u:x = 1.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 2);
    assert!(matches!(resolution.errors()[0], NameError::UndeclaredName { .. }));
    assert!(matches!(resolution.errors()[1], NameError::InvalidStructAccess { .. }));
}

#[test]
fn access_on_a_call_result_is_invalid() {
    let (_, resolution) = analyzed(
        "void f() { }\n\
         void main() {\n\
             integer a.\n\
             a = f():x.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::InvalidStructAccess { .. }));
}

#[test]
fn chained_access_through_a_non_struct_field() {
    let (_, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
         }\n\
         struct Point p.\n\
         void main() {\n\
             p:x:y = 1.\n\
         }\n",
    );
    // `p:x` resolves to an integer field, so the outer access is invalid.
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::InvalidStructAccess { .. }));
}

#[test]
fn duplicate_fields_are_detected_locally() {
    let (_, resolution) = analyzed(
        "struct S {\n\
             integer a.\n\
             boolean a.\n\
         }\n\
         struct S s.\n\
         void main() {\n\
             s:a = 1.\n\
         }\n",
    );
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(
        resolution.errors()[0],
        NameError::MultiplyDeclaredName { .. }
    ));
}

#[test]
fn duplicate_struct_name_skips_field_analysis() {
    let (_, resolution) = analyzed(
        "integer S.\n\
         struct S {\n\
             integer a.\n\
             integer a.\n\
         }\n",
    );
    // Only the struct name clash is reported; the duplicate field inside
    // the broken struct is not processed at all.
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(
        resolution.errors()[0],
        NameError::MultiplyDeclaredName { .. }
    ));
}

#[test]
fn struct_type_name_must_resolve_to_a_struct_definition() {
    let (_, resolution) = analyzed("struct Missing m.\n");
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(
        &resolution.errors()[0],
        NameError::UnknownStructType { name, .. } if name == "Missing"
    ));
}

#[test]
fn shadowed_struct_name_is_not_a_struct_type() {
    let (_, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
         }\n\
         void main() {\n\
             integer Point.\n\
             struct Point p.\n\
         }\n",
    );
    // The local `Point` shadows the definition, so the declaration's type
    // name no longer resolves to a struct definition.
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::UnknownStructType { .. }));
}

#[test]
fn struct_typed_fields_resolve_against_the_field_table_only() {
    let (_, resolution) = analyzed(
        "struct Inner {\n\
             integer v.\n\
         }\n\
         struct Outer {\n\
             struct Inner i.\n\
         }\n",
    );
    // A struct's fields form a self-contained analysis unit: `Inner` is
    // not visible from inside `Outer`'s field list.
    assert_eq!(resolution.errors().len(), 1);
    assert!(matches!(resolution.errors()[0], NameError::UnknownStructType { .. }));
}

#[test]
fn annotated_unparse_decorates_struct_accesses() {
    let (program, resolution) = analyzed(
        "struct Point {\n\
             integer x.\n\
             integer y.\n\
         }\n\
         struct Point p.\n\
         void main() {\n\
             p:x = 3.\n\
             input -> p:y.\n\
         }\n",
    );
    assert!(resolution.ok(), "errors: {:?}", resolution.errors());
    let printed = unparse_annotated(&program, &resolution.annotator());
    expect![[r#"
        struct Point {
            integer x.
            integer y.
        }

        struct Point p.
        void main() {
            p{Point}:x{integer} = 3.
            input -> p{Point}:y{integer}.
        }

    "#]]
    .assert_eq(&printed);
}
