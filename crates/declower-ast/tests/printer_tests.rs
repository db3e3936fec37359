//! Printer output shapes the downstream transform tests assert against.

use declower_ast::printer::{print_expr, print_module};
use declower_ast::{
    Class, ClassMember, DeclKind, ExportKind, Expr, FieldMember, Func, ImportBinding, ImportDecl,
    MethodKind, MethodMember, Module, ObjectLit, ObjectMember, PropKey, Stmt,
};

#[test]
fn statements_print_with_terminators() {
    let module = Module {
        body: vec![
            Stmt::const_decl("x", Expr::num(1.0)),
            Stmt::expr(Expr::call(Expr::ident("go"), vec![Expr::ident("x")])),
            Stmt::Return(None),
        ],
    };
    assert_eq!(print_module(&module), "const x = 1;\ngo(x);\nreturn;\n");
}

#[test]
fn exported_declarations_carry_the_keyword() {
    let module = Module {
        body: vec![
            Stmt::VarDecl {
                kind: DeclKind::Const,
                name: "x".to_string(),
                init: Some(Expr::num(1.0)),
                exported: true,
            },
            Stmt::ExportDefaultExpr(Expr::ident("x")),
        ],
    };
    assert_eq!(
        print_module(&module),
        "export const x = 1;\nexport default x;\n"
    );
}

#[test]
fn imports_render_default_and_named_bindings() {
    let module = Module {
        body: vec![Stmt::Import(ImportDecl {
            source: "declower/runtime".to_string(),
            bindings: vec![
                ImportBinding {
                    imported: "default".to_string(),
                    local: "runtime".to_string(),
                },
                ImportBinding {
                    imported: "decorateField".to_string(),
                    local: "decorateField".to_string(),
                },
                ImportBinding {
                    imported: "decorateClass".to_string(),
                    local: "c".to_string(),
                },
            ],
        })],
    };
    assert_eq!(
        print_module(&module),
        "import runtime, { decorateField, decorateClass as c } from \"declower/runtime\";\n"
    );
}

#[test]
fn string_literals_escape_specials() {
    assert_eq!(
        print_expr(&Expr::str("a \"b\"\nc\\d")),
        "\"a \\\"b\\\"\\nc\\\\d\""
    );
}

#[test]
fn whole_numbers_print_without_fraction() {
    assert_eq!(print_expr(&Expr::num(42.0)), "42");
    assert_eq!(print_expr(&Expr::num(3.5)), "3.5");
    assert_eq!(print_expr(&Expr::num(-0.25)), "-0.25");
}

#[test]
fn function_bodies_compact_when_short() {
    assert_eq!(print_expr(&Expr::thunk(vec![])), "function () { }");
    assert_eq!(
        print_expr(&Expr::thunk(vec![Stmt::Return(Some(Expr::num(1.0)))])),
        "function () { return 1; }"
    );
}

#[test]
fn function_in_callee_position_is_parenthesized() {
    let call = Expr::call(Expr::thunk(vec![]), vec![]);
    assert_eq!(print_expr(&call), "(function () { })()");
}

#[test]
fn sequences_and_assignments_print_inline() {
    let seq = Expr::seq(vec![
        Expr::call(Expr::ident("a"), vec![]),
        Expr::call(Expr::ident("b"), vec![]),
    ]);
    assert_eq!(print_expr(&seq), "(a(), b())");
    let assign = Expr::Assign {
        target: Box::new(Expr::member(Expr::This, "x")),
        value: Box::new(Expr::num(1.0)),
    };
    assert_eq!(print_expr(&assign), "this.x = 1");
}

#[test]
fn class_members_print_each_shape() {
    let class = Class {
        name: Some("Widget".to_string()),
        superclass: Some(Expr::ident("Base")),
        decorators: vec![Expr::ident("sealed")],
        members: vec![
            ClassMember::Field(FieldMember {
                key: PropKey::Private("count".to_string()),
                is_static: false,
                decorators: vec![],
                value: Some(Expr::num(0.0)),
            }),
            ClassMember::Method(MethodMember {
                key: PropKey::Ident("size".to_string()),
                is_static: true,
                kind: MethodKind::Getter,
                decorators: vec![],
                func: Func {
                    name: None,
                    params: vec![],
                    body: vec![Stmt::Return(Some(Expr::num(1.0)))],
                },
            }),
            ClassMember::StaticBlock(vec![Stmt::expr(Expr::call(
                Expr::ident("setup"),
                vec![Expr::This],
            ))]),
        ],
    };
    let output = print_expr(&Expr::Class(Box::new(class)));
    assert!(output.starts_with("@sealed class Widget extends Base {"));
    assert!(output.contains("    #count = 0;"));
    assert!(output.contains("    static get size() { return 1; }"));
    assert!(output.contains("    static {\n        setup(this);\n    }"));
}

#[test]
fn object_literals_print_members_inline() {
    let object = Expr::Object(ObjectLit {
        members: vec![
            ObjectMember::Field {
                key: PropKey::Str("a b".to_string()),
                decorators: vec![],
                value: Expr::num(1.0),
            },
            ObjectMember::Method {
                key: PropKey::Ident("go".to_string()),
                kind: MethodKind::Method,
                decorators: vec![Expr::ident("logged")],
                func: Func {
                    name: None,
                    params: vec!["x".to_string()],
                    body: vec![],
                },
            },
        ],
    });
    assert_eq!(
        print_expr(&object),
        "{ \"a b\": 1, @logged go(x) { } }"
    );
    assert_eq!(print_expr(&Expr::Object(ObjectLit::default())), "{}");
}

#[test]
fn class_declaration_prints_export_context() {
    let class = Class {
        name: Some("Widget".to_string()),
        superclass: None,
        decorators: vec![],
        members: vec![],
    };
    let module = Module {
        body: vec![Stmt::ClassDecl {
            class,
            export: ExportKind::Default,
        }],
    };
    assert_eq!(print_module(&module), "export default class Widget {\n}\n");
}
