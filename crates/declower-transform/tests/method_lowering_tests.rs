//! Lowering of decorated methods, getters, and setters: the member stays
//! in place and a definition-time `decorateMethod` call follows it.

use declower_ast::printer::print_module;
use declower_ast::{
    Class, ClassMember, ExportKind, Expr, Func, MethodKind, MethodMember, Module, PropKey, Stmt,
};
use declower_transform::{transform_module, DefineStyle, TransformOptions};

fn method(
    key: &str,
    kind: MethodKind,
    is_static: bool,
    decorators: Vec<Expr>,
) -> ClassMember {
    ClassMember::Method(MethodMember {
        key: PropKey::Ident(key.to_string()),
        is_static,
        kind,
        decorators,
        func: Func {
            name: None,
            params: vec![],
            body: vec![Stmt::Return(Some(Expr::num(1.0)))],
        },
    })
}

fn class_module(members: Vec<ClassMember>) -> Module {
    Module {
        body: vec![Stmt::ClassDecl {
            class: Class {
                name: Some("Widget".to_string()),
                superclass: None,
                decorators: vec![],
                members,
            },
            export: ExportKind::None,
        }],
    }
}

fn lower(module: &mut Module) -> String {
    transform_module(module, &TransformOptions::default()).expect("lowering succeeds");
    print_module(module)
}

#[test]
fn instance_method_keeps_its_body_and_gains_a_block() {
    let mut module = class_module(vec![method(
        "run",
        MethodKind::Method,
        false,
        vec![Expr::ident("logged")],
    )]);
    let output = lower(&mut module);
    assert!(output.contains("run() { return 1; }"));
    assert!(output.contains("decorateMethod(this.prototype, \"run\", [logged]);"));
    assert!(output.contains("import { decorateMethod } from \"declower/runtime\";"));
    // The decorator annotation itself is gone.
    assert!(!output.contains("@logged"));
}

#[test]
fn registration_follows_the_member_it_decorates() {
    let mut module = class_module(vec![method(
        "run",
        MethodKind::Method,
        false,
        vec![Expr::ident("logged")],
    )]);
    let output = lower(&mut module);
    let member_at = output.find("run() {").expect("member printed");
    let call_at = output
        .find("decorateMethod(this.prototype")
        .expect("call printed");
    assert!(member_at < call_at);
}

#[test]
fn static_method_targets_the_class_object() {
    let mut module = class_module(vec![method(
        "create",
        MethodKind::Method,
        true,
        vec![Expr::ident("logged")],
    )]);
    let output = lower(&mut module);
    assert!(output.contains("static create() { return 1; }"));
    assert!(output.contains("decorateMethod(this, \"create\", [logged]);"));
    assert!(!output.contains("this.prototype"));
}

#[test]
fn getter_and_setter_each_get_their_own_registration() {
    let mut module = class_module(vec![
        method("size", MethodKind::Getter, false, vec![Expr::ident("a")]),
        method("size", MethodKind::Setter, false, vec![Expr::ident("b")]),
    ]);
    let output = lower(&mut module);
    assert!(output.contains("get size() { return 1; }"));
    assert!(output.contains("set size() { return 1; }"));
    assert!(output.contains("decorateMethod(this.prototype, \"size\", [a]);"));
    assert!(output.contains("decorateMethod(this.prototype, \"size\", [b]);"));
}

#[test]
fn method_decorators_apply_innermost_first() {
    let mut module = class_module(vec![method(
        "run",
        MethodKind::Method,
        false,
        vec![Expr::ident("outer"), Expr::ident("inner")],
    )]);
    let output = lower(&mut module);
    assert!(output.contains("[inner, outer]"));
}

#[test]
fn static_field_define_style_uses_a_private_holder() {
    let options = TransformOptions {
        define_style: DefineStyle::StaticField,
        ..TransformOptions::default()
    };
    let mut module = class_module(vec![method(
        "run",
        MethodKind::Method,
        false,
        vec![Expr::ident("logged")],
    )]);
    transform_module(&mut module, &options).expect("lowering succeeds");
    let output = print_module(&module);
    assert!(output.contains("static #run = decorateMethod(this.prototype, \"run\", [logged]);"));
    assert!(!output.contains("static {"));
}

#[test]
fn undecorated_methods_are_left_alone() {
    let mut module = class_module(vec![method("run", MethodKind::Method, false, vec![])]);
    let output = lower(&mut module);
    assert!(output.contains("run() { return 1; }"));
    assert!(!output.contains("decorateMethod"));
    assert!(!output.contains("import"));
}
