//! Lowering of decorated class fields: definition-time registration,
//! per-instance trampolines, key normalization, synthetic name allocation.

use declower_ast::printer::print_module;
use declower_ast::{Class, ClassMember, ExportKind, Expr, FieldMember, Module, PropKey, Stmt};
use declower_transform::{transform_module, DefineStyle, RuntimeReference, TransformOptions};

fn field(key: PropKey, is_static: bool, decorators: Vec<Expr>, value: Option<Expr>) -> ClassMember {
    ClassMember::Field(FieldMember {
        key,
        is_static,
        decorators,
        value,
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

fn lower_with(module: &mut Module, options: &TransformOptions) -> String {
    transform_module(module, options).expect("lowering succeeds");
    print_module(module)
}

#[test]
fn instance_field_registers_and_trampolines() {
    let mut module = class_module(vec![field(
        PropKey::Ident("count".to_string()),
        false,
        vec![Expr::ident("tracked")],
        Some(Expr::num(1.0)),
    )]);
    let output = lower(&mut module);
    assert!(output.contains(
        "decorateField(this.prototype, \"count\", [tracked], function () { return 1; });"
    ));
    assert!(output.contains("#count = initializeDeferredField(this, \"count\");"));
    assert!(output.contains("static {"));
    assert!(output.contains(
        "import { decorateField, initializeDeferredField } from \"declower/runtime\";"
    ));
}

#[test]
fn field_without_initializer_omits_thunk() {
    let mut module = class_module(vec![field(
        PropKey::Ident("count".to_string()),
        false,
        vec![Expr::ident("tracked")],
        None,
    )]);
    let output = lower(&mut module);
    assert!(output.contains("decorateField(this.prototype, \"count\", [tracked]);"));
    assert!(!output.contains("function"));
}

#[test]
fn decorator_lists_are_emitted_in_application_order() {
    let mut module = class_module(vec![field(
        PropKey::Ident("x".to_string()),
        false,
        vec![Expr::ident("a"), Expr::ident("b"), Expr::ident("c")],
        None,
    )]);
    let output = lower(&mut module);
    // Declared `@a @b @c`; innermost applies first, so the array reverses.
    assert!(output.contains("[c, b, a]"));
}

#[test]
fn static_field_materializes_at_definition_time() {
    let mut module = class_module(vec![field(
        PropKey::Ident("count".to_string()),
        true,
        vec![Expr::ident("tracked")],
        Some(Expr::num(0.0)),
    )]);
    let output = lower(&mut module);
    assert!(output.contains(
        "decorateField(this, \"count\", [tracked], function () { return 0; });"
    ));
    assert!(output.contains("initializeDeferredField(this, \"count\");"));
    assert!(!output.contains("this.prototype"));
    // Statics never get a per-instance trampoline.
    assert!(!output.contains("#count"));
}

#[test]
fn keys_normalize_to_runtime_values() {
    let mut module = class_module(vec![
        field(
            PropKey::Str("hello world".to_string()),
            false,
            vec![Expr::ident("d")],
            None,
        ),
        field(PropKey::Num(42.0), false, vec![Expr::ident("d")], None),
        field(
            PropKey::Computed(Box::new(Expr::ident("k"))),
            false,
            vec![Expr::ident("d")],
            None,
        ),
        field(
            PropKey::Private("secret".to_string()),
            false,
            vec![Expr::ident("d")],
            None,
        ),
    ]);
    let output = lower(&mut module);
    assert!(output.contains("decorateField(this.prototype, \"hello world\", [d]);"));
    assert!(output.contains("decorateField(this.prototype, 42, [d]);"));
    assert!(output.contains("decorateField(this.prototype, k, [d]);"));
    assert!(output.contains("decorateField(this.prototype, \"#secret\", [d]);"));
}

#[test]
fn synthetic_names_derive_from_key_shape() {
    let mut module = class_module(vec![
        field(PropKey::Num(42.0), false, vec![Expr::ident("d")], None),
        field(
            PropKey::Str("hello world".to_string()),
            false,
            vec![Expr::ident("d")],
            None,
        ),
        field(
            PropKey::Computed(Box::new(Expr::ident("k"))),
            false,
            vec![Expr::ident("d")],
            None,
        ),
    ]);
    let output = lower(&mut module);
    assert!(output.contains("#_42 = initializeDeferredField(this, 42);"));
    assert!(output.contains("#_helloworld = initializeDeferredField(this, \"hello world\");"));
    assert!(output.contains("#_ = initializeDeferredField(this, k);"));
}

#[test]
fn synthetic_name_avoids_declared_private_names() {
    let mut module = class_module(vec![
        field(PropKey::Private("count".to_string()), false, vec![], None),
        field(
            PropKey::Ident("count".to_string()),
            false,
            vec![Expr::ident("tracked")],
            None,
        ),
    ]);
    let output = lower(&mut module);
    assert!(output.contains("#count_ = initializeDeferredField(this, \"count\");"));
}

#[test]
fn nested_class_bodies_allocate_names_independently() {
    let inner = Class {
        name: None,
        superclass: None,
        decorators: vec![],
        members: vec![field(
            PropKey::Ident("x".to_string()),
            false,
            vec![Expr::ident("d")],
            None,
        )],
    };
    let mut module = class_module(vec![
        field(
            PropKey::Ident("x".to_string()),
            false,
            vec![Expr::ident("d")],
            None,
        ),
        field(
            PropKey::Ident("inner".to_string()),
            false,
            vec![],
            Some(Expr::Class(Box::new(inner))),
        ),
    ]);
    let output = lower(&mut module);
    let trampolines = output.matches("#x = initializeDeferredField(this, \"x\");").count();
    assert_eq!(trampolines, 2);
    assert!(!output.contains("#x_"));
}

#[test]
fn static_field_define_style_uses_private_static_holder() {
    let options = TransformOptions {
        runtime: RuntimeReference::Module {
            source: "declower/runtime".to_string(),
            short_names: false,
        },
        define_style: DefineStyle::StaticField,
    };
    let mut module = class_module(vec![field(
        PropKey::Ident("count".to_string()),
        false,
        vec![Expr::ident("tracked")],
        None,
    )]);
    let output = lower_with(&mut module, &options);
    assert!(output.contains("static #count = decorateField(this.prototype, \"count\", [tracked]);"));
    assert!(output.contains("#count_ = initializeDeferredField(this, \"count\");"));
    assert!(!output.contains("static {"));
}

#[test]
fn static_field_define_style_sequences_both_static_calls() {
    let options = TransformOptions {
        define_style: DefineStyle::StaticField,
        ..TransformOptions::default()
    };
    let mut module = class_module(vec![field(
        PropKey::Ident("count".to_string()),
        true,
        vec![Expr::ident("tracked")],
        None,
    )]);
    let output = lower_with(&mut module, &options);
    assert!(output.contains(
        "static #count = (decorateField(this, \"count\", [tracked]), \
         initializeDeferredField(this, \"count\"));"
    ));
}

#[test]
fn undecorated_fields_are_left_alone() {
    let mut module = class_module(vec![field(
        PropKey::Ident("plain".to_string()),
        false,
        vec![],
        Some(Expr::num(7.0)),
    )]);
    let output = lower(&mut module);
    assert!(output.contains("plain = 7;"));
    assert!(!output.contains("decorateField"));
    assert!(!output.contains("import"));
}
