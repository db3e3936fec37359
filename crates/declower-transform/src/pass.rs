//! The decorator lowering pass: six rewrite rules over decorated positions.

use std::mem;

use declower_ast::imports::ensure_named_import;
use declower_ast::visit::{self, MutVisitor};
use declower_ast::{
    Class, ClassMember, DeclKind, ExportKind, Expr, FieldMember, MethodMember, Module, ObjectLit,
    ObjectMember, PropKey, Stmt,
};
use rustc_hash::FxHashSet;

use crate::error::TransformError;
use crate::options::{DefineStyle, RuntimeEntry, RuntimeReference, TransformOptions};
use crate::scope::{BatchEntry, BatchKind, ClassScope, ObjectBatch};

/// Lower every decorated position in `module`.
///
/// On success the tree carries no decorator annotations; in module runtime
/// mode the required imports have been inserted. On error the tree is left
/// partially rewritten and must be discarded.
pub fn transform_module(
    module: &mut Module,
    options: &TransformOptions,
) -> Result<(), TransformError> {
    let mut pass = DecoratorLowering::new(options);
    pass.visit_module(module)?;
    pass.insert_runtime_imports(module);
    tracing::debug!(rewrites = pass.rewrites, "decorator lowering complete");
    Ok(())
}

/// Lower a lone expression (class expression or object literal).
///
/// No imports are inserted; with a module runtime reference the caller is
/// responsible for binding the entry-point names in scope.
pub fn transform_expression(
    expr: &mut Expr,
    options: &TransformOptions,
) -> Result<(), TransformError> {
    let mut pass = DecoratorLowering::new(options);
    pass.visit_expr(expr)?;
    tracing::debug!(rewrites = pass.rewrites, "decorator lowering complete");
    Ok(())
}

struct DecoratorLowering<'a> {
    options: &'a TransformOptions,
    /// Enclosing class bodies, innermost last. Collision domains for
    /// synthetic private names.
    class_scopes: Vec<ClassScope>,
    /// Enclosing object literals, innermost last. Pending decoration
    /// batches.
    object_batches: Vec<ObjectBatch>,
    /// Runtime entry points referenced so far; drives import insertion.
    used_entries: FxHashSet<RuntimeEntry>,
    rewrites: u32,
}

impl<'a> DecoratorLowering<'a> {
    fn new(options: &'a TransformOptions) -> Self {
        DecoratorLowering {
            options,
            class_scopes: Vec::new(),
            object_batches: Vec::new(),
            used_entries: FxHashSet::default(),
            rewrites: 0,
        }
    }

    /// The callee expression for a runtime entry point, per the configured
    /// reference mode.
    fn runtime_ref(&mut self, entry: RuntimeEntry) -> Expr {
        self.used_entries.insert(entry);
        match &self.options.runtime {
            RuntimeReference::Global { name } => {
                Expr::member(Expr::ident(name.clone()), entry.long_name())
            }
            RuntimeReference::Module { short_names, .. } => {
                if *short_names {
                    Expr::ident(entry.short_name())
                } else {
                    Expr::ident(entry.long_name())
                }
            }
        }
    }

    fn insert_runtime_imports(&self, module: &mut Module) {
        let RuntimeReference::Module {
            source,
            short_names,
        } = &self.options.runtime
        else {
            return;
        };
        for entry in RuntimeEntry::ALL {
            if self.used_entries.contains(&entry) {
                let name = if *short_names {
                    entry.short_name()
                } else {
                    entry.long_name()
                };
                ensure_named_import(module, source, name, name);
            }
        }
    }

    fn allocate_private(&mut self, key: &PropKey) -> Result<String, TransformError> {
        self.class_scopes
            .last_mut()
            .map(|scope| scope.allocate(key))
            .ok_or(TransformError::MisplacedMember("class body"))
    }

    /// Rule: decorated class declaration. The declaration becomes a
    /// value-producing binding so a replacement class still reaches every
    /// reference of the declared name.
    fn lower_class_decl(
        &mut self,
        mut class: Class,
        export: ExportKind,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        let decorators = reversed(mem::take(&mut class.decorators));
        let name = class.name.clone();
        let call = Expr::call(
            self.runtime_ref(RuntimeEntry::DecorateClass),
            vec![Expr::Class(Box::new(class)), Expr::array(decorators)],
        );
        self.rewrites += 1;
        match export {
            ExportKind::None => {
                let name = name.ok_or(TransformError::AnonymousClass("bare statement"))?;
                out.push(Stmt::const_decl(name, call));
            }
            ExportKind::Named => {
                let name = name.ok_or(TransformError::AnonymousClass("named export"))?;
                out.push(Stmt::VarDecl {
                    kind: DeclKind::Const,
                    name,
                    init: Some(call),
                    exported: true,
                });
            }
            ExportKind::Default => match name {
                Some(name) => {
                    out.push(Stmt::const_decl(name.clone(), call));
                    out.push(Stmt::ExportDefaultExpr(Expr::ident(name)));
                }
                None => out.push(Stmt::ExportDefaultExpr(call)),
            },
        }
        Ok(())
    }

    fn lower_class_member(
        &mut self,
        mut member: ClassMember,
        out: &mut Vec<ClassMember>,
    ) -> Result<(), TransformError> {
        visit::walk_class_member(self, &mut member)?;
        match member {
            ClassMember::Field(field) if !field.decorators.is_empty() => {
                self.lower_field(field, out)
            }
            ClassMember::Method(mut method) if !method.decorators.is_empty() => {
                let block = self.lower_method(&mut method)?;
                out.push(ClassMember::Method(method));
                out.push(block);
                Ok(())
            }
            other => {
                out.push(other);
                Ok(())
            }
        }
    }

    /// Rule: decorated field. The field is replaced by a definition-time
    /// `decorateField` call plus, for instance fields, a synthetic private
    /// trampoline field that materializes the deferred descriptor on each
    /// instance. Static fields instead materialize immediately at
    /// definition time.
    fn lower_field(
        &mut self,
        field: FieldMember,
        out: &mut Vec<ClassMember>,
    ) -> Result<(), TransformError> {
        let FieldMember {
            key,
            is_static,
            decorators,
            value,
        } = field;
        let target = if is_static {
            Expr::This
        } else {
            Expr::member(Expr::This, "prototype")
        };
        let key_expr = class_key_expr(&key);
        let mut args = vec![target, key_expr.clone(), Expr::array(reversed(decorators))];
        if let Some(value) = value {
            // Plain function expression so `this` inside the initializer
            // binds to the receiver the runtime calls it with.
            args.push(Expr::thunk(vec![Stmt::Return(Some(value))]));
        }
        let decorate = Expr::call(self.runtime_ref(RuntimeEntry::DecorateField), args);
        let static_init = if is_static {
            Some(Expr::call(
                self.runtime_ref(RuntimeEntry::InitializeDeferredField),
                vec![Expr::This, key_expr.clone()],
            ))
        } else {
            None
        };
        match self.options.define_style {
            DefineStyle::StaticBlock => {
                let mut stmts = vec![Stmt::expr(decorate)];
                if let Some(init) = static_init {
                    stmts.push(Stmt::expr(init));
                }
                out.push(ClassMember::StaticBlock(stmts));
            }
            DefineStyle::StaticField => {
                let value = match static_init {
                    Some(init) => Expr::seq(vec![decorate, init]),
                    None => decorate,
                };
                let name = self.allocate_private(&key)?;
                out.push(ClassMember::Field(FieldMember {
                    key: PropKey::Private(name),
                    is_static: true,
                    decorators: Vec::new(),
                    value: Some(value),
                }));
            }
        }
        if !is_static {
            let name = self.allocate_private(&key)?;
            let init = Expr::call(
                self.runtime_ref(RuntimeEntry::InitializeDeferredField),
                vec![Expr::This, key_expr],
            );
            out.push(ClassMember::Field(FieldMember {
                key: PropKey::Private(name),
                is_static: false,
                decorators: Vec::new(),
                value: Some(init),
            }));
        }
        self.rewrites += 1;
        Ok(())
    }

    /// Rule: decorated method/getter/setter. The member stays; a
    /// definition-time `decorateMethod` call is inserted after it.
    fn lower_method(&mut self, method: &mut MethodMember) -> Result<ClassMember, TransformError> {
        let target = if method.is_static {
            Expr::This
        } else {
            Expr::member(Expr::This, "prototype")
        };
        let key_expr = class_key_expr(&method.key);
        let decorators = reversed(mem::take(&mut method.decorators));
        let call = Expr::call(
            self.runtime_ref(RuntimeEntry::DecorateMethod),
            vec![target, key_expr, Expr::array(decorators)],
        );
        self.rewrites += 1;
        match self.options.define_style {
            DefineStyle::StaticBlock => Ok(ClassMember::StaticBlock(vec![Stmt::expr(call)])),
            DefineStyle::StaticField => {
                let name = self.allocate_private(&method.key)?;
                Ok(ClassMember::Field(FieldMember {
                    key: PropKey::Private(name),
                    is_static: true,
                    decorators: Vec::new(),
                    value: Some(call),
                }))
            }
        }
    }

    /// Rule: decorated object-literal member. Recorded into the innermost
    /// pending batch; the literal itself is wrapped when it closes.
    fn record_object_decoration(
        &mut self,
        kind: BatchKind,
        key: &PropKey,
        decorators: &mut Vec<Expr>,
    ) -> Result<(), TransformError> {
        let key = object_key_expr(key)?;
        let decorators = reversed(mem::take(decorators));
        let batch = self
            .object_batches
            .last_mut()
            .ok_or(TransformError::MisplacedMember("object literal"))?;
        batch.entries.push(BatchEntry {
            kind,
            key,
            decorators,
        });
        self.rewrites += 1;
        Ok(())
    }
}

impl MutVisitor for DecoratorLowering<'_> {
    type Error = TransformError;

    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) -> Result<(), TransformError> {
        let old = mem::take(stmts);
        stmts.reserve(old.len());
        for mut stmt in old {
            match stmt {
                Stmt::ClassDecl { mut class, export } if !class.decorators.is_empty() => {
                    self.visit_class(&mut class)?;
                    self.lower_class_decl(class, export, stmts)?;
                }
                _ => {
                    self.visit_stmt(&mut stmt)?;
                    stmts.push(stmt);
                }
            }
        }
        Ok(())
    }

    fn visit_expr(&mut self, expr: &mut Expr) -> Result<(), TransformError> {
        match expr {
            Expr::Class(class) if !class.decorators.is_empty() => {
                self.visit_class(class)?;
                let decorators = reversed(mem::take(&mut class.decorators));
                let callee = self.runtime_ref(RuntimeEntry::DecorateClass);
                let class_expr = mem::replace(expr, Expr::Undefined);
                *expr = Expr::call(callee, vec![class_expr, Expr::array(decorators)]);
                self.rewrites += 1;
                Ok(())
            }
            Expr::Object(object) => {
                self.object_batches.push(ObjectBatch::default());
                let walked = self.visit_object_lit(object);
                let batch = self.object_batches.pop();
                walked?;
                if let Some(batch) = batch
                    && !batch.is_empty()
                {
                    let callee = self.runtime_ref(RuntimeEntry::DecoratePlainObject);
                    let literal = mem::replace(expr, Expr::Undefined);
                    *expr = Expr::call(callee, vec![literal, batch.into_array_expr()]);
                }
                Ok(())
            }
            _ => visit::walk_expr(self, expr),
        }
    }

    fn visit_class(&mut self, class: &mut Class) -> Result<(), TransformError> {
        for decorator in &mut class.decorators {
            self.visit_expr(decorator)?;
        }
        if let Some(superclass) = &mut class.superclass {
            self.visit_expr(superclass)?;
        }
        self.class_scopes.push(ClassScope::of_class(class));
        let members = mem::take(&mut class.members);
        let mut out = Vec::with_capacity(members.len());
        let mut result = Ok(());
        for member in members {
            if let Err(error) = self.lower_class_member(member, &mut out) {
                result = Err(error);
                break;
            }
        }
        class.members = out;
        self.class_scopes.pop();
        result
    }

    fn visit_object_lit(&mut self, object: &mut ObjectLit) -> Result<(), TransformError> {
        for member in &mut object.members {
            visit::walk_object_member(self, member)?;
            match member {
                ObjectMember::Field {
                    key, decorators, ..
                } if !decorators.is_empty() => {
                    self.record_object_decoration(BatchKind::Field, key, decorators)?;
                }
                ObjectMember::Method {
                    key, decorators, ..
                } if !decorators.is_empty() => {
                    self.record_object_decoration(BatchKind::Method, key, decorators)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn reversed(mut decorators: Vec<Expr>) -> Vec<Expr> {
    decorators.reverse();
    decorators
}

/// Normalize a class-member key into the runtime call-site expression.
fn class_key_expr(key: &PropKey) -> Expr {
    match key {
        PropKey::Ident(name) => Expr::str(name.clone()),
        PropKey::Str(s) => Expr::str(s.clone()),
        PropKey::Num(n) => Expr::num(*n),
        PropKey::Computed(expr) => (**expr).clone(),
        PropKey::Private(name) => Expr::str(format!("#{name}")),
    }
}

/// Object-literal keys normalize the same way except private names, which
/// do not exist there.
fn object_key_expr(key: &PropKey) -> Result<Expr, TransformError> {
    if let PropKey::Private(name) = key {
        return Err(TransformError::PrivateObjectMember(name.clone()));
    }
    Ok(class_key_expr(key))
}
