//! Mutable traversal over the AST.
//!
//! `MutVisitor` is the host traversal surface the lowering pass hooks into:
//! every method defaults to walking the node's children via the matching
//! `walk_*` free function, so an implementation overrides only the node
//! kinds it rewrites and calls `walk_*` to continue into children.
//!
//! All hooks are fallible; the associated `Error` lets a pass abort the
//! whole traversal on the first structural violation.

use crate::ast::{Class, ClassMember, Expr, Module, ObjectLit, ObjectMember, PropKey, Stmt};

pub trait MutVisitor: Sized {
    type Error;

    fn visit_module(&mut self, module: &mut Module) -> Result<(), Self::Error> {
        self.visit_stmts(&mut module.body)
    }

    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) -> Result<(), Self::Error> {
        walk_stmts(self, stmts)
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) -> Result<(), Self::Error> {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &mut Expr) -> Result<(), Self::Error> {
        walk_expr(self, expr)
    }

    fn visit_class(&mut self, class: &mut Class) -> Result<(), Self::Error> {
        walk_class(self, class)
    }

    fn visit_object_lit(&mut self, object: &mut ObjectLit) -> Result<(), Self::Error> {
        walk_object_lit(self, object)
    }
}

pub fn walk_stmts<V: MutVisitor>(v: &mut V, stmts: &mut Vec<Stmt>) -> Result<(), V::Error> {
    for stmt in stmts {
        v.visit_stmt(stmt)?;
    }
    Ok(())
}

pub fn walk_stmt<V: MutVisitor>(v: &mut V, stmt: &mut Stmt) -> Result<(), V::Error> {
    match stmt {
        Stmt::Expr(e) | Stmt::ExportDefaultExpr(e) => v.visit_expr(e),
        Stmt::VarDecl { init, .. } => match init {
            Some(e) => v.visit_expr(e),
            None => Ok(()),
        },
        Stmt::Return(e) => match e {
            Some(e) => v.visit_expr(e),
            None => Ok(()),
        },
        Stmt::ClassDecl { class, .. } => v.visit_class(class),
        Stmt::Block(stmts) => v.visit_stmts(stmts),
        Stmt::Import(_) | Stmt::Raw(_) => Ok(()),
    }
}

pub fn walk_expr<V: MutVisitor>(v: &mut V, expr: &mut Expr) -> Result<(), V::Error> {
    match expr {
        Expr::Array(elements) | Expr::Seq(elements) => {
            for e in elements {
                v.visit_expr(e)?;
            }
            Ok(())
        }
        Expr::Object(object) => v.visit_object_lit(object),
        Expr::Func(func) => v.visit_stmts(&mut func.body),
        Expr::Class(class) => v.visit_class(class),
        Expr::Call { callee, args } | Expr::New { callee, args } => {
            v.visit_expr(callee)?;
            for a in args {
                v.visit_expr(a)?;
            }
            Ok(())
        }
        Expr::Member { object, .. } => v.visit_expr(object),
        Expr::Index { object, index } => {
            v.visit_expr(object)?;
            v.visit_expr(index)
        }
        Expr::Assign { target, value } => {
            v.visit_expr(target)?;
            v.visit_expr(value)
        }
        Expr::Paren(inner) => v.visit_expr(inner),
        Expr::Ident(_)
        | Expr::This
        | Expr::Str(_)
        | Expr::Num(_)
        | Expr::Bool(_)
        | Expr::Null
        | Expr::Undefined
        | Expr::Raw(_) => Ok(()),
    }
}

pub fn walk_class<V: MutVisitor>(v: &mut V, class: &mut Class) -> Result<(), V::Error> {
    for d in &mut class.decorators {
        v.visit_expr(d)?;
    }
    if let Some(superclass) = &mut class.superclass {
        v.visit_expr(superclass)?;
    }
    for member in &mut class.members {
        walk_class_member(v, member)?;
    }
    Ok(())
}

pub fn walk_class_member<V: MutVisitor>(
    v: &mut V,
    member: &mut ClassMember,
) -> Result<(), V::Error> {
    match member {
        ClassMember::Field(field) => {
            for d in &mut field.decorators {
                v.visit_expr(d)?;
            }
            walk_prop_key(v, &mut field.key)?;
            match &mut field.value {
                Some(value) => v.visit_expr(value),
                None => Ok(()),
            }
        }
        ClassMember::Method(method) => {
            for d in &mut method.decorators {
                v.visit_expr(d)?;
            }
            walk_prop_key(v, &mut method.key)?;
            v.visit_stmts(&mut method.func.body)
        }
        ClassMember::StaticBlock(stmts) => v.visit_stmts(stmts),
    }
}

pub fn walk_object_lit<V: MutVisitor>(v: &mut V, object: &mut ObjectLit) -> Result<(), V::Error> {
    for member in &mut object.members {
        walk_object_member(v, member)?;
    }
    Ok(())
}

pub fn walk_object_member<V: MutVisitor>(
    v: &mut V,
    member: &mut ObjectMember,
) -> Result<(), V::Error> {
    match member {
        ObjectMember::Field {
            key,
            decorators,
            value,
        } => {
            for d in decorators {
                v.visit_expr(d)?;
            }
            walk_prop_key(v, key)?;
            v.visit_expr(value)
        }
        ObjectMember::Method {
            key,
            decorators,
            func,
            ..
        } => {
            for d in decorators {
                v.visit_expr(d)?;
            }
            walk_prop_key(v, key)?;
            v.visit_stmts(&mut func.body)
        }
    }
}

pub fn walk_prop_key<V: MutVisitor>(v: &mut V, key: &mut PropKey) -> Result<(), V::Error> {
    match key {
        PropKey::Computed(expr) => v.visit_expr(expr),
        _ => Ok(()),
    }
}
