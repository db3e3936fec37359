//! Syntax tree and tree utilities for the declower decorator compiler.
//!
//! This crate provides the pieces the lowering pass treats as collaborators:
//! - The owned JavaScript AST with decorator annotations attached
//!   (`ast`), including terse builder helpers for synthesizing nodes
//! - A mutable visitor over the tree (`visit`)
//! - A compact JavaScript printer (`printer`) used by tests and debugging
//! - Import-statement insertion (`imports`)
//!
//! The AST deliberately covers only the surface the decorator transform
//! needs to observe or synthesize; anything else a host tree might carry
//! can ride along as `Expr::Raw` / `Stmt::Raw` passthrough text.

pub mod ast;
pub mod imports;
pub mod printer;
pub mod visit;

pub use ast::{
    Class, ClassMember, DeclKind, ExportKind, Expr, FieldMember, Func, ImportBinding, ImportDecl,
    MethodKind, MethodMember, Module, ObjectLit, ObjectMember, PropKey, Stmt,
};
pub use printer::Printer;
pub use visit::MutVisitor;
