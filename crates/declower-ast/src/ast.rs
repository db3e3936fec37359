//! Owned JavaScript AST with legacy decorator annotations.
//!
//! Decorator-bearing positions (classes, class fields/methods, object-literal
//! fields/methods) each carry a `decorators: Vec<Expr>` in declaration order.
//! The tree is plain data: `Clone` + `PartialEq` so transforms can be checked
//! for no-op behavior by structural equality.

use serde::{Deserialize, Serialize};

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Identifier reference: `foo`
    Ident(String),
    /// `this`
    This,
    /// String literal: `"hello"`
    Str(String),
    /// Numeric literal: `42`, `3.14`
    Num(f64),
    /// Boolean literal
    Bool(bool),
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// Array literal: `[a, b]`
    Array(Vec<Expr>),
    /// Object literal: `{ a: 1, m() {} }`
    Object(ObjectLit),
    /// Function expression: `function name(params) { body }`
    Func(Func),
    /// Class expression, possibly decorated
    Class(Box<Class>),
    /// Call expression: `callee(args)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// New expression: `new Callee(args)`
    New { callee: Box<Expr>, args: Vec<Expr> },
    /// Property access: `object.property`
    Member { object: Box<Expr>, property: String },
    /// Element access: `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },
    /// Assignment: `target = value`
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// Comma sequence: `(a, b)`
    Seq(Vec<Expr>),
    /// Parenthesized expression: `(expr)`
    Paren(Box<Expr>),
    /// Raw source passthrough (escape hatch for constructs the transform
    /// never inspects)
    Raw(String),
}

/// An object literal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectLit {
    pub members: Vec<ObjectMember>,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectMember {
    /// `key: value`, possibly decorated
    Field {
        key: PropKey,
        decorators: Vec<Expr>,
        value: Expr,
    },
    /// `key() {}` / `get key() {}` / `set key(v) {}`, possibly decorated
    Method {
        key: PropKey,
        kind: MethodKind,
        decorators: Vec<Expr>,
        func: Func,
    },
}

/// A function (expression body or method body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Func {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A class (declaration body or expression), possibly decorated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: Option<String>,
    pub superclass: Option<Expr>,
    pub decorators: Vec<Expr>,
    pub members: Vec<ClassMember>,
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassMember {
    Field(FieldMember),
    Method(MethodMember),
    /// Definition-time side-effecting block: `static { ... }`
    StaticBlock(Vec<Stmt>),
}

/// A class field: `[static] key = value;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMember {
    pub key: PropKey,
    pub is_static: bool,
    pub decorators: Vec<Expr>,
    pub value: Option<Expr>,
}

/// A class method, getter, or setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMember {
    pub key: PropKey,
    pub is_static: bool,
    pub kind: MethodKind,
    pub decorators: Vec<Expr>,
    pub func: Func,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// A property key in a class body or object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropKey {
    /// Plain identifier key: `foo`
    Ident(String),
    /// String literal key: `"foo bar"`
    Str(String),
    /// Numeric literal key: `42`
    Num(f64),
    /// Computed key: `[expr]`
    Computed(Box<Expr>),
    /// Private name: `#foo` (stored without the `#`)
    Private(String),
}

/// Export context of a class declaration statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportKind {
    None,
    Named,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression statement
    Expr(Expr),
    /// `[export] const|let|var name = init;`
    VarDecl {
        kind: DeclKind,
        name: String,
        init: Option<Expr>,
        exported: bool,
    },
    /// `return expr;`
    Return(Option<Expr>),
    /// `[export] class Name { ... }`
    ClassDecl { class: Class, export: ExportKind },
    /// `export default expr;`
    ExportDefaultExpr(Expr),
    /// `import ... from "source";`
    Import(ImportDecl),
    /// `{ stmts }`
    Block(Vec<Stmt>),
    /// Raw source passthrough
    Raw(String),
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub source: String,
    pub bindings: Vec<ImportBinding>,
}

/// One imported binding; `imported == "default"` is a default import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBinding {
    pub imported: String,
    pub local: String,
}

/// A whole source unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

// =========================================================================
// Builder helpers for node construction
// =========================================================================

impl Expr {
    /// Create an identifier node
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Create a string literal
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Create a numeric literal
    pub fn num(n: f64) -> Self {
        Self::Num(n)
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Create a property access
    pub fn member(object: Self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an array literal
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::Array(elements)
    }

    /// Create an anonymous zero-parameter function expression with the
    /// given body. Used for initializer thunks.
    pub const fn thunk(body: Vec<Stmt>) -> Self {
        Self::Func(Func {
            name: None,
            params: Vec::new(),
            body,
        })
    }

    /// Create a comma sequence
    pub const fn seq(exprs: Vec<Self>) -> Self {
        Self::Seq(exprs)
    }
}

impl Stmt {
    /// Create an expression statement
    pub const fn expr(e: Expr) -> Self {
        Self::Expr(e)
    }

    /// Create a `const` declaration
    pub fn const_decl(name: impl Into<String>, init: Expr) -> Self {
        Self::VarDecl {
            kind: DeclKind::Const,
            name: name.into(),
            init: Some(init),
            exported: false,
        }
    }
}

impl Class {
    /// Names of all private members declared in this class body
    /// (fields, methods, accessors), without the `#` sigil.
    pub fn private_names(&self) -> rustc_hash::FxHashSet<String> {
        let mut names = rustc_hash::FxHashSet::default();
        for member in &self.members {
            let key = match member {
                ClassMember::Field(f) => &f.key,
                ClassMember::Method(m) => &m.key,
                ClassMember::StaticBlock(_) => continue,
            };
            if let PropKey::Private(name) = key {
                names.insert(name.clone());
            }
        }
        names
    }
}

impl PropKey {
    /// Whether this key is a private name.
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
}
