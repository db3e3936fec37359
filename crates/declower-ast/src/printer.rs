//! Compact JavaScript printer.
//!
//! Prints the AST back to readable JavaScript. Used by tests to assert on
//! transform output and by hosts for debugging; it makes no attempt at
//! minification or source fidelity beyond the tree itself.

use std::fmt::Write as _;

use crate::ast::{
    Class, ClassMember, DeclKind, ExportKind, Expr, Func, ImportDecl, MethodKind, Module,
    ObjectLit, ObjectMember, PropKey, Stmt,
};

pub struct Printer {
    output: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Printer {
    pub const fn new() -> Self {
        Printer {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Print a whole module.
    pub fn print_module(mut self, module: &Module) -> String {
        for stmt in &module.body {
            self.write_indent();
            self.emit_stmt(stmt);
            self.write_line();
        }
        self.output
    }

    /// Print a single expression.
    pub fn print_expr(mut self, expr: &Expr) -> String {
        self.emit_expr(expr);
        self.output
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(e) => {
                self.emit_expr(e);
                self.write(";");
            }
            Stmt::VarDecl {
                kind,
                name,
                init,
                exported,
            } => {
                if *exported {
                    self.write("export ");
                }
                self.write(match kind {
                    DeclKind::Var => "var ",
                    DeclKind::Let => "let ",
                    DeclKind::Const => "const ",
                });
                self.write(name);
                if let Some(init) = init {
                    self.write(" = ");
                    self.emit_expr(init);
                }
                self.write(";");
            }
            Stmt::Return(e) => {
                self.write("return");
                if let Some(e) = e {
                    self.write(" ");
                    self.emit_expr(e);
                }
                self.write(";");
            }
            Stmt::ClassDecl { class, export } => {
                match export {
                    ExportKind::None => {}
                    ExportKind::Named => self.write("export "),
                    ExportKind::Default => self.write("export default "),
                }
                self.emit_class(class);
            }
            Stmt::ExportDefaultExpr(e) => {
                self.write("export default ");
                self.emit_expr(e);
                self.write(";");
            }
            Stmt::Import(import) => self.emit_import(import),
            Stmt::Block(stmts) => self.emit_block(stmts),
            Stmt::Raw(text) => self.write(text),
        }
    }

    fn emit_import(&mut self, import: &ImportDecl) {
        self.write("import ");
        let default = import.bindings.iter().find(|b| b.imported == "default");
        let named: Vec<_> = import
            .bindings
            .iter()
            .filter(|b| b.imported != "default")
            .collect();
        if let Some(default) = default {
            self.write(&default.local);
            if !named.is_empty() {
                self.write(", ");
            }
        }
        if !named.is_empty() {
            self.write("{ ");
            for (i, binding) in named.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.write(&binding.imported);
                if binding.local != binding.imported {
                    self.write(" as ");
                    self.write(&binding.local);
                }
            }
            self.write(" }");
        }
        self.write(" from \"");
        self.write_escaped(&import.source);
        self.write("\";");
    }

    fn emit_block(&mut self, stmts: &[Stmt]) {
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in stmts {
            self.write_indent();
            self.emit_stmt(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) => self.write(name),
            Expr::This => self.write("this"),
            Expr::Str(s) => {
                self.write("\"");
                self.write_escaped(s);
                self.write("\"");
            }
            Expr::Num(n) => self.emit_number(*n),
            Expr::Bool(b) => self.write(if *b { "true" } else { "false" }),
            Expr::Null => self.write("null"),
            Expr::Undefined => self.write("undefined"),
            Expr::Array(elements) => {
                self.write("[");
                self.emit_comma_separated(elements);
                self.write("]");
            }
            Expr::Object(object) => self.emit_object_literal(object),
            Expr::Func(func) => self.emit_function(func),
            Expr::Class(class) => self.emit_class(class),
            Expr::Call { callee, args } => {
                self.emit_callee(callee);
                self.write("(");
                self.emit_comma_separated(args);
                self.write(")");
            }
            Expr::New { callee, args } => {
                self.write("new ");
                self.emit_callee(callee);
                self.write("(");
                self.emit_comma_separated(args);
                self.write(")");
            }
            Expr::Member { object, property } => {
                self.emit_expr(object);
                self.write(".");
                self.write(property);
            }
            Expr::Index { object, index } => {
                self.emit_expr(object);
                self.write("[");
                self.emit_expr(index);
                self.write("]");
            }
            Expr::Assign { target, value } => {
                self.emit_expr(target);
                self.write(" = ");
                self.emit_expr(value);
            }
            Expr::Seq(exprs) => {
                self.write("(");
                self.emit_comma_separated(exprs);
                self.write(")");
            }
            Expr::Paren(inner) => {
                self.write("(");
                self.emit_expr(inner);
                self.write(")");
            }
            Expr::Raw(text) => self.write(text),
        }
    }

    /// Function and class expressions in callee position need parentheses.
    fn emit_callee(&mut self, callee: &Expr) {
        match callee {
            Expr::Func(_) | Expr::Class(_) => {
                self.write("(");
                self.emit_expr(callee);
                self.write(")");
            }
            _ => self.emit_expr(callee),
        }
    }

    fn emit_number(&mut self, n: f64) {
        if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
            let _ = write!(self.output, "{}", n as i64);
        } else {
            let _ = write!(self.output, "{n}");
        }
    }

    fn emit_function(&mut self, func: &Func) {
        self.write("function ");
        if let Some(name) = &func.name {
            self.write(name);
        }
        self.write("(");
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(param);
        }
        self.write(") ");
        self.emit_function_body(&func.body);
    }

    fn emit_function_body(&mut self, body: &[Stmt]) {
        // Short bodies print on one line, matching the compact shape the
        // transform synthesizes for initializer thunks.
        match body {
            [] => self.write("{ }"),
            [stmt] => {
                self.write("{ ");
                self.emit_stmt(stmt);
                self.write(" }");
            }
            _ => self.emit_block(body),
        }
    }

    fn emit_class(&mut self, class: &Class) {
        for decorator in &class.decorators {
            self.write("@");
            self.emit_expr(decorator);
            self.write(" ");
        }
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name);
        }
        if let Some(superclass) = &class.superclass {
            self.write(" extends ");
            self.emit_expr(superclass);
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for member in &class.members {
            self.write_indent();
            self.emit_class_member(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.emit_decorators(&field.decorators);
                if field.is_static {
                    self.write("static ");
                }
                self.emit_prop_key(&field.key);
                if let Some(value) = &field.value {
                    self.write(" = ");
                    self.emit_expr(value);
                }
                self.write(";");
            }
            ClassMember::Method(method) => {
                self.emit_decorators(&method.decorators);
                if method.is_static {
                    self.write("static ");
                }
                match method.kind {
                    MethodKind::Method => {}
                    MethodKind::Getter => self.write("get "),
                    MethodKind::Setter => self.write("set "),
                }
                self.emit_prop_key(&method.key);
                self.write("(");
                for (i, param) in method.func.params.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(param);
                }
                self.write(") ");
                self.emit_function_body(&method.func.body);
            }
            ClassMember::StaticBlock(stmts) => {
                self.write("static ");
                self.emit_block(stmts);
            }
        }
    }

    fn emit_decorators(&mut self, decorators: &[Expr]) {
        for decorator in decorators {
            self.write("@");
            self.emit_expr(decorator);
            self.write(" ");
        }
    }

    fn emit_object_literal(&mut self, object: &ObjectLit) {
        if object.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, member) in object.members.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match member {
                ObjectMember::Field {
                    key,
                    decorators,
                    value,
                } => {
                    self.emit_decorators(decorators);
                    self.emit_prop_key(key);
                    self.write(": ");
                    self.emit_expr(value);
                }
                ObjectMember::Method {
                    key,
                    kind,
                    decorators,
                    func,
                } => {
                    self.emit_decorators(decorators);
                    match kind {
                        MethodKind::Method => {}
                        MethodKind::Getter => self.write("get "),
                        MethodKind::Setter => self.write("set "),
                    }
                    self.emit_prop_key(key);
                    self.write("(");
                    for (i, param) in func.params.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.write(param);
                    }
                    self.write(") ");
                    self.emit_function_body(&func.body);
                }
            }
        }
        self.write(" }");
    }

    fn emit_prop_key(&mut self, key: &PropKey) {
        match key {
            PropKey::Ident(name) => self.write(name),
            PropKey::Str(s) => {
                self.write("\"");
                self.write_escaped(s);
                self.write("\"");
            }
            PropKey::Num(n) => self.emit_number(*n),
            PropKey::Computed(expr) => {
                self.write("[");
                self.emit_expr(expr);
                self.write("]");
            }
            PropKey::Private(name) => {
                self.write("#");
                self.write(name);
            }
        }
    }

    fn emit_comma_separated(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(expr);
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                _ => self.output.push(c),
            }
        }
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a module with default settings.
pub fn print_module(module: &Module) -> String {
    Printer::new().print_module(module)
}

/// Print an expression with default settings.
pub fn print_expr(expr: &Expr) -> String {
    Printer::new().print_expr(expr)
}
