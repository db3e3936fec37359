//! Import-statement insertion.
//!
//! The lowering pass references runtime entry points through module imports
//! when configured to; this helper owns the actual tree mutation: merging
//! into an existing import of the same module where possible, otherwise
//! inserting a fresh import after the module's leading import block.

use crate::ast::{ImportBinding, ImportDecl, Module, Stmt};

/// Ensure `module` imports `imported` from `source` under the local name
/// `local`. Idempotent: an existing identical binding is left alone.
pub fn ensure_named_import(module: &mut Module, source: &str, imported: &str, local: &str) {
    for stmt in &mut module.body {
        if let Stmt::Import(import) = stmt
            && import.source == source
        {
            let exists = import
                .bindings
                .iter()
                .any(|b| b.imported == imported && b.local == local);
            if !exists {
                import.bindings.push(ImportBinding {
                    imported: imported.to_string(),
                    local: local.to_string(),
                });
            }
            return;
        }
    }

    let position = module
        .body
        .iter()
        .take_while(|s| matches!(s, Stmt::Import(_)))
        .count();
    module.body.insert(
        position,
        Stmt::Import(ImportDecl {
            source: source.to_string(),
            bindings: vec![ImportBinding {
                imported: imported.to_string(),
                local: local.to_string(),
            }],
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    #[test]
    fn inserts_after_leading_imports() {
        let mut module = Module {
            body: vec![
                Stmt::Import(ImportDecl {
                    source: "other".to_string(),
                    bindings: vec![],
                }),
                Stmt::Expr(Expr::ident("x")),
            ],
        };
        ensure_named_import(&mut module, "runtime", "decorateClass", "decorateClass");
        assert!(matches!(&module.body[1], Stmt::Import(i) if i.source == "runtime"));
        assert!(matches!(&module.body[2], Stmt::Expr(_)));
    }

    #[test]
    fn merges_into_existing_import() {
        let mut module = Module::default();
        ensure_named_import(&mut module, "runtime", "decorateClass", "c");
        ensure_named_import(&mut module, "runtime", "decorateField", "f");
        assert_eq!(module.body.len(), 1);
        let Stmt::Import(import) = &module.body[0] else {
            panic!("expected import");
        };
        assert_eq!(import.bindings.len(), 2);
    }

    #[test]
    fn is_idempotent() {
        let mut module = Module::default();
        ensure_named_import(&mut module, "runtime", "decorateClass", "decorateClass");
        ensure_named_import(&mut module, "runtime", "decorateClass", "decorateClass");
        let Stmt::Import(import) = &module.body[0] else {
            panic!("expected import");
        };
        assert_eq!(import.bindings.len(), 1);
    }
}
