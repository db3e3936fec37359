//! Traversal-scoped state: class-body collision domains and object-literal
//! decoration batches.
//!
//! Both are explicit stacks owned by the single pass invocation, pushed and
//! popped on enter/exit of the corresponding node kind, and discarded when
//! the pass returns. Nothing here survives into program runtime.

use declower_ast::{Class, Expr, PropKey};
use rustc_hash::FxHashSet;

/// Collision domain for one class body: every private name already declared
/// there, plus every synthetic name handed out so far.
#[derive(Debug)]
pub struct ClassScope {
    private_names: FxHashSet<String>,
}

impl ClassScope {
    pub fn of_class(class: &Class) -> Self {
        ClassScope {
            private_names: class.private_names(),
        }
    }

    /// Allocate a fresh private name for the trampoline field of `key`.
    ///
    /// The candidate starts from a readable base derived from the key and
    /// grows trailing underscores until it collides with nothing in this
    /// class body. Allocated names join the collision domain so repeated
    /// allocations stay distinct.
    pub fn allocate(&mut self, key: &PropKey) -> String {
        let mut candidate = base_name(key);
        while self.private_names.contains(&candidate) {
            candidate.push('_');
        }
        self.private_names.insert(candidate.clone());
        candidate
    }
}

/// Readable base for a synthetic private name.
fn base_name(key: &PropKey) -> String {
    match key {
        PropKey::Ident(name) => name.clone(),
        PropKey::Num(n) => {
            let mut base = String::from("_");
            base.extend(format!("{n}").chars().filter(char::is_ascii_digit));
            base
        }
        PropKey::Str(s) => {
            let mut base = String::from("_");
            base.extend(s.chars().filter(|c| c.is_ascii_alphabetic()));
            base
        }
        PropKey::Computed(_) | PropKey::Private(_) => String::from("_"),
    }
}

/// Which runtime treatment an object-literal batch entry gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Field,
    Method,
}

impl BatchKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BatchKind::Field => "field",
            BatchKind::Method => "method",
        }
    }
}

/// One recorded decoration of an object-literal member: kind, normalized
/// key expression, and the decorator list already reversed into
/// application order.
#[derive(Debug)]
pub struct BatchEntry {
    pub kind: BatchKind,
    pub key: Expr,
    pub decorators: Vec<Expr>,
}

/// Pending decorations for one object literal, accumulated while its
/// members are visited and consolidated into a single runtime call when the
/// literal closes.
#[derive(Debug, Default)]
pub struct ObjectBatch {
    pub entries: Vec<BatchEntry>,
}

impl ObjectBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the batch as the array-of-triples argument of
    /// `decoratePlainObject`.
    pub fn into_array_expr(self) -> Expr {
        Expr::array(
            self.entries
                .into_iter()
                .map(|entry| {
                    Expr::array(vec![
                        Expr::str(entry.kind.as_str()),
                        entry.key,
                        Expr::array(entry.decorators),
                    ])
                })
                .collect(),
        )
    }
}
