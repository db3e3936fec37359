//! Lowering pass: rewrites legacy decorator annotations into explicit,
//! ordered calls against the decorator runtime.
//!
//! The pass walks an already-parsed tree (see `declower-ast`) and fires a
//! rewrite rule at each of the six decorator-bearing positions: class
//! declarations, class expressions, class fields, class methods, and
//! object-literal fields/methods. The rewritten tree executes against the
//! runtime entry points (`declower-runtime`) with exactly the evaluation
//! order and `this`-binding semantics of the legacy proposal.
//!
//! Entry points: [`transform_module`] and [`transform_expression`].

pub mod error;
pub mod options;
pub mod pass;
pub mod scope;

pub use error::TransformError;
pub use options::{DefineStyle, RuntimeEntry, RuntimeReference, TransformOptions};
pub use pass::{transform_expression, transform_module};
