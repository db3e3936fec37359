//! Runtime semantics for lowered decorator code.
//!
//! The lowering pass (`declower-transform`) turns decorator annotations
//! into calls against the entry points here: descriptor-folding member
//! decoration, deferred per-instance field initialization, class
//! replacement, and batched object-literal decoration. The object model
//! (`object`) is a deliberately small prototype-chain substrate the
//! semantics are expressed against.

pub mod descriptor;
pub mod object;
pub mod runtime;

pub use descriptor::{ClassDecorator, Descriptor, Initializer, MemberDecorator};
pub use object::{construct, new_class, prototype_of, NativeFn, Obj, Property, PropertyKind, Value};
pub use runtime::{DecoratorRuntime, PojoEntry, PojoKind};
