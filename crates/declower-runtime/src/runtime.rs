//! The decorator runtime entry points.
//!
//! One `DecoratorRuntime` serves a whole program: lowered code calls into
//! it at class-definition time to fold decorator chains over member
//! descriptors, and per-instance trampolines call back in to materialize
//! deferred field descriptors.
//!
//! Every entry point also has a one-letter alias matching the compact
//! import mode of the lowering pass.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::descriptor::{ClassDecorator, Descriptor, Initializer, MemberDecorator};
use crate::object::{Obj, Value};

/// What a plain-object batch entry decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PojoKind {
    Field,
    Method,
}

/// One batched decoration of an object-literal member.
pub struct PojoEntry {
    pub kind: PojoKind,
    pub key: String,
    pub decorators: Vec<MemberDecorator>,
}

#[derive(Default)]
pub struct DecoratorRuntime {
    /// Deferred field descriptors, keyed by target object identity then
    /// member key. Entries persist for the target's lifetime so every
    /// instance materializes its own value.
    deferred: RefCell<FxHashMap<u64, FxHashMap<String, Descriptor>>>,
}

impl DecoratorRuntime {
    pub fn new() -> Self {
        DecoratorRuntime::default()
    }

    /// Apply a field's decorator chain at definition time.
    ///
    /// `decorators` is already in application order, innermost first. If
    /// the folded descriptor still carries an initializer the result is
    /// deferred for per-instance materialization; otherwise it installs on
    /// the target immediately. A second deferral under the same key
    /// replaces the first.
    pub fn decorate_field(
        &self,
        target: &Obj,
        key: &str,
        decorators: &[MemberDecorator],
        initializer: Option<Initializer>,
    ) {
        let descriptor = fold_member(target, key, Descriptor::base_field(initializer), decorators);
        if descriptor.initializer.is_some() {
            tracing::debug!(target_id = target.id(), key, "deferring field descriptor");
            self.deferred
                .borrow_mut()
                .entry(target.id())
                .or_default()
                .insert(key.to_string(), descriptor);
        } else {
            target.define_property(key, descriptor.into_property());
        }
    }

    /// Materialize a deferred field descriptor onto `instance`.
    ///
    /// The table is consulted for the instance itself first, then up its
    /// prototype chain, so instances find descriptors registered against
    /// their class's prototype and class objects find their own static
    /// entries. Misses are a no-op.
    pub fn initialize_deferred_field(&self, instance: &Value, key: &str) {
        let Some(obj) = instance.as_object() else {
            return;
        };
        let Some(descriptor) = self.lookup_deferred(obj, key) else {
            return;
        };
        let value = match &descriptor.initializer {
            Some(initializer) => initializer(instance),
            None => descriptor.value.clone().unwrap_or(Value::Undefined),
        };
        let installed = Descriptor {
            value: Some(value),
            initializer: None,
            get: None,
            set: None,
            ..descriptor
        };
        obj.define_property(key, installed.into_property());
    }

    fn lookup_deferred(&self, obj: &Obj, key: &str) -> Option<Descriptor> {
        let deferred = self.deferred.borrow();
        let mut current = Some(obj.clone());
        while let Some(obj) = current {
            if let Some(descriptor) = deferred.get(&obj.id()).and_then(|m| m.get(key)) {
                return Some(descriptor.clone());
            }
            current = obj.proto();
        }
        None
    }

    /// Apply a method/getter/setter decorator chain over the member's
    /// installed descriptor and reinstall the result.
    ///
    /// # Panics
    ///
    /// Panics if `target` has no own property at `key`; lowered code
    /// always emits the registration right after the member definition,
    /// so a miss is a compiler defect.
    pub fn decorate_method(&self, target: &Obj, key: &str, decorators: &[MemberDecorator]) {
        let Some(property) = target.get_own_property(key) else {
            panic!("bug: decorateMethod found no descriptor for `{key}`");
        };
        let mut descriptor = fold_member(
            target,
            key,
            Descriptor::from_property(&property),
            decorators,
        );
        // A decorator may hand back a field-style descriptor; its value
        // materializes once, against the target.
        if let Some(initializer) = descriptor.initializer.take() {
            descriptor.value = Some(initializer(&Value::Object(target.clone())));
        }
        target.define_property(key, descriptor.into_property());
    }

    /// Apply a class decorator chain, innermost first. Each decorator may
    /// replace the class; returning nothing keeps the current one.
    pub fn decorate_class(&self, class: &Obj, decorators: &[ClassDecorator]) -> Obj {
        let mut current = class.clone();
        for decorator in decorators {
            if let Some(replacement) = decorator(&current) {
                current = replacement;
            }
        }
        current
    }

    /// Apply a batch of member decorations to an object literal.
    ///
    /// Field entries materialize eagerly: the member's current value
    /// becomes the base initializer, the chain folds, and the result
    /// installs back on the object before the call returns.
    pub fn decorate_plain_object(&self, object: &Obj, entries: &[PojoEntry]) -> Obj {
        for entry in entries {
            match entry.kind {
                PojoKind::Method => self.decorate_method(object, &entry.key, &entry.decorators),
                PojoKind::Field => {
                    let current = object.get(&entry.key);
                    let initializer: Initializer = Rc::new(move |_| current.clone());
                    let descriptor = fold_member(
                        object,
                        &entry.key,
                        Descriptor::base_field(Some(initializer)),
                        &entry.decorators,
                    );
                    let receiver = Value::Object(object.clone());
                    let value = match &descriptor.initializer {
                        Some(initializer) => initializer(&receiver),
                        None => descriptor.value.clone().unwrap_or(Value::Undefined),
                    };
                    let installed = Descriptor {
                        value: Some(value),
                        initializer: None,
                        ..descriptor
                    };
                    object.define_property(&entry.key, installed.into_property());
                }
            }
        }
        object.clone()
    }

    // One-letter aliases, mirroring the compact import mode.

    pub fn f(
        &self,
        target: &Obj,
        key: &str,
        decorators: &[MemberDecorator],
        initializer: Option<Initializer>,
    ) {
        self.decorate_field(target, key, decorators, initializer);
    }

    pub fn i(&self, instance: &Value, key: &str) {
        self.initialize_deferred_field(instance, key);
    }

    pub fn m(&self, target: &Obj, key: &str, decorators: &[MemberDecorator]) {
        self.decorate_method(target, key, decorators);
    }

    pub fn c(&self, class: &Obj, decorators: &[ClassDecorator]) -> Obj {
        self.decorate_class(class, decorators)
    }

    pub fn p(&self, object: &Obj, entries: &[PojoEntry]) -> Obj {
        self.decorate_plain_object(object, entries)
    }
}

/// Fold a member decorator chain left to right; a decorator returning
/// nothing keeps the incoming descriptor.
fn fold_member(
    target: &Obj,
    key: &str,
    base: Descriptor,
    decorators: &[MemberDecorator],
) -> Descriptor {
    let mut descriptor = base;
    for decorator in decorators {
        if let Some(replacement) = decorator(target, key, &descriptor) {
            descriptor = replacement;
        }
    }
    descriptor
}
