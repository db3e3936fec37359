//! Member descriptors: the record decorators inspect and replace.
//!
//! Every slot is optional so a decorator-returned descriptor distinguishes
//! "absent" from an explicit value; absent flags harden to `false` when the
//! descriptor is installed as a property.

use std::fmt;
use std::rc::Rc;

use crate::object::{NativeFn, Obj, Property, PropertyKind, Value};

/// Deferred initial-value computation, run with the receiver it
/// initializes.
pub type Initializer = Rc<dyn Fn(&Value) -> Value>;

/// A member decorator: `(target, key, descriptor) -> replacement or
/// unchanged`.
pub type MemberDecorator = Rc<dyn Fn(&Obj, &str, &Descriptor) -> Option<Descriptor>>;

/// A class decorator: `(class) -> replacement or unchanged`.
pub type ClassDecorator = Rc<dyn Fn(&Obj) -> Option<Obj>>;

#[derive(Clone, Default)]
pub struct Descriptor {
    pub configurable: Option<bool>,
    pub enumerable: Option<bool>,
    pub writable: Option<bool>,
    pub get: Option<NativeFn>,
    pub set: Option<NativeFn>,
    pub value: Option<Value>,
    pub initializer: Option<Initializer>,
}

impl Descriptor {
    /// The descriptor a freshly declared field starts from: all flags set,
    /// value deferred behind the initializer.
    pub fn base_field(initializer: Option<Initializer>) -> Self {
        Descriptor {
            configurable: Some(true),
            enumerable: Some(true),
            writable: Some(true),
            initializer,
            ..Descriptor::default()
        }
    }

    /// A descriptor carrying a plain value, the common shape decorators
    /// return to pin a member.
    pub fn with_value(value: Value) -> Self {
        Descriptor {
            configurable: Some(true),
            enumerable: Some(false),
            writable: Some(true),
            value: Some(value),
            ..Descriptor::default()
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// View of an installed property as a descriptor.
    pub fn from_property(property: &Property) -> Self {
        let mut descriptor = Descriptor {
            configurable: Some(property.configurable),
            enumerable: Some(property.enumerable),
            ..Descriptor::default()
        };
        match &property.kind {
            PropertyKind::Data { value, writable } => {
                descriptor.value = Some(value.clone());
                descriptor.writable = Some(*writable);
            }
            PropertyKind::Accessor { get, set } => {
                descriptor.get = get.clone();
                descriptor.set = set.clone();
            }
        }
        descriptor
    }

    /// Harden into an installable property. Absent flags default to
    /// `false`; accessor slots win over value slots.
    pub fn into_property(self) -> Property {
        let kind = if self.is_accessor() {
            PropertyKind::Accessor {
                get: self.get,
                set: self.set,
            }
        } else {
            PropertyKind::Data {
                value: self.value.unwrap_or(Value::Undefined),
                writable: self.writable.unwrap_or(false),
            }
        };
        Property {
            enumerable: self.enumerable.unwrap_or(false),
            configurable: self.configurable.unwrap_or(false),
            kind,
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("configurable", &self.configurable)
            .field("enumerable", &self.enumerable)
            .field("writable", &self.writable)
            .field("get", &self.get.as_ref().map(|_| "[function]"))
            .field("set", &self.set.as_ref().map(|_| "[function]"))
            .field("value", &self.value)
            .field("initializer", &self.initializer.as_ref().map(|_| "[function]"))
            .finish()
    }
}
