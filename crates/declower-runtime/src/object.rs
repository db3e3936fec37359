//! A minimal prototype-based object model.
//!
//! Just enough of the target object semantics for decorator evaluation:
//! identity-keyed objects with a prototype link, ordered own properties,
//! and data/accessor property records. Classes are ordinary objects wired
//! together by [`new_class`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Num(f64),
    Str(Rc<str>),
    Object(Obj),
    Function(NativeFn),
}

/// A host function: `(this, args) -> result`.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> Value>;

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn function(f: impl Fn(&Value, &[Value]) -> Value + 'static) -> Self {
        Value::Function(Rc::new(f))
    }

    pub fn as_object(&self) -> Option<&Obj> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Invoke the value as a function with the given receiver.
    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        match self {
            Value::Function(f) => f(this, args),
            _ => Value::Undefined,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Object(obj) => write!(f, "[object #{}]", obj.id()),
            Value::Function(_) => write!(f, "[function]"),
        }
    }
}

/// An own-property record.
#[derive(Clone)]
pub struct Property {
    pub enumerable: bool,
    pub configurable: bool,
    pub kind: PropertyKind,
}

#[derive(Clone)]
pub enum PropertyKind {
    Data { value: Value, writable: bool },
    Accessor { get: Option<NativeFn>, set: Option<NativeFn> },
}

impl Property {
    /// A plain data property with all flags set, the shape an ordinary
    /// assignment or literal member produces.
    pub fn data(value: Value) -> Self {
        Property {
            enumerable: true,
            configurable: true,
            kind: PropertyKind::Data {
                value,
                writable: true,
            },
        }
    }
}

/// A heap object: identity, prototype link, ordered own properties.
#[derive(Clone)]
pub struct Obj(Rc<ObjectData>);

struct ObjectData {
    id: u64,
    proto: RefCell<Option<Obj>>,
    props: RefCell<IndexMap<String, Property>>,
}

impl Obj {
    pub fn new() -> Self {
        Obj(Rc::new(ObjectData {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            proto: RefCell::new(None),
            props: RefCell::new(IndexMap::new()),
        }))
    }

    /// Stable identity for the object's lifetime.
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn proto(&self) -> Option<Obj> {
        self.0.proto.borrow().clone()
    }

    pub fn set_proto(&self, proto: Option<Obj>) {
        *self.0.proto.borrow_mut() = proto;
    }

    pub fn define_property(&self, key: &str, property: Property) {
        self.0.props.borrow_mut().insert(key.to_string(), property);
    }

    pub fn get_own_property(&self, key: &str) -> Option<Property> {
        self.0.props.borrow().get(key).cloned()
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.props.borrow().contains_key(key)
    }

    /// Own property keys in definition order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.props.borrow().keys().cloned().collect()
    }

    /// Read `key`, walking the prototype chain. Getters run with the
    /// original receiver.
    pub fn get(&self, key: &str) -> Value {
        self.get_with_receiver(key, &Value::Object(self.clone()))
    }

    fn get_with_receiver(&self, key: &str, receiver: &Value) -> Value {
        if let Some(property) = self.get_own_property(key) {
            return match property.kind {
                PropertyKind::Data { value, .. } => value,
                PropertyKind::Accessor { get: Some(get), .. } => get(receiver, &[]),
                PropertyKind::Accessor { get: None, .. } => Value::Undefined,
            };
        }
        match self.proto() {
            Some(proto) => proto.get_with_receiver(key, receiver),
            None => Value::Undefined,
        }
    }

    /// Write `key`. A setter anywhere on the chain intercepts; otherwise
    /// the write creates or updates an own data property.
    pub fn set(&self, key: &str, value: Value) {
        let receiver = Value::Object(self.clone());
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            if let Some(property) = obj.get_own_property(key) {
                match property.kind {
                    PropertyKind::Accessor { set: Some(set), .. } => {
                        set(&receiver, &[value]);
                        return;
                    }
                    PropertyKind::Accessor { set: None, .. } => return,
                    PropertyKind::Data { writable: false, .. } => return,
                    PropertyKind::Data { .. } => break,
                }
            }
            current = obj.proto();
        }
        self.define_property(key, Property::data(value));
    }

    /// Invoke the property at `key` as a method of this object.
    pub fn invoke(&self, key: &str, args: &[Value]) -> Value {
        let this = Value::Object(self.clone());
        self.get(key).call(&this, args)
    }
}

impl Default for Obj {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Obj(#{})", self.0.id)
    }
}

/// Build a class object: a `prototype` own property, a `constructor` back
/// link, and for subclasses both the instance-side and static-side chains.
pub fn new_class(name: &str, parent: Option<&Obj>) -> Obj {
    let prototype = Obj::new();
    let class = Obj::new();
    if let Some(parent) = parent {
        prototype.set_proto(prototype_of(parent));
        class.set_proto(Some(parent.clone()));
    }
    class.define_property(
        "prototype",
        Property {
            enumerable: false,
            configurable: false,
            kind: PropertyKind::Data {
                value: Value::Object(prototype.clone()),
                writable: false,
            },
        },
    );
    class.define_property("name", Property::data(Value::string(name)));
    prototype.define_property("constructor", Property::data(Value::Object(class.clone())));
    class
}

/// The instance prototype of a class object, if it has one.
pub fn prototype_of(class: &Obj) -> Option<Obj> {
    match class.get_own_property("prototype") {
        Some(Property {
            kind: PropertyKind::Data {
                value: Value::Object(prototype),
                ..
            },
            ..
        }) => Some(prototype),
        _ => None,
    }
}

/// Allocate an instance of `class`: a fresh object whose prototype is the
/// class's `prototype` object.
pub fn construct(class: &Obj) -> Obj {
    let instance = Obj::new();
    instance.set_proto(prototype_of(class));
    instance
}
