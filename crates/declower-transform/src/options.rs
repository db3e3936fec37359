//! Transform configuration.

use serde::{Deserialize, Serialize};

/// How generated code reaches the decorator runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum RuntimeReference {
    /// Entry points are reachable as properties of an ambient global
    /// namespace object, e.g. `__declower.decorateField(...)`.
    Global { name: String },
    /// Entry points are imported from a runtime module. `short_names`
    /// selects the one-letter export aliases in generated code; both alias
    /// sets are valid call targets on the runtime module.
    Module { source: String, short_names: bool },
}

/// How definition-time side-effecting code is attached to a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefineStyle {
    /// Native `static { ... }` blocks.
    StaticBlock,
    /// A synthetic private static field whose initializer performs the
    /// calls; for targets lacking static blocks.
    StaticField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub runtime: RuntimeReference,
    pub define_style: DefineStyle,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            runtime: RuntimeReference::Module {
                source: "declower/runtime".to_string(),
                short_names: false,
            },
            define_style: DefineStyle::StaticBlock,
        }
    }
}

/// The runtime entry points the pass emits calls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeEntry {
    DecorateField,
    DecorateMethod,
    DecorateClass,
    DecoratePlainObject,
    InitializeDeferredField,
}

impl RuntimeEntry {
    /// All entry points, in the stable order imports are emitted in.
    pub const ALL: [RuntimeEntry; 5] = [
        RuntimeEntry::DecorateField,
        RuntimeEntry::DecorateMethod,
        RuntimeEntry::DecorateClass,
        RuntimeEntry::DecoratePlainObject,
        RuntimeEntry::InitializeDeferredField,
    ];

    pub const fn long_name(self) -> &'static str {
        match self {
            RuntimeEntry::DecorateField => "decorateField",
            RuntimeEntry::DecorateMethod => "decorateMethod",
            RuntimeEntry::DecorateClass => "decorateClass",
            RuntimeEntry::DecoratePlainObject => "decoratePlainObject",
            RuntimeEntry::InitializeDeferredField => "initializeDeferredField",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            RuntimeEntry::DecorateField => "f",
            RuntimeEntry::DecorateMethod => "m",
            RuntimeEntry::DecorateClass => "c",
            RuntimeEntry::DecoratePlainObject => "p",
            RuntimeEntry::InitializeDeferredField => "i",
        }
    }
}
