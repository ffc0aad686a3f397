//! An in-memory environment of named values.
//!
//! Hosts without a live interpreter describe what is in scope with a [`Namespace`]; it backs
//! both completion and signature lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::argspec::{CallableResolver, Signature};
use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Module,
    Class,
    Function,
    Instance,
}

/// A named value: its kind, a signature for functions, and its attributes.
///
/// A class's initializer is its `__init__` attribute; an instance is callable through
/// `__call__`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Value {
    fn of_kind(kind: ValueKind) -> Self {
        Self {
            kind,
            signature: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn module() -> Self {
        Self::of_kind(ValueKind::Module)
    }

    pub fn class() -> Self {
        Self::of_kind(ValueKind::Class)
    }

    pub fn instance() -> Self {
        Self::of_kind(ValueKind::Instance)
    }

    pub fn function(signature: Signature) -> Self {
        Self {
            signature: Some(signature),
            ..Self::of_kind(ValueKind::Function)
        }
    }

    /// A function whose parameters cannot be inspected.
    pub fn opaque_function() -> Self {
        Self::of_kind(ValueKind::Function)
    }

    /// An instance carrying the attributes of `class`.
    pub fn instance_of(class: &Value) -> Self {
        Self {
            attributes: class.attributes.clone(),
            ..Self::instance()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn is_callable(&self) -> bool {
        match self.kind {
            ValueKind::Function | ValueKind::Class => true,
            ValueKind::Instance => self.attributes.contains_key("__call__"),
            ValueKind::Module => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    names: BTreeMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A namespace holding a common subset of Python's builtin functions and types.
    pub fn with_builtins() -> Self {
        let mut ns = Self::new();
        for (name, params) in BUILTIN_FUNCTIONS {
            ns.bind(*name, Value::function(Signature::from_params(*name, params)));
        }
        for (name, params) in BUILTIN_CLASSES {
            let init = Signature::from_params("__init__", params);
            ns.bind(*name, Value::class().attr("__init__", Value::function(init)));
        }
        ns
    }

    /// Binds `name`, returning the value it replaces.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.names.insert(name.into(), value)
    }

    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.names.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name)
    }

    /// Bound names with their values, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Follows a dotted path such as `os.path.join`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        self.walk(path).map(|(value, _)| value)
    }

    /// The value at `path` and the kind of the value its last attribute was read from.
    fn walk(&self, path: &str) -> Option<(&Value, Option<ValueKind>)> {
        let mut segments = path.split('.');
        let mut value = self.names.get(segments.next()?)?;
        let mut owner = None;
        for segment in segments {
            owner = Some(value.kind);
            value = value.attributes.get(segment)?;
        }
        Some((value, owner))
    }
}

impl CallableResolver for Namespace {
    fn resolve(&self, name: &str) -> Result<Signature, ResolveError> {
        let (value, owner) = self
            .walk(name)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;
        let short = name.rsplit('.').next().unwrap_or(name);

        let (signature, bound) = match value.kind {
            ValueKind::Function => (value.signature.clone(), owner == Some(ValueKind::Instance)),
            ValueKind::Class => match value.attributes.get("__init__") {
                Some(init) => (init.signature.clone(), true),
                None => (Some(Signature::new(short)), false),
            },
            ValueKind::Instance => match value.attributes.get("__call__") {
                Some(call) => (call.signature.clone(), true),
                None => return Err(ResolveError::NotCallable(name.to_string())),
            },
            ValueKind::Module => return Err(ResolveError::NotCallable(name.to_string())),
        };

        let mut signature = signature.ok_or_else(|| ResolveError::Failed {
            name: name.to_string(),
            reason: "signature not available".to_string(),
        })?;
        if value.kind == ValueKind::Class || signature.name.is_empty() {
            signature.name = short.to_string();
        }
        signature.is_bound_method |= bound;
        Ok(signature)
    }
}

const BUILTIN_FUNCTIONS: &[(&str, &[&str])] = &[
    ("abs", &["x"]),
    ("all", &["iterable"]),
    ("any", &["iterable"]),
    ("callable", &["obj"]),
    ("delattr", &["obj", "name"]),
    ("dir", &["obj=None"]),
    ("divmod", &["x", "y"]),
    ("getattr", &["obj", "name", "default=None"]),
    ("hasattr", &["obj", "name"]),
    ("isinstance", &["obj", "class_or_tuple"]),
    ("len", &["obj"]),
    ("max", &["*args", "key=None"]),
    ("min", &["*args", "key=None"]),
    ("open", &["file", "mode='r'", "buffering=-1", "encoding=None"]),
    ("print", &["*values", "sep=' '", "end='\\n'", "file=None", "flush=False"]),
    ("repr", &["obj"]),
    ("setattr", &["obj", "name", "value"]),
    ("sorted", &["iterable", "*", "key=None", "reverse=False"]),
    ("sum", &["iterable", "start=0"]),
];

/// Initializer parameters, receiver included.
const BUILTIN_CLASSES: &[(&str, &[&str])] = &[
    ("dict", &["self", "**kwargs"]),
    ("enumerate", &["self", "iterable", "start=0"]),
    ("list", &["self", "iterable=()"]),
    ("map", &["self", "func", "*iterables"]),
    ("range", &["self", "start", "stop=None", "step=1"]),
    ("str", &["self", "object=''"]),
    ("tuple", &["self", "iterable=()"]),
    ("zip", &["self", "*iterables"]),
];
