// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Opaque structured payload attached to reflections.
//!
//! Context is never interpreted by the core. It is only carried and, on
//! export, converted to JSON. `ContextValue::Shared` is a reference-counted
//! node that callers may wire into a graph, including cycles; exporters
//! track node identity to break those cycles.

use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// String-keyed context map. Ordered so exports are deterministic.
pub type Context = BTreeMap<String, ContextValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<ContextValue>),
    Map(Context),
    Shared(SharedValue),
}

/// A shared, mutable node. Two handles are the same node iff they point at
/// the same allocation.
///
/// Attaching a node to a reflection attaches the node, not a copy of its
/// content: a later [`SharedValue::set`] shows up in the export of every
/// signal that already carries it. Use plain `ContextValue`s for content
/// that must stay as it was when reflected.
#[derive(Clone)]
pub struct SharedValue(Arc<RwLock<ContextValue>>);

impl SharedValue {
    pub fn new(value: ContextValue) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Replace the node's content. Handles held elsewhere observe the change,
    /// including reflections this node is already attached to.
    pub fn set(&self, value: ContextValue) {
        let mut slot = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = value;
    }

    /// Shallow copy of the node's content; nested shared nodes stay shared.
    pub fn get(&self) -> ContextValue {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

// Identity, not structure: comparing contents could recurse forever.
impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedValue({:#x})", self.identity())
    }
}

impl ContextValue {
    /// Cycle-safe JSON conversion.
    pub fn to_json(&self) -> Value {
        super::export::value_to_json(self)
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::export::render_json(&self.to_json()))
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ContextValue::Null,
            Value::Bool(b) => ContextValue::Bool(b),
            Value::Number(n) => ContextValue::Number(n),
            Value::String(s) => ContextValue::String(s),
            Value::Array(items) => ContextValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ContextValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(ContextValue::Number)
            .unwrap_or(ContextValue::Null)
    }
}

impl From<Vec<ContextValue>> for ContextValue {
    fn from(items: Vec<ContextValue>) -> Self {
        ContextValue::List(items)
    }
}

impl From<Context> for ContextValue {
    fn from(map: Context) -> Self {
        ContextValue::Map(map)
    }
}

impl From<SharedValue> for ContextValue {
    fn from(shared: SharedValue) -> Self {
        ContextValue::Shared(shared)
    }
}

/// Build a [`Context`] from a JSON literal.
///
/// Objects become the map directly; any other JSON value is stored under
/// the key `"value"`.
///
/// ```
/// use signal_trace::trace::into_context;
/// use serde_json::json;
///
/// let ctx = into_context(json!({ "userId": 123, "action": "test" }));
/// assert_eq!(ctx.len(), 2);
/// ```
pub fn into_context(value: Value) -> Context {
    match ContextValue::from(value) {
        ContextValue::Map(map) => map,
        other => Context::from([("value".to_string(), other)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_round_trips_plain_data() {
        let source = json!({ "user": { "id": 1, "tags": ["a", "b"] }, "active": true });
        let value = ContextValue::from(source.clone());
        assert_eq!(value.to_json(), source);
    }

    #[test]
    fn test_into_context_wraps_scalars() {
        let ctx = into_context(json!(42));
        assert_eq!(ctx.get("value"), Some(&ContextValue::from(42)));
    }

    #[test]
    fn test_shared_equality_is_identity() {
        let a = SharedValue::new(ContextValue::from("x"));
        let b = SharedValue::new(ContextValue::from("x"));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_shared_set_visible_through_clones() {
        let node = SharedValue::new(ContextValue::Null);
        let handle = node.clone();
        node.set(ContextValue::from("updated"));
        assert_eq!(handle.get(), ContextValue::from("updated"));
    }

    #[test]
    fn test_self_referential_debug_and_display_terminate() {
        let node = SharedValue::new(ContextValue::Null);
        node.set(ContextValue::Map(Context::from([
            ("name".to_string(), ContextValue::from("circular")),
            ("self".to_string(), ContextValue::Shared(node.clone())),
        ])));
        let value = ContextValue::Shared(node);

        assert!(format!("{:?}", value).starts_with("Shared(SharedValue("));
        assert_eq!(value.to_string(), r#"{"name":"circular","self":"[Circular]"}"#);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(ContextValue::from(f64::NAN), ContextValue::Null);
    }
}
