// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion of trace data into plain, serializable records and into a
//! human-readable rendering.
//!
//! Context payloads may contain [`SharedValue`](super::SharedValue) nodes
//! that point back at themselves. Every traversal here keeps the set of
//! node identities on the current path and substitutes [`CIRCULAR_MARKER`]
//! on re-entry, so exporting never recurses forever and never fails.

use crate::trace::{Context, ContextValue, Reflection, TraceEntry, TraceStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt::Write;

/// Placeholder for a shared node already on the traversal path.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// Placeholder for a node that could not be rendered.
pub const UNRENDERABLE: &str = "[Unrenderable]";

/// Exported form of a [`TraceEntry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceData {
    pub layer: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TraceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reflections: Vec<ReflectionData>,
}

/// Exported form of a [`Reflection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectionData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

/// RFC 3339, UTC, microsecond precision, `Z` suffix. Fixed width, so the
/// strings sort in time order.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl From<&Reflection> for ReflectionData {
    fn from(reflection: &Reflection) -> Self {
        let (class, method) = reflection.class_and_method();
        Self {
            message: reflection.message().to_string(),
            method: method.map(str::to_string),
            class: class.map(str::to_string),
            timestamp: format_timestamp(reflection.timestamp()),
            context: reflection.context().map(context_to_json),
        }
    }
}

impl From<&TraceEntry> for TraceData {
    fn from(entry: &TraceEntry) -> Self {
        let error = match entry.status() {
            Some(TraceStatus::Error) => entry.error().map(|e| e.message()),
            _ => None,
        };
        Self {
            layer: entry.layer().to_string(),
            timestamp: format_timestamp(entry.timestamp()),
            status: entry.status(),
            error,
            reflections: entry.reflections().iter().map(|r| ReflectionData::from(r.as_ref())).collect(),
        }
    }
}

pub(crate) fn value_to_json(value: &ContextValue) -> Value {
    let mut path = HashSet::new();
    walk(value, &mut path)
}

pub(crate) fn context_to_json(context: &Context) -> Map<String, Value> {
    let mut path = HashSet::new();
    walk_map(context, &mut path)
}

fn walk(value: &ContextValue, path: &mut HashSet<usize>) -> Value {
    match value {
        ContextValue::Null => Value::Null,
        ContextValue::Bool(b) => Value::Bool(*b),
        ContextValue::Number(n) => Value::Number(n.clone()),
        ContextValue::String(s) => Value::String(s.clone()),
        ContextValue::List(items) => Value::Array(items.iter().map(|item| walk(item, path)).collect()),
        ContextValue::Map(map) => Value::Object(walk_map(map, path)),
        ContextValue::Shared(shared) => {
            let identity = shared.identity();
            if !path.insert(identity) {
                return Value::String(CIRCULAR_MARKER.to_string());
            }
            let inner = shared.get();
            let json = walk(&inner, path);
            path.remove(&identity);
            json
        }
    }
}

fn walk_map(map: &Context, path: &mut HashSet<usize>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), walk(value, path)))
        .collect()
}

pub(crate) fn render_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| UNRENDERABLE.to_string())
}

/// One line per entry, one indented line per reflection.
pub(crate) fn render_entries<'a>(entries: impl Iterator<Item = &'a TraceEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{} {}", format_timestamp(entry.timestamp()), entry.layer());
        match entry.status() {
            Some(TraceStatus::Error) => {
                let error = entry.error().map(|e| e.message()).unwrap_or_default();
                let _ = write!(out, " [error] error={}", error);
            }
            Some(TraceStatus::Success) => out.push_str(" [success]"),
            None => {}
        }
        out.push('\n');

        for reflection in entry.reflections() {
            let _ = write!(out, "  - {}", reflection.message());
            if let Some(component) = reflection.component() {
                let _ = write!(out, " ({})", component);
            }
            if let Some(context) = reflection.context() {
                let _ = write!(out, " {}", render_json(&Value::Object(context_to_json(context))));
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SignalError;
    use crate::trace::{into_context, SharedValue};
    use serde_json::json;
    use std::sync::Arc;

    fn cyclic_node() -> SharedValue {
        let node = SharedValue::new(ContextValue::Null);
        node.set(ContextValue::Map(Context::from([
            ("name".to_string(), ContextValue::from("circular")),
            ("self".to_string(), ContextValue::Shared(node.clone())),
        ])));
        node
    }

    #[test]
    fn test_timestamp_format_is_fixed_width_and_sortable() {
        let earlier = DateTime::parse_from_rfc3339("2025-05-02T15:52:37Z").unwrap().with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2025-05-02T15:52:37.000450Z").unwrap().with_timezone(&Utc);

        let a = format_timestamp(earlier);
        let b = format_timestamp(later);
        assert_eq!(a, "2025-05-02T15:52:37.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_direct_cycle_replaced_by_marker() {
        let json = value_to_json(&ContextValue::Shared(cyclic_node()));
        assert_eq!(json, json!({ "name": "circular", "self": "[Circular]" }));
    }

    #[test]
    fn test_indirect_cycle_replaced_by_marker() {
        let a = SharedValue::new(ContextValue::Null);
        let b = SharedValue::new(ContextValue::Null);
        a.set(ContextValue::Map(Context::from([("next".to_string(), ContextValue::Shared(b.clone()))])));
        b.set(ContextValue::Map(Context::from([("next".to_string(), ContextValue::Shared(a.clone()))])));

        let json = value_to_json(&ContextValue::Shared(a));
        assert_eq!(json, json!({ "next": { "next": "[Circular]" } }));
    }

    #[test]
    fn test_shared_node_repeated_in_siblings_is_not_a_cycle() {
        let leaf = SharedValue::new(ContextValue::from(7));
        let value = ContextValue::List(vec![
            ContextValue::Shared(leaf.clone()),
            ContextValue::Shared(leaf),
        ]);
        assert_eq!(value_to_json(&value), json!([7, 7]));
    }

    #[test]
    fn test_reflection_data_splits_component() {
        let reflection = Reflection::new("loaded")
            .with_component("GatewayRepository::get_config")
            .with_context(into_context(json!({ "rows": 1 })));

        let data = ReflectionData::from(&reflection);
        assert_eq!(data.message, "loaded");
        assert_eq!(data.class.as_deref(), Some("GatewayRepository"));
        assert_eq!(data.method.as_deref(), Some("get_config"));
        assert_eq!(data.context, Some(json!({ "rows": 1 }).as_object().unwrap().clone()));
    }

    #[test]
    fn test_trace_data_serialization_omits_empty_fields() {
        let entry = TraceEntry::new("Repository");
        let json = serde_json::to_value(TraceData::from(&entry)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.get("layer"), Some(&json!("Repository")));
        assert!(object.contains_key("timestamp"));
        assert!(!object.contains_key("status"));
        assert!(!object.contains_key("error"));
        assert!(!object.contains_key("reflections"));
    }

    #[test]
    fn test_trace_data_exports_error_text() {
        let entry = TraceEntry::new("UseCase").with_error(SignalError::from("Config is null"));
        let data = TraceData::from(&entry);
        assert_eq!(data.status, Some(TraceStatus::Error));
        assert_eq!(data.error.as_deref(), Some("Config is null"));
    }

    #[test]
    fn test_render_entries_survives_cyclic_context() {
        let context = Context::from([("obj".to_string(), ContextValue::Shared(cyclic_node()))]);
        let entry = TraceEntry::new("Repository")
            .with_reflection(Arc::new(Reflection::new("stored").with_context(context).with_component("save")));

        let text = render_entries(std::iter::once(&entry));
        assert!(text.contains(" Repository\n"));
        assert!(text.contains("  - stored (save) "));
        assert!(text.contains("[Circular]"));
    }
}
