// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Trace model: reflections grouped into layers, and the persistent
//! sequence of layers a signal carries.

mod context;
mod entry;
pub mod export;

pub use context::{into_context, Context, ContextValue, SharedValue};
pub use entry::{Reflection, TraceEntry, TraceStatus, ROOT_LAYER};
pub use export::{ReflectionData, TraceData};

use crate::errors::SignalError;
use serde_json::Value;
use std::sync::Arc;

/// Ordered, append-only sequence of trace entries.
///
/// Entries are shared between traces by `Arc`. Extending a trace builds a
/// new sequence; only the last entry is ever replaced, and only by an
/// updated copy of itself.
#[derive(Debug, Clone)]
pub struct Trace {
    entries: Arc<[Arc<TraceEntry>]>,
}

impl Trace {
    /// A trace holding only the implicit root entry.
    pub(crate) fn new() -> Self {
        Self::from_entries(vec![Arc::new(TraceEntry::root())])
    }

    fn from_entries(entries: Vec<Arc<TraceEntry>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[Arc<TraceEntry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently opened entry.
    pub fn current(&self) -> Option<&TraceEntry> {
        self.entries.last().map(|entry| entry.as_ref())
    }

    pub(crate) fn push(&self, entry: TraceEntry) -> Self {
        let mut entries = self.entries.to_vec();
        entries.push(Arc::new(entry));
        Self::from_entries(entries)
    }

    fn update_current(&self, update: impl FnOnce(&TraceEntry) -> TraceEntry) -> Self {
        let mut entries = self.entries.to_vec();
        let next = match entries.pop() {
            Some(last) => update(&last),
            None => update(&TraceEntry::root()),
        };
        entries.push(Arc::new(next));
        Self::from_entries(entries)
    }

    pub(crate) fn reflect(&self, reflection: Reflection) -> Self {
        let reflection = Arc::new(reflection);
        self.update_current(|entry| entry.with_reflection(reflection))
    }

    /// Mark the current entry as failed.
    pub(crate) fn fail(&self, error: SignalError) -> Self {
        self.update_current(|entry| entry.with_error(error))
    }

    /// Append a callee's trace after this one.
    ///
    /// The callee's implicit root entry, if it leads the callee trace, is
    /// folded into this trace's current entry; every other callee entry is
    /// appended as-is.
    pub(crate) fn concat(&self, callee: &Trace) -> Self {
        let (base, rest) = match callee.entries.split_first() {
            Some((head, rest)) if head.is_implicit() => {
                (self.update_current(|entry| entry.absorb(head)), rest)
            }
            _ => (self.clone(), &callee.entries[..]),
        };

        let mut entries = base.entries.to_vec();
        entries.extend(rest.iter().cloned());
        Self::from_entries(entries)
    }

    /// Entries as exported: the implicit root is dropped while it is still
    /// untouched and later layers exist.
    pub fn exported(&self) -> impl Iterator<Item = &TraceEntry> {
        let skip_root = self.entries.len() > 1 && self.entries[0].is_untouched();
        self.entries
            .iter()
            .skip(usize::from(skip_root))
            .map(|entry| entry.as_ref())
    }

    pub fn data(&self) -> Vec<TraceData> {
        self.exported().map(TraceData::from).collect()
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.data()).unwrap_or(Value::Null)
    }

    pub fn render(&self) -> String {
        export::render_entries(self.exported())
    }
}
