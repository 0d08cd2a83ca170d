// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::SignalError;
use crate::trace::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Name of the entry every signal starts with before any `layer` call.
pub const ROOT_LAYER: &str = "root";

/// Terminal marker of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    Success,
    Error,
}

/// A timestamped note recorded inside a layer.
///
/// Built with the `with_*` methods and frozen once it is attached to a
/// trace entry (entries hold it behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Reflection {
    message: String,
    context: Option<Context>,
    component: Option<String>,
    timestamp: DateTime<Utc>,
}

impl Reflection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            component: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Originating label, either `"method"` or `"Class::method"`.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Split the component into `(class, method)`. The class is whatever
    /// precedes the last `::`.
    pub fn class_and_method(&self) -> (Option<&str>, Option<&str>) {
        match self.component.as_deref() {
            None => (None, None),
            Some(component) => match component.rsplit_once("::") {
                Some((class, method)) => (Some(class), Some(method)),
                None => (None, Some(component)),
            },
        }
    }
}

/// A named layer grouping an ordered run of reflections.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    layer: String,
    reflections: Vec<Arc<Reflection>>,
    status: Option<TraceStatus>,
    error: Option<SignalError>,
    timestamp: DateTime<Utc>,
    implicit: bool,
}

impl TraceEntry {
    pub(crate) fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            reflections: Vec::new(),
            status: None,
            error: None,
            timestamp: Utc::now(),
            implicit: false,
        }
    }

    pub(crate) fn root() -> Self {
        Self {
            implicit: true,
            ..Self::new(ROOT_LAYER)
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn reflections(&self) -> &[Arc<Reflection>] {
        &self.reflections
    }

    pub fn status(&self) -> Option<TraceStatus> {
        self.status
    }

    pub fn error(&self) -> Option<&SignalError> {
        self.error.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True for the root entry created by `Signal::success` / `Signal::failure`.
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Implicit and still empty: nothing has been recorded into it.
    pub(crate) fn is_untouched(&self) -> bool {
        self.implicit && self.reflections.is_empty() && self.status.is_none()
    }

    pub(crate) fn with_reflection(&self, reflection: Arc<Reflection>) -> Self {
        let mut next = self.clone();
        next.reflections.push(reflection);
        next
    }

    pub(crate) fn with_error(&self, error: SignalError) -> Self {
        let mut next = self.clone();
        next.status = Some(TraceStatus::Error);
        next.error = Some(error);
        next
    }

    /// Fold another entry's reflections and terminal status into this one.
    pub(crate) fn absorb(&self, other: &TraceEntry) -> Self {
        let mut next = self.clone();
        next.reflections.extend(other.reflections.iter().cloned());
        if other.status.is_some() {
            next.status = other.status;
            next.error = other.error.clone();
        }
        next
    }
}
