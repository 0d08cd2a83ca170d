// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Chaining operations.
//!
//! `reflect` and `layer` record into the trace whatever the signal's state.
//! The value-transforming operations (`map`, `traced_map`, `try_map`,
//! `flat_map`, `ensure`) only run on success and pass failures through
//! untouched. A panic inside any closure they call becomes a failure that
//! continues the same identity and trace.

use super::{fault, Signal};
use crate::errors::SignalError;
use crate::trace::{Context, Reflection, Trace, TraceEntry};
use std::error::Error as StdError;
use std::sync::Arc;

const TRACED_MAP_MESSAGE: &str = "Mapped value";
const TRACED_MAP_COMPONENT: &str = "Signal::traced_map";

impl<T: ?Sized> Signal<T> {
    /// Append a reflection to the current layer.
    pub fn reflect(&self, message: impl Into<String>) -> Signal<T> {
        self.record(Reflection::new(message))
    }

    pub fn reflect_with(&self, message: impl Into<String>, context: Context) -> Signal<T> {
        self.record(Reflection::new(message).with_context(context))
    }

    /// Full form: optional context and an originating component label
    /// (`"method"` or `"Class::method"`).
    pub fn reflect_from(
        &self,
        message: impl Into<String>,
        context: Option<Context>,
        component: impl Into<String>,
    ) -> Signal<T> {
        let mut reflection = Reflection::new(message).with_component(component);
        if let Some(context) = context {
            reflection = reflection.with_context(context);
        }
        self.record(reflection)
    }

    /// Record a prebuilt reflection.
    pub fn record(&self, reflection: Reflection) -> Signal<T> {
        self.continued(self.outcome.clone(), self.trace.reflect(reflection))
    }

    /// Open a new layer; later reflections land in it.
    pub fn layer(&self, name: impl Into<String>) -> Signal<T> {
        self.continued(self.outcome.clone(), self.trace.push(TraceEntry::new(name)))
    }

    /// Open a new layer whose first reflection carries `context`.
    pub fn layer_with(&self, name: impl Into<String>, context: Context) -> Signal<T> {
        let name = name.into();
        let reflection = Reflection::new(format!("Entered layer {}", name)).with_context(context);
        let trace = self.trace.push(TraceEntry::new(name)).reflect(reflection);
        self.continued(self.outcome.clone(), trace)
    }

    pub fn map<U, F>(&self, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        self.map_inner("map", None, f)
    }

    /// As [`Signal::map`], recording the transform inside a new layer.
    pub fn map_in<U, F>(&self, layer: &str, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        self.map_inner("map", Some(layer), f)
    }

    /// As [`Signal::map`], also recording a reflection for the transform.
    pub fn traced_map<U, F>(&self, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        self.map_inner("traced_map", None, f).traced()
    }

    pub fn traced_map_in<U, F>(&self, layer: &str, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        self.map_inner("traced_map", Some(layer), f).traced()
    }

    /// Map with a fallible transform; `Err` becomes a failure carrying the
    /// error value.
    pub fn try_map<U, E, F>(&self, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Result<U, E>,
        E: StdError + Send + Sync + 'static,
    {
        self.try_map_inner(None, f)
    }

    pub fn try_map_in<U, E, F>(&self, layer: &str, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Result<U, E>,
        E: StdError + Send + Sync + 'static,
    {
        self.try_map_inner(Some(layer), f)
    }

    /// Chain a signal-returning step. The callee's value or error becomes
    /// the result and its trace is appended after this one.
    pub fn flat_map<U: ?Sized, F>(&self, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Signal<U>,
    {
        self.flat_map_inner(None, f)
    }

    pub fn flat_map_in<U: ?Sized, F>(&self, layer: &str, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Signal<U>,
    {
        self.flat_map_inner(Some(layer), f)
    }

    /// Fail with `message` unless `predicate` holds for the value.
    pub fn ensure<P>(&self, predicate: P, message: impl Into<String>) -> Signal<T>
    where
        P: FnOnce(&T) -> bool,
    {
        let value: &T = match &self.outcome {
            Ok(value) => value,
            Err(_) => return self.clone(),
        };
        match fault::guard("ensure", self.id, || predicate(value)) {
            Ok(true) => self.clone(),
            Ok(false) => self.failed_with(self.trace.clone(), SignalError::Message(message.into())),
            Err(fault) => self.failed_with(self.trace.clone(), fault),
        }
    }

    /// Turn this signal into a failure, keeping identity and trace.
    pub fn fail(&self, error: impl Into<SignalError>) -> Signal<T> {
        self.failed_with(self.trace.clone(), error.into())
    }

    pub fn on_success<F>(&self, f: F) -> Signal<T>
    where
        F: FnOnce(&T),
    {
        if let Some(value) = self.value() {
            f(value);
        }
        self.clone()
    }

    pub fn on_failure<F>(&self, f: F) -> Signal<T>
    where
        F: FnOnce(&SignalError),
    {
        if let Some(error) = self.error() {
            f(error);
        }
        self.clone()
    }

    fn open(&self, layer: Option<&str>) -> Trace {
        match layer {
            Some(name) => self.trace.push(TraceEntry::new(name)),
            None => self.trace.clone(),
        }
    }

    fn map_inner<U, F>(&self, operation: &'static str, layer: Option<&str>, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        let value: &T = match &self.outcome {
            Ok(value) => value,
            Err(error) => return self.carry_failure(error),
        };
        let trace = self.open(layer);
        match fault::guard(operation, self.id, || f(value)) {
            Ok(next) => self.continued(Ok(Arc::new(next)), trace),
            Err(fault) => self.failed_with(trace, fault),
        }
    }

    fn try_map_inner<U, E, F>(&self, layer: Option<&str>, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Result<U, E>,
        E: StdError + Send + Sync + 'static,
    {
        let value: &T = match &self.outcome {
            Ok(value) => value,
            Err(error) => return self.carry_failure(error),
        };
        let trace = self.open(layer);
        match fault::guard("try_map", self.id, || f(value)) {
            Ok(Ok(next)) => self.continued(Ok(Arc::new(next)), trace),
            Ok(Err(error)) => self.failed_with(trace, SignalError::from_error(error)),
            Err(fault) => self.failed_with(trace, fault),
        }
    }

    fn flat_map_inner<U: ?Sized, F>(&self, layer: Option<&str>, f: F) -> Signal<U>
    where
        F: FnOnce(&T) -> Signal<U>,
    {
        let value: &T = match &self.outcome {
            Ok(value) => value,
            Err(error) => return self.carry_failure(error),
        };
        let trace = self.open(layer);
        match fault::guard("flat_map", self.id, || f(value)) {
            Ok(next) => self.continued(next.outcome, trace.concat(&next.trace)),
            Err(fault) => self.failed_with(trace, fault),
        }
    }

    // Only successful transforms are annotated.
    fn traced(self) -> Signal<T> {
        if self.is_failure() {
            return self;
        }
        self.record(Reflection::new(TRACED_MAP_MESSAGE).with_component(TRACED_MAP_COMPONENT))
    }
}
