// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The immutable, trace-carrying result type.
//!
//! A [`Signal`] holds either a value or a [`SignalError`], an identifier
//! shared by every signal derived from it, and the ordered trace of layers
//! and reflections recorded so far. Every operation borrows the signal and
//! returns a new one; nothing is ever mutated in place.
//!
//! # Examples
//!
//! ```
//! use signal_trace::Signal;
//!
//! let result = Signal::success(5)
//!     .map(|v| v * 2)
//!     .ensure(|v| *v < 10, "Value too high")
//!     .map(|v| v + 1)
//!     .reflect("tail");
//!
//! assert!(result.is_failure());
//! assert_eq!(result.error().unwrap().message(), "Value too high");
//! ```

mod algebra;
mod fault;


use crate::errors::{PluginError, SignalError};
use crate::registry::PluginRegistry;
use crate::trace::{Trace, TraceData, TraceEntry};
use crate::traits::{AnySignal, PluginConfig};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub struct Signal<T: ?Sized> {
    id: Uuid,
    outcome: Result<Arc<T>, SignalError>,
    trace: Trace,
}

impl<T: ?Sized> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            outcome: self.outcome.clone(),
            trace: self.trace.clone(),
        }
    }
}

impl<T> Signal<T> {
    /// A successful signal with a fresh id and an empty root entry.
    pub fn success(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }
}

impl<T: ?Sized> Signal<T> {
    /// As [`Signal::success`], for values already behind an `Arc`.
    pub fn from_arc(value: Arc<T>) -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome: Ok(value),
            trace: Trace::new(),
        }
    }

    /// A failed signal with a fresh id; the root entry is marked as error.
    ///
    /// Strings become [`SignalError::Message`]; wrap real error values with
    /// [`SignalError::from_error`] to keep their identity.
    pub fn failure(error: impl Into<SignalError>) -> Self {
        let error = error.into();
        Self {
            id: Uuid::new_v4(),
            trace: Trace::new().fail(error.clone()),
            outcome: Err(error),
        }
    }

    /// Continue `source`'s identity and trace unchanged.
    pub fn extend(source: &Signal<T>) -> Self {
        source.clone()
    }

    /// Continue `source`'s identity and trace, replacing a success value
    /// with `transform(value)`. Failures are carried over and `transform`
    /// is not called.
    pub fn extend_with<U, F>(source: &Signal<T>, transform: F) -> Signal<U>
    where
        F: FnOnce(&T) -> U,
    {
        let value: &T = match &source.outcome {
            Ok(value) => value,
            Err(error) => return source.carry_failure(error),
        };
        match fault::guard("extend_with", source.id, || transform(value)) {
            Ok(next) => source.continued(Ok(Arc::new(next)), source.trace.clone()),
            Err(fault) => source.failed_with(source.trace.clone(), fault),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn value(&self) -> Option<&T> {
        self.outcome.as_ref().ok().map(|value| value.as_ref())
    }

    pub fn error(&self) -> Option<&SignalError> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<Arc<T>, SignalError> {
        self.outcome
    }

    /// Every trace entry, including the implicit root.
    pub fn entries(&self) -> &[Arc<TraceEntry>] {
        self.trace.entries()
    }

    /// Name of the layer that `reflect` currently records into.
    pub fn current_layer(&self) -> &str {
        self.trace.current().map(|entry| entry.layer()).unwrap_or_default()
    }

    /// The trace as plain records, ready for serialization.
    pub fn trace_data(&self) -> Vec<TraceData> {
        self.trace.data()
    }

    pub fn trace_json(&self) -> Value {
        self.trace.to_json()
    }

    /// Human-readable rendering of the whole trace.
    pub fn trace(&self) -> String {
        let status = if self.is_success() { "success" } else { "failure" };
        format!("Signal {} [{}]\n{}", self.id, status, self.trace.render())
    }

    fn continued<U: ?Sized>(&self, outcome: Result<Arc<U>, SignalError>, trace: Trace) -> Signal<U> {
        Signal {
            id: self.id,
            outcome,
            trace,
        }
    }

    fn carry_failure<U: ?Sized>(&self, error: &SignalError) -> Signal<U> {
        self.continued(Err(error.clone()), self.trace.clone())
    }

    fn failed_with<U: ?Sized>(&self, trace: Trace, error: SignalError) -> Signal<U> {
        self.continued(Err(error.clone()), trace.fail(error))
    }
}

impl<T: Any + Send + Sync> Signal<T> {
    /// Erase the value type so the signal can be handed to a plugin.
    pub fn erase(&self) -> AnySignal {
        let outcome = self
            .outcome
            .clone()
            .map(|value| value as Arc<dyn Any + Send + Sync>);
        self.continued(outcome, self.trace.clone())
    }

    /// Run a plugin from the process-wide registry.
    ///
    /// An unregistered id is not an error: the signal comes back unchanged.
    /// Errors raised by the plugin itself are returned as-is.
    pub fn with(&self, config: impl Into<PluginConfig>) -> Result<Signal<T>, PluginError> {
        self.with_in(PluginRegistry::global(), config)
    }

    /// Run a plugin from an explicitly owned registry.
    pub fn with_in(&self, registry: &PluginRegistry, config: impl Into<PluginConfig>) -> Result<Signal<T>, PluginError> {
        registry.apply(self, config)
    }

    /// Run a plugin from the global registry that replaces the value with one of type `U`.
    pub fn with_as<U: Any + Send + Sync>(&self, config: impl Into<PluginConfig>) -> Result<Signal<U>, PluginError> {
        self.with_in_as(PluginRegistry::global(), config)
    }

    /// Like [`Signal::with_as`], against an explicit registry.
    pub fn with_in_as<U: Any + Send + Sync>(
        &self,
        registry: &PluginRegistry,
        config: impl Into<PluginConfig>,
    ) -> Result<Signal<U>, PluginError> {
        registry.apply_as(self, config)
    }
}

impl Signal<dyn Any + Send + Sync> {
    /// Recover a typed signal. Failures downcast to any type; a success
    /// whose value is not a `T` is handed back unchanged.
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Signal<T>, AnySignal> {
        let Signal { id, outcome, trace } = self;
        match outcome {
            Ok(value) => match value.downcast::<T>() {
                Ok(value) => Ok(Signal { id, outcome: Ok(value), trace }),
                Err(value) => Err(Signal { id, outcome: Ok(value), trace }),
            },
            Err(error) => Ok(Signal { id, outcome: Err(error), trace }),
        }
    }

    /// Borrow the erased value as a `T`.
    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value().and_then(|value| value.downcast_ref::<T>())
    }
}

impl<T: ?Sized> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("is_success", &self.is_success())
            .field("error", &self.error())
            .field("entries", &self.trace.len())
            .field("current_layer", &self.current_layer())
            .finish()
    }
}

impl<T: ?Sized> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{TraceStatus, ROOT_LAYER};
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq)]
    #[error("it error")]
    struct ItError;

    #[test]
    fn test_success_state() {
        let signal = Signal::success("test");

        assert!(signal.is_success());
        assert!(!signal.is_failure());
        assert_eq!(signal.value(), Some(&"test"));
        assert!(signal.error().is_none());
        assert_eq!(signal.entries().len(), 1);
        assert_eq!(signal.current_layer(), ROOT_LAYER);
        assert!(signal.entries()[0].reflections().is_empty());
    }

    #[test]
    fn test_failure_from_message() {
        let signal = Signal::<i32>::failure("it error");

        assert!(signal.is_failure());
        assert!(!signal.is_success());
        assert!(signal.value().is_none());
        assert_eq!(signal.error().unwrap().message(), "it error");
        assert_eq!(signal.entries()[0].status(), Some(TraceStatus::Error));
        assert_eq!(signal.trace_data()[0].error.as_deref(), Some("it error"));
    }

    #[test]
    fn test_failure_from_error_keeps_identity() {
        let signal = Signal::<String>::failure(SignalError::from_error(ItError));
        assert_eq!(signal.error().unwrap().downcast_ref::<ItError>(), Some(&ItError));
    }

    #[test]
    fn test_success_with_unit_and_option_values() {
        let unit = Signal::success(());
        let none = Signal::success(None::<i32>);

        assert!(unit.is_success());
        assert_eq!(none.value(), Some(&None));
    }

    #[test]
    fn test_factories_assign_fresh_ids() {
        assert_ne!(Signal::success(1).id(), Signal::success(1).id());
        assert_ne!(Signal::<i32>::failure("a").id(), Signal::<i32>::failure("a").id());
    }

    #[test]
    fn test_extend_continues_identity_and_trace() {
        let source = Signal::success(5).layer("Repository").reflect("loaded");
        let extended = Signal::extend(&source);

        assert_eq!(extended.id(), source.id());
        assert_eq!(extended.entries().len(), source.entries().len());
        assert!(Arc::ptr_eq(&extended.entries()[1], &source.entries()[1]));
    }

    #[test]
    fn test_extend_with_transforms_success() {
        let source = Signal::success(5);
        let extended = Signal::extend_with(&source, |v| v * 2);

        assert_eq!(extended.value(), Some(&10));
        assert_eq!(extended.id(), source.id());
        assert_eq!(source.value(), Some(&5));
    }

    #[test]
    fn test_extend_with_ignores_transform_on_failure() {
        let source = Signal::<i32>::failure("nope");
        let mut called = false;
        let extended = Signal::extend_with(&source, |v| {
            called = true;
            v + 1
        });

        assert!(!called);
        assert!(extended.is_failure());
        assert_eq!(extended.error().unwrap().message(), "nope");
    }

    #[test]
    fn test_from_arc_accepts_unsized_values() {
        let text: Arc<str> = Arc::from("shared");
        let signal: Signal<str> = Signal::from_arc(text);

        let length = signal.map(|s| s.len());
        assert_eq!(length.value(), Some(&6));
    }

    #[test]
    fn test_erase_and_downcast() {
        let signal = Signal::success(42u32).reflect("before");
        let erased = signal.erase();

        assert_eq!(erased.id(), signal.id());
        assert_eq!(erased.value_as::<u32>(), Some(&42));
        assert!(erased.value_as::<i64>().is_none());

        let back = erased.clone().downcast::<u32>().unwrap();
        assert_eq!(back.value(), Some(&42));
        assert_eq!(back.entries().len(), 1);

        let wrong = erased.downcast::<String>().unwrap_err();
        assert_eq!(wrong.value_as::<u32>(), Some(&42));
    }

    #[test]
    fn test_downcast_of_failure_succeeds_for_any_type() {
        let erased = Signal::<u8>::failure("nope").erase();
        let typed = erased.downcast::<String>().unwrap();
        assert_eq!(typed.error().unwrap().message(), "nope");
    }

    #[test]
    fn test_trace_rendering_header() {
        let signal = Signal::<i32>::failure("it error");
        let text = signal.trace();

        assert!(text.starts_with(&format!("Signal {} [failure]\n", signal.id())));
        assert!(text.contains("root [error] error=it error"));
        assert_eq!(signal.to_string(), text);
    }

    #[test]
    fn test_debug_does_not_require_debug_value() {
        struct Opaque;
        let text = format!("{:?}", Signal::success(Opaque));
        assert!(text.contains("is_success: true"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(*Signal::success(3).into_result().unwrap(), 3);
        assert!(Signal::<i32>::failure("x").into_result().is_err());
    }
}
