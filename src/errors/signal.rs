// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The failure carried by a [`Signal`](crate::signal::Signal).

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Domain failure held by a failed signal.
///
/// Failures are data: they flow through `map`, `flat_map` and `ensure`
/// untouched and are meant to be inspected, not caught. When a signal is
/// failed with a real error value, that value is kept behind an `Arc` so
/// callers can recover it with [`SignalError::downcast_ref`].
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    /// A plain message, e.g. from `Signal::failure("not found")` or `ensure`.
    #[error("{0}")]
    Message(String),

    /// An error value supplied by the caller or returned from `try_map`.
    #[error("{0}")]
    Source(Arc<dyn StdError + Send + Sync>),

    /// A closure passed to a chaining operation panicked.
    #[error("{0}")]
    Panicked(String),
}

impl SignalError {
    /// Wrap an arbitrary error, keeping its identity.
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        SignalError::Source(Arc::new(error))
    }

    /// Human-readable message text, as exported in trace data.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Recover the original error when the failure was built from one.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self {
            SignalError::Source(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// The wrapped error, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            SignalError::Source(source) => Some(source.as_ref()),
            _ => None,
        }
    }

    /// True when the failure came from a panicking closure.
    pub fn is_panic(&self) -> bool {
        matches!(self, SignalError::Panicked(_))
    }
}

impl From<&str> for SignalError {
    fn from(message: &str) -> Self {
        SignalError::Message(message.to_string())
    }
}

impl From<String> for SignalError {
    fn from(message: String) -> Self {
        SignalError::Message(message)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for SignalError {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        SignalError::Source(Arc::from(error))
    }
}
