// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for signal chaining and the logger plugin.

use crate::observability::messages::StructuredLog;
use crate::plugins::LogLevel;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A closure passed to a chaining operation panicked and the panic was
/// turned into a failed signal.
///
/// # Log Level
/// `warn!` - The chain continues, but user code misbehaved
pub struct TransformFaulted<'a> {
    pub operation: &'a str,
    pub signal_id: &'a str,
    pub message: &'a str,
}

impl Display for TransformFaulted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Closure passed to '{}' panicked on signal {}: {}",
            self.operation, self.signal_id, self.message
        )
    }
}

impl StructuredLog for TransformFaulted<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            signal_id = self.signal_id,
            panic_message = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "transform_faulted",
            span_name = name,
            operation = self.operation,
            signal_id = self.signal_id,
        )
    }
}

/// Record emitted by the logger plugin.
///
/// # Log Level
/// Chosen by the plugin options (`debug`, `info`, `warn` or `error`).
///
/// # Example
/// ```
/// use signal_trace::observability::messages::signal::SignalLogged;
/// use signal_trace::observability::messages::StructuredLog;
/// use signal_trace::plugins::LogLevel;
///
/// let msg = SignalLogged {
///     plugin_id: "logger",
///     signal_id: "7d1c9a52-2f7e-4e55-9d8f-1b0cfa4e2a10",
///     is_success: false,
///     error: Some("Value too high"),
///     value: None,
///     trace: None,
///     formatted: None,
///     level: LogLevel::Warn,
/// };
///
/// msg.log();
/// ```
pub struct SignalLogged<'a> {
    pub plugin_id: &'a str,
    pub signal_id: &'a str,
    pub is_success: bool,
    pub error: Option<&'a str>,
    pub value: Option<&'a str>,
    pub trace: Option<&'a str>,
    /// Caller-formatted message; replaces the default text when set.
    pub formatted: Option<&'a str>,
    pub level: LogLevel,
}

impl SignalLogged<'_> {
    fn status(&self) -> &'static str {
        if self.is_success {
            "success"
        } else {
            "failure"
        }
    }
}

impl Display for SignalLogged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if let Some(formatted) = self.formatted {
            return f.write_str(formatted);
        }
        write!(f, "Signal {}: {}", self.signal_id, self.status())?;
        if let Some(error) = self.error {
            write!(f, " ({})", error)?;
        }
        Ok(())
    }
}

impl StructuredLog for SignalLogged<'_> {
    fn log(&self) {
        let error = self.error.unwrap_or_default();
        let value = self.value.unwrap_or_default();
        let trace = self.trace.unwrap_or_default();
        match self.level {
            LogLevel::Debug => tracing::debug!(
                plugin_id = self.plugin_id,
                signal_id = self.signal_id,
                status = self.status(),
                error,
                value,
                trace,
                "{}", self
            ),
            LogLevel::Info => tracing::info!(
                plugin_id = self.plugin_id,
                signal_id = self.signal_id,
                status = self.status(),
                error,
                value,
                trace,
                "{}", self
            ),
            LogLevel::Warn => tracing::warn!(
                plugin_id = self.plugin_id,
                signal_id = self.signal_id,
                status = self.status(),
                error,
                value,
                trace,
                "{}", self
            ),
            LogLevel::Error => tracing::error!(
                plugin_id = self.plugin_id,
                signal_id = self.signal_id,
                status = self.status(),
                error,
                value,
                trace,
                "{}", self
            ),
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "signal_logged",
            span_name = name,
            plugin_id = self.plugin_id,
            signal_id = self.signal_id,
            status = self.status(),
        )
    }
}
