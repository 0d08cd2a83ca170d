// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plugin registry and execution events.
//!
//! This module contains message types for logging events related to:
//! * Plugin registration and duplicate registration attempts
//! * Plugin removal
//! * Plugin lookup misses and executions triggered by `Signal::with`
//! * Lifecycle hooks of the built-in plugins

use crate::errors::PluginStage;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Plugin initialized and stored in the registry.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use signal_trace::observability::messages::plugin::PluginRegistered;
///
/// let msg = PluginRegistered {
///     plugin_id: "logger",
///     registered_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PluginRegistered<'a> {
    pub plugin_id: &'a str,
    pub registered_count: usize,
}

impl Display for PluginRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' registered: {} plugins now registered",
            self.plugin_id, self.registered_count
        )
    }
}

impl StructuredLog for PluginRegistered<'_> {
    fn log(&self) {
        tracing::info!(
            plugin_id = self.plugin_id,
            registered_count = self.registered_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "plugin_registered",
            span_name = name,
            plugin_id = self.plugin_id,
            registered_count = self.registered_count,
        )
    }
}

/// Registration skipped because the id is already taken.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
///
/// # Example
/// ```
/// use signal_trace::observability::messages::plugin::PluginAlreadyRegistered;
///
/// let msg = PluginAlreadyRegistered { plugin_id: "logger" };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct PluginAlreadyRegistered<'a> {
    pub plugin_id: &'a str,
}

impl Display for PluginAlreadyRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' is already registered. Skipping registration.",
            self.plugin_id
        )
    }
}

impl StructuredLog for PluginAlreadyRegistered<'_> {
    fn log(&self) {
        tracing::warn!(plugin_id = self.plugin_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "plugin_already_registered",
            span_name = name,
            plugin_id = self.plugin_id,
        )
    }
}

/// Plugin removed from the registry after its cleanup hook ran.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PluginUnregistered<'a> {
    pub plugin_id: &'a str,
    pub registered_count: usize,
}

impl Display for PluginUnregistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' unregistered: {} plugins remain",
            self.plugin_id, self.registered_count
        )
    }
}

impl StructuredLog for PluginUnregistered<'_> {
    fn log(&self) {
        tracing::info!(
            plugin_id = self.plugin_id,
            registered_count = self.registered_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "plugin_unregistered",
            span_name = name,
            plugin_id = self.plugin_id,
            registered_count = self.registered_count,
        )
    }
}

/// `Signal::with` named a plugin that is not registered; the signal passes
/// through unchanged.
///
/// # Log Level
/// `debug!` - Expected, degraded-gracefully path
pub struct PluginNotFound<'a> {
    pub plugin_id: &'a str,
    pub signal_id: &'a str,
}

impl Display for PluginNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' is not registered; signal {} passed through unchanged",
            self.plugin_id, self.signal_id
        )
    }
}

impl StructuredLog for PluginNotFound<'_> {
    fn log(&self) {
        tracing::debug!(
            plugin_id = self.plugin_id,
            signal_id = self.signal_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plugin_not_found",
            span_name = name,
            plugin_id = self.plugin_id,
            signal_id = self.signal_id,
        )
    }
}

/// Plugin `execute` returned.
///
/// # Log Level
/// `debug!` - Per-signal event
///
/// # Example
/// ```
/// use signal_trace::observability::messages::plugin::PluginExecuted;
/// use std::time::Duration;
///
/// let msg = PluginExecuted {
///     plugin_id: "observer",
///     signal_id: "7d1c9a52-2f7e-4e55-9d8f-1b0cfa4e2a10",
///     succeeded: true,
///     duration: Duration::from_micros(40),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PluginExecuted<'a> {
    pub plugin_id: &'a str,
    pub signal_id: &'a str,
    pub succeeded: bool,
    pub duration: std::time::Duration,
}

impl Display for PluginExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.succeeded { "ok" } else { "failed" };
        write!(
            f,
            "Plugin '{}' executed on signal {}: {} in {:?}",
            self.plugin_id, self.signal_id, outcome, self.duration
        )
    }
}

impl StructuredLog for PluginExecuted<'_> {
    fn log(&self) {
        tracing::debug!(
            plugin_id = self.plugin_id,
            signal_id = self.signal_id,
            succeeded = self.succeeded,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plugin_execution",
            span_name = name,
            plugin_id = self.plugin_id,
            signal_id = self.signal_id,
        )
    }
}

/// A built-in plugin ran one of its lifecycle hooks.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct PluginHookInvoked<'a> {
    pub plugin_id: &'a str,
    pub stage: PluginStage,
}

impl Display for PluginHookInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Plugin '{}' ran {}", self.plugin_id, self.stage)
    }
}

impl StructuredLog for PluginHookInvoked<'_> {
    fn log(&self) {
        tracing::debug!(
            plugin_id = self.plugin_id,
            stage = %self.stage,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plugin_hook",
            span_name = name,
            plugin_id = self.plugin_id,
            stage = %self.stage,
        )
    }
}
