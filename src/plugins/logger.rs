// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::{PluginError, PluginStage};
use crate::observability::messages::plugin::PluginHookInvoked;
use crate::observability::messages::signal::SignalLogged;
use crate::observability::messages::StructuredLog;
use crate::traits::{AnySignal, SignalPlugin};

pub const DEFAULT_LOGGER_ID: &str = "logger";

/// Level at which the logger plugin emits its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Options accepted by [`LoggerPlugin`], either declared up front or
/// passed per call through `PluginConfig::options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerOptions {
    pub level: LogLevel,
    /// Attach the rendered value to the event (see [`LoggerPlugin::with_value_renderer`]).
    pub include_value: bool,
    /// Attach the exported trace (JSON) to the event.
    pub include_trace: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_value: true,
            include_trace: false,
        }
    }
}

type SignalFormatter = Box<dyn Fn(&AnySignal) -> String + Send + Sync>;
type ValueRenderer = Box<dyn Fn(&AnySignal) -> Option<String> + Send + Sync>;

/// What a single `execute` call writes, before it goes to `tracing`.
#[derive(Debug, Default, PartialEq)]
struct Rendered {
    message: Option<String>,
    value: Option<String>,
    trace: Option<String>,
}

/// Logs each signal it is applied to and returns it unchanged.
///
/// Values are type-erased, so the logger can only show the ones it knows:
/// strings, booleans, the primitive numbers and `serde_json::Value`. A
/// value renderer covers anything else.
pub struct LoggerPlugin {
    id: String,
    defaults: LoggerOptions,
    formatter: Option<SignalFormatter>,
    value_renderer: Option<ValueRenderer>,
}

impl LoggerPlugin {
    pub fn new() -> Self {
        Self::with_id(DEFAULT_LOGGER_ID)
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            defaults: LoggerOptions::default(),
            formatter: None,
            value_renderer: None,
        }
    }

    /// Replace the event message with the formatter's output.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&AnySignal) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Render values the built-in renderer does not know. Returning `None`
    /// leaves the value out of the event.
    pub fn with_value_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&AnySignal) -> Option<String> + Send + Sync + 'static,
    {
        self.value_renderer = Some(Box::new(renderer));
        self
    }

    /// Options used when a call passes none. Per-call options override
    /// these field by field.
    pub fn with_options(mut self, defaults: LoggerOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.defaults
    }

    fn resolve(&self, options: Option<&Value>) -> Result<LoggerOptions, PluginError> {
        let overrides = match options {
            None | Some(Value::Null) => return Ok(self.defaults.clone()),
            Some(overrides) => overrides,
        };

        let merged = match (serde_json::to_value(&self.defaults), overrides) {
            (Ok(Value::Object(mut base)), Value::Object(overrides)) => {
                base.extend(overrides.clone());
                Value::Object(base)
            }
            _ => overrides.clone(),
        };

        serde_json::from_value(merged).map_err(|source| PluginError::InvalidOptions {
            plugin_id: self.id.clone(),
            source,
        })
    }

    fn render(&self, signal: &AnySignal, options: &LoggerOptions) -> Rendered {
        let value = if options.include_value {
            match &self.value_renderer {
                Some(renderer) => renderer(signal),
                None => render_known_value(signal),
            }
        } else {
            None
        };

        Rendered {
            message: self.formatter.as_ref().map(|formatter| formatter(signal)),
            value,
            trace: options.include_trace.then(|| signal.trace_json().to_string()),
        }
    }
}

fn render_known_value(signal: &AnySignal) -> Option<String> {
    if let Some(value) = signal.value_as::<Value>() {
        return Some(value.to_string());
    }
    if let Some(value) = signal.value_as::<String>() {
        return Some(value.clone());
    }
    if let Some(value) = signal.value_as::<&'static str>() {
        return Some(value.to_string());
    }
    if let Some(value) = signal.value_as::<bool>() {
        return Some(value.to_string());
    }

    macro_rules! numeric {
        ($($ty:ty),*) => {
            $(
                if let Some(value) = signal.value_as::<$ty>() {
                    return Some(value.to_string());
                }
            )*
        };
    }
    numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

    None
}

impl fmt::Debug for LoggerPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerPlugin")
            .field("id", &self.id)
            .field("defaults", &self.defaults)
            .field("formatter", &self.formatter.is_some())
            .field("value_renderer", &self.value_renderer.is_some())
            .finish()
    }
}

impl Default for LoggerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPlugin for LoggerPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn init(&self) -> Result<(), PluginError> {
        PluginHookInvoked {
            plugin_id: &self.id,
            stage: PluginStage::Init,
        }
        .log();
        Ok(())
    }

    fn execute(&self, signal: AnySignal, options: Option<&Value>) -> Result<AnySignal, PluginError> {
        let options = self.resolve(options)?;
        let rendered = self.render(&signal, &options);

        let signal_id = signal.id().to_string();
        let error = signal.error().map(|e| e.message());

        let logged = SignalLogged {
            plugin_id: &self.id,
            signal_id: &signal_id,
            is_success: signal.is_success(),
            error: error.as_deref(),
            value: rendered.value.as_deref(),
            trace: rendered.trace.as_deref(),
            formatted: rendered.message.as_deref(),
            level: options.level,
        };
        let span = logged.span("logger_plugin");
        let _guard = span.enter();
        logged.log();

        Ok(signal)
    }

    fn cleanup(&self) -> Result<(), PluginError> {
        PluginHookInvoked {
            plugin_id: &self.id,
            stage: PluginStage::Cleanup,
        }
        .log();
        Ok(())
    }
}
