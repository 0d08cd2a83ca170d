// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The contract every plugin implements, and the invocation record handed
//! to `Signal::with`.

use crate::errors::PluginError;
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

/// A signal whose value type has been erased, as seen by plugins.
///
/// Use [`Signal::value_as`] to inspect the value and
/// [`Signal::downcast`] to recover a typed signal.
pub type AnySignal = Signal<dyn Any + Send + Sync>;

/// Hook that can be applied to any signal by id.
///
/// `init` runs exactly once when the plugin is registered and `cleanup`
/// exactly once when it is removed. `execute` must return a signal rather
/// than mutate its input; returning `signal` untouched is valid.
pub trait SignalPlugin: Send + Sync {
    fn id(&self) -> &str;

    fn init(&self) -> Result<(), PluginError> {
        Ok(())
    }

    fn execute(&self, signal: AnySignal, options: Option<&Value>) -> Result<AnySignal, PluginError>;

    fn cleanup(&self) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Which plugin to run, and the options passed to its `execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl PluginConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

impl From<&str> for PluginConfig {
    fn from(id: &str) -> Self {
        PluginConfig::new(id)
    }
}

impl From<String> for PluginConfig {
    fn from(id: String) -> Self {
        PluginConfig::new(id)
    }
}

impl From<&PluginConfig> for PluginConfig {
    fn from(config: &PluginConfig) -> Self {
        config.clone()
    }
}
