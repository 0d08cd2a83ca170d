// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::{PluginError, PluginStage};
use crate::signal::Signal;
use crate::traits::{AnySignal, SignalPlugin};

/// Counts every hook invocation and reflects on each execution.
pub struct RecordingPlugin {
    pub id: String,
    init_calls: AtomicUsize,
    execute_calls: AtomicUsize,
    cleanup_calls: AtomicUsize,
    last_options: Mutex<Option<Value>>,
}

impl RecordingPlugin {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            init_calls: AtomicUsize::new(0),
            execute_calls: AtomicUsize::new(0),
            cleanup_calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn execute_count(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn cleanup_count(&self) -> usize {
        self.cleanup_calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<Value> {
        self.last_options.lock().unwrap().clone()
    }
}

impl SignalPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn init(&self) -> Result<(), PluginError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn execute(&self, signal: AnySignal, options: Option<&Value>) -> Result<AnySignal, PluginError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = options.cloned();
        Ok(signal.reflect("Processed by test plugin"))
    }

    fn cleanup(&self) -> Result<(), PluginError> {
        self.cleanup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A plugin that fails at one chosen lifecycle stage
pub struct FailingPlugin {
    pub id: String,
    pub stage: PluginStage,
}

impl FailingPlugin {
    pub fn new(id: &str, stage: PluginStage) -> Self {
        Self {
            id: id.to_string(),
            stage,
        }
    }

    fn check(&self, stage: PluginStage) -> Result<(), PluginError> {
        if self.stage == stage {
            return Err(PluginError::failed(&self.id, stage, "simulated failure"));
        }
        Ok(())
    }
}

impl SignalPlugin for FailingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn init(&self) -> Result<(), PluginError> {
        self.check(PluginStage::Init)
    }

    fn execute(&self, signal: AnySignal, _options: Option<&Value>) -> Result<AnySignal, PluginError> {
        self.check(PluginStage::Execute)?;
        Ok(signal)
    }

    fn cleanup(&self) -> Result<(), PluginError> {
        self.check(PluginStage::Cleanup)
    }
}

/// Replaces an `i32` value with its decimal string.
pub struct SwapPlugin {
    pub id: String,
}

impl SwapPlugin {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl SignalPlugin for SwapPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, signal: AnySignal, _options: Option<&Value>) -> Result<AnySignal, PluginError> {
        let swapped = Signal::extend_with(&signal, |value| {
            value
                .downcast_ref::<i32>()
                .map(|v| v.to_string())
                .unwrap_or_default()
        });
        Ok(swapped.erase())
    }
}
