// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::errors::PluginError;
use crate::traits::{AnySignal, SignalPlugin};

pub const DEFAULT_OBSERVER_ID: &str = "observer";
pub const OBSERVED_MESSAGE: &str = "Observed by observer plugin";

type Callback = Box<dyn Fn(&AnySignal) + Send + Sync>;

/// Calls back into application code for every signal it is applied to.
///
/// `always` runs first, then `on_success` or `on_failure` depending on the
/// signal's state. The returned signal carries one extra reflection,
/// [`OBSERVED_MESSAGE`], in its current layer.
///
/// ```rust
/// use signal_trace::plugins::ObserverPlugin;
/// use signal_trace::{PluginRegistry, Signal};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let failures = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&failures);
///
/// let registry = PluginRegistry::new();
/// registry.register(Arc::new(ObserverPlugin::new().on_failure(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// })))?;
///
/// Signal::<i32>::failure("boom").with_in(&registry, "observer")?;
/// assert_eq!(failures.load(Ordering::SeqCst), 1);
/// # Ok::<(), signal_trace::PluginError>(())
/// ```
pub struct ObserverPlugin {
    id: String,
    always: Option<Callback>,
    on_success: Option<Callback>,
    on_failure: Option<Callback>,
}

impl ObserverPlugin {
    pub fn new() -> Self {
        Self::with_id(DEFAULT_OBSERVER_ID)
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            always: None,
            on_success: None,
            on_failure: None,
        }
    }

    pub fn always(mut self, callback: impl Fn(&AnySignal) + Send + Sync + 'static) -> Self {
        self.always = Some(Box::new(callback));
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&AnySignal) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_failure(mut self, callback: impl Fn(&AnySignal) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Box::new(callback));
        self
    }
}

impl Default for ObserverPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPlugin for ObserverPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, signal: AnySignal, _options: Option<&Value>) -> Result<AnySignal, PluginError> {
        if let Some(always) = &self.always {
            always(&signal);
        }

        let callback = if signal.is_success() {
            &self.on_success
        } else {
            &self.on_failure
        };
        if let Some(callback) = callback {
            callback(&signal);
        }

        Ok(signal.reflect(OBSERVED_MESSAGE))
    }
}
