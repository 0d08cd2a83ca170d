// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugin registry.
//!
//! A [`PluginRegistry`] maps plugin ids to shared plugin instances. Most
//! code should own a registry and pass it where it is needed
//! (`Signal::with_in`); [`PluginRegistry::global`] gives access to a single
//! process-wide instance for `Signal::with` and the free functions in this
//! module.
//!
//! `init` and `cleanup` run with no lock held, so a hook may itself look
//! up, register or remove plugins on the same registry. An id is reserved
//! while its `init` runs: a concurrent registration of that id is a
//! duplicate and never initializes a second instance. Removal takes the
//! plugin out of the map before `cleanup` runs, so a plugin is cleaned up
//! at most once.

use crate::errors::PluginError;
use crate::observability::messages::plugin::{
    PluginAlreadyRegistered, PluginExecuted, PluginNotFound, PluginRegistered, PluginUnregistered,
};
use crate::observability::messages::StructuredLog;
use crate::signal::Signal;
use crate::traits::{AnySignal, PluginConfig, SignalPlugin};
use once_cell::sync::Lazy;
use std::any::{type_name, Any};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

static GLOBAL: Lazy<PluginRegistry> = Lazy::new(PluginRegistry::new);

#[derive(Default)]
struct RegistryState {
    plugins: HashMap<String, Arc<dyn SignalPlugin>>,
    // Ids whose `init` is running.
    initializing: HashSet<String>,
}

#[derive(Default)]
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

/// Releases an id reservation, also when `init` fails or panics.
struct Reservation<'a> {
    registry: &'a PluginRegistry,
    plugin_id: &'a str,
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.registry.write().initializing.remove(self.plugin_id);
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by `Signal::with`.
    pub fn global() -> &'static PluginRegistry {
        &GLOBAL
    }

    // Hooks never run under the lock, and every critical section leaves
    // the state consistent, so a poisoned guard is still usable.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialize and store `plugin`.
    ///
    /// Returns `Ok(false)` without calling `init` when the id is already
    /// registered or being registered. If `init` fails the plugin is not
    /// stored.
    pub fn register(&self, plugin: Arc<dyn SignalPlugin>) -> Result<bool, PluginError> {
        let plugin_id = plugin.id().to_string();

        {
            let mut state = self.write();
            if state.plugins.contains_key(&plugin_id) || !state.initializing.insert(plugin_id.clone()) {
                PluginAlreadyRegistered { plugin_id: &plugin_id }.log();
                return Ok(false);
            }
        }

        let reservation = Reservation {
            registry: self,
            plugin_id: &plugin_id,
        };
        plugin.init()?;

        let registered_count = {
            let mut state = self.write();
            state.plugins.insert(plugin_id.clone(), plugin);
            state.plugins.len()
        };
        drop(reservation);

        PluginRegistered {
            plugin_id: &plugin_id,
            registered_count,
        }
        .log();
        Ok(true)
    }

    /// Remove the plugin and run its `cleanup`.
    ///
    /// Returns `Ok(false)` when no plugin has that id. A `cleanup` error is
    /// returned after the plugin has already been removed.
    pub fn unregister(&self, plugin_id: &str) -> Result<bool, PluginError> {
        let (plugin, registered_count) = {
            let mut state = self.write();
            match state.plugins.remove(plugin_id) {
                Some(plugin) => (plugin, state.plugins.len()),
                None => return Ok(false),
            }
        };

        let cleaned = plugin.cleanup();
        PluginUnregistered {
            plugin_id,
            registered_count,
        }
        .log();
        cleaned.map(|_| true)
    }

    /// Remove every plugin, running each `cleanup` once. The first cleanup
    /// error is returned after all plugins have been removed.
    pub fn unregister_all(&self) -> Result<(), PluginError> {
        let removed: Vec<(String, Arc<dyn SignalPlugin>)> = self.write().plugins.drain().collect();
        let mut first_error = None;

        for (plugin_id, plugin) in removed {
            let cleaned = plugin.cleanup();
            PluginUnregistered {
                plugin_id: &plugin_id,
                registered_count: 0,
            }
            .log();
            if let Err(e) = cleaned {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn get_plugin(&self, plugin_id: &str) -> Option<Arc<dyn SignalPlugin>> {
        self.read().plugins.get(plugin_id).cloned()
    }

    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.read().plugins.contains_key(plugin_id)
    }

    /// Registered ids, sorted.
    pub fn plugin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().plugins.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.read().plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().plugins.is_empty()
    }

    /// Run the plugin named by `config` on `signal`.
    ///
    /// An unknown id hands back `signal` unchanged. The plugin must return
    /// a value of the same type; see [`PluginRegistry::apply_as`] for
    /// plugins that change it.
    pub fn apply<T>(&self, signal: &Signal<T>, config: impl Into<PluginConfig>) -> Result<Signal<T>, PluginError>
    where
        T: Any + Send + Sync,
    {
        let config = config.into();
        match self.execute(signal.erase(), &config)? {
            Some(result) => downcast_result(result, &config.id),
            None => Ok(signal.clone()),
        }
    }

    /// Run a plugin that produces a value of type `U`.
    ///
    /// An unknown id passes the signal through, which only type-checks when
    /// `T` and `U` are the same type.
    pub fn apply_as<T, U>(&self, signal: &Signal<T>, config: impl Into<PluginConfig>) -> Result<Signal<U>, PluginError>
    where
        T: Any + Send + Sync,
        U: Any + Send + Sync,
    {
        let config = config.into();
        let erased = signal.erase();
        let result = self.execute(erased.clone(), &config)?.unwrap_or(erased);
        downcast_result(result, &config.id)
    }

    fn execute(&self, signal: AnySignal, config: &PluginConfig) -> Result<Option<AnySignal>, PluginError> {
        let signal_id = signal.id().to_string();
        let Some(plugin) = self.get_plugin(&config.id) else {
            PluginNotFound {
                plugin_id: &config.id,
                signal_id: &signal_id,
            }
            .log();
            return Ok(None);
        };

        let start_time = Instant::now();
        let result = plugin.execute(signal, config.options.as_ref());

        PluginExecuted {
            plugin_id: &config.id,
            signal_id: &signal_id,
            succeeded: result.is_ok(),
            duration: start_time.elapsed(),
        }
        .log();

        result.map(Some)
    }
}

fn downcast_result<U: Any + Send + Sync>(signal: AnySignal, plugin_id: &str) -> Result<Signal<U>, PluginError> {
    signal.downcast::<U>().map_err(|_| PluginError::ValueTypeMismatch {
        plugin_id: plugin_id.to_string(),
        expected: type_name::<U>(),
    })
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugin_count", &self.len())
            .field("plugin_ids", &self.plugin_ids())
            .finish()
    }
}

/// Register `plugin` with the process-wide registry.
pub fn register_plugin(plugin: Arc<dyn SignalPlugin>) -> Result<bool, PluginError> {
    PluginRegistry::global().register(plugin)
}

/// Remove a plugin from the process-wide registry.
pub fn unregister_plugin(plugin_id: &str) -> Result<bool, PluginError> {
    PluginRegistry::global().unregister(plugin_id)
}

pub fn has_plugin(plugin_id: &str) -> bool {
    PluginRegistry::global().has_plugin(plugin_id)
}
