// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // plugin declarations + loader
pub mod errors;     // error handling
pub mod observability;
pub mod plugins;    // built-in plugins
pub mod registry;   // plugin registry
pub mod signal;     // the Signal type and its chaining algebra
pub mod trace;      // layers, reflections, export
pub mod traits;     // plugin contract

pub use errors::{ConfigError, PluginError, PluginStage, SignalError};
pub use registry::{has_plugin, register_plugin, unregister_plugin, PluginRegistry};
pub use signal::Signal;
pub use trace::{into_context, Context, ContextValue, Reflection, SharedValue, TraceData, TraceEntry, TraceStatus};
pub use traits::{AnySignal, PluginConfig, SignalPlugin};
