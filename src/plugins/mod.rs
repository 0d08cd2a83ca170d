// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in plugins.
//!
//! # Available Plugins
//!
//! ## Logger
//! Emits one structured `tracing` event per signal, at a configurable
//! level, optionally carrying the exported trace as JSON. The signal is
//! returned unchanged.
//!
//! ## Observer
//! Invokes caller-supplied callbacks (always, on success, on failure) and
//! records that the signal was observed.
//!
//! ## Stub Plugins (Test-Only)
//! Recording, failing and value-swapping plugins used by the registry and
//! signal tests. Not available in production builds.
//!
//! # Examples
//!
//! ```rust
//! use signal_trace::plugins::{LogLevel, LoggerOptions, LoggerPlugin};
//! use signal_trace::{PluginRegistry, Signal};
//! use std::sync::Arc;
//!
//! let registry = PluginRegistry::new();
//! registry.register(Arc::new(LoggerPlugin::new().with_options(LoggerOptions {
//!     level: LogLevel::Debug,
//!     include_trace: true,
//!     ..LoggerOptions::default()
//! })))?;
//!
//! let signal = Signal::success(42).with_in(&registry, "logger")?;
//! assert_eq!(signal.value(), Some(&42));
//! # Ok::<(), signal_trace::PluginError>(())
//! ```

pub mod factory;
pub mod logger;
pub mod observer;
#[cfg(test)]
pub mod stub;

pub use factory::PluginFactory;
pub use logger::{LogLevel, LoggerOptions, LoggerPlugin};
pub use observer::ObserverPlugin;
