// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod plugin;
mod signal;

pub use config::ConfigError;
pub use plugin::{PluginError, PluginStage};
pub use signal::SignalError;
