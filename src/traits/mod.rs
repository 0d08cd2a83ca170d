// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod plugin;

pub use plugin::{AnySignal, PluginConfig, SignalPlugin};
