// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;

#[cfg(test)]
mod integration_tests;

pub use loader::{load_config, Config, PluginDecl, PluginKind};
