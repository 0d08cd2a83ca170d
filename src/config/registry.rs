// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::errors::ConfigError;
use crate::plugins::PluginFactory;
use crate::registry::PluginRegistry;

impl PluginRegistry {
    /// Build a registry holding every plugin declared in `cfg`, each
    /// initialized once. Declarations repeating an id are skipped with a
    /// warning, as with any duplicate registration.
    pub fn from_config(cfg: &Config) -> Result<PluginRegistry, ConfigError> {
        let registry = PluginRegistry::new();
        for decl in &cfg.plugins {
            let plugin = PluginFactory::create_plugin(decl)?;
            registry.register(plugin)?;
        }
        Ok(registry)
    }
}
