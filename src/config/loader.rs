// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Declares the plugins a registry starts with.
///
/// It is typically loaded from a YAML configuration file.
///
/// # Fields
/// * `plugins` - Plugin declarations, registered in order (optional, defaults to none)
///
/// # Example
/// ```yaml
/// plugins:
///   - id: audit
///     kind: logger
///     options:
///       level: debug
///       include_trace: true
///   - id: observer
///     kind: observer
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plugins: Vec<PluginDecl>,
}

/// One plugin to build and register.
///
/// # Fields
/// * `id` - Id the plugin is registered under and looked up by in `Signal::with`
/// * `kind` - Which built-in plugin to instantiate
/// * `options` - Plugin-specific options (optional); for loggers these become the defaults
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PluginDecl {
    pub id: String,
    pub kind: PluginKind,
    #[serde(default)]
    pub options: Option<Value>,
}

/// Built-in plugin implementations that can be declared in configuration.
///
/// Observers declared in configuration have no callbacks; they only mark
/// the signals they see.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    Logger,
    Observer,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml(&content)
}
