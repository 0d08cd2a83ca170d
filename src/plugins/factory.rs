// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::{LoggerOptions, LoggerPlugin, ObserverPlugin};
use crate::config::{PluginDecl, PluginKind};
use crate::errors::PluginError;
use crate::traits::SignalPlugin;

/// Factory for creating built-in plugin instances from configuration
pub struct PluginFactory;

impl PluginFactory {
    /// Create a plugin instance from a declaration
    ///
    /// The `kind` field determines which plugin to create:
    /// - `logger` -> LoggerPlugin, with `options` decoded as its default LoggerOptions
    /// - `observer` -> ObserverPlugin without callbacks; `options` are ignored
    pub fn create_plugin(decl: &PluginDecl) -> Result<Arc<dyn SignalPlugin>, PluginError> {
        match decl.kind {
            PluginKind::Logger => {
                let options = match &decl.options {
                    Some(options) => serde_json::from_value::<LoggerOptions>(options.clone()).map_err(|source| {
                        PluginError::InvalidOptions {
                            plugin_id: decl.id.clone(),
                            source,
                        }
                    })?,
                    None => LoggerOptions::default(),
                };
                Ok(Arc::new(LoggerPlugin::with_id(&decl.id).with_options(options)))
            }
            PluginKind::Observer => Ok(Arc::new(ObserverPlugin::with_id(&decl.id))),
        }
    }
}
