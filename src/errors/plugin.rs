// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by plugins and surfaced to the caller of `with`,
//! `register` or `unregister`.

use std::fmt;
use thiserror::Error;

/// Lifecycle point at which a plugin failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStage {
    Init,
    Execute,
    Cleanup,
}

impl fmt::Display for PluginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            PluginStage::Init => "init",
            PluginStage::Execute => "execute",
            PluginStage::Cleanup => "cleanup",
        };
        write!(f, "{}", stage)
    }
}

/// Plugin faults. These are never converted into signal failures.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin reported a failure from one of its hooks.
    #[error("Plugin '{plugin_id}' failed during {stage}: {reason}")]
    Failed {
        plugin_id: String,
        stage: PluginStage,
        reason: String,
    },

    /// Options could not be decoded into the plugin's option type.
    #[error("Plugin '{plugin_id}' received invalid options: {source}")]
    InvalidOptions {
        plugin_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The plugin returned a signal whose value is not of the requested type.
    #[error("Plugin '{plugin_id}' returned a value that is not a {expected}")]
    ValueTypeMismatch {
        plugin_id: String,
        expected: &'static str,
    },
}

impl PluginError {
    pub fn failed(plugin_id: impl Into<String>, stage: PluginStage, reason: impl Into<String>) -> Self {
        PluginError::Failed {
            plugin_id: plugin_id.into(),
            stage,
            reason: reason.into(),
        }
    }

    pub fn plugin_id(&self) -> &str {
        match self {
            PluginError::Failed { plugin_id, .. }
            | PluginError::InvalidOptions { plugin_id, .. }
            | PluginError::ValueTypeMismatch { plugin_id, .. } => plugin_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_table_driven() {
        struct TestCase {
            name: &'static str,
            error: PluginError,
            expected: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "init failure",
                error: PluginError::failed("audit", PluginStage::Init, "no sink"),
                expected: "Plugin 'audit' failed during init: no sink",
            },
            TestCase {
                name: "cleanup failure",
                error: PluginError::failed("audit", PluginStage::Cleanup, "flush failed"),
                expected: "Plugin 'audit' failed during cleanup: flush failed",
            },
            TestCase {
                name: "type mismatch",
                error: PluginError::ValueTypeMismatch {
                    plugin_id: "swap".to_string(),
                    expected: "i32",
                },
                expected: "Plugin 'swap' returned a value that is not a i32",
            },
        ];

        for case in test_cases {
            assert_eq!(case.error.to_string(), case.expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_invalid_options_keeps_source() {
        let source = serde_json::from_str::<u8>("\"loud\"").unwrap_err();
        let error = PluginError::InvalidOptions {
            plugin_id: "logger".to_string(),
            source,
        };

        assert_eq!(error.plugin_id(), "logger");
        assert!(std::error::Error::source(&error).is_some());
    }
}
