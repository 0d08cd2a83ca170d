// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{load_config, PluginKind};
use crate::registry::PluginRegistry;
use crate::signal::Signal;

/// The shipped demo configuration parses and declares both plugin kinds
#[test]
fn test_demo_yaml_loading() {
    let config = load_config("configs/plugins.yaml").unwrap();

    assert_eq!(config.plugins.len(), 2);
    assert_eq!(config.plugins[0].id, "audit");
    assert_eq!(config.plugins[0].kind, PluginKind::Logger);
    assert_eq!(config.plugins[1].id, "observer");
    assert_eq!(config.plugins[1].kind, PluginKind::Observer);
}

/// A registry built from YAML runs its plugins through `Signal::with_in`
#[test]
fn test_registry_from_yaml_applies_plugins() {
    let config = load_config("configs/plugins.yaml").unwrap();
    let registry = PluginRegistry::from_config(&config).unwrap();

    let signal = Signal::success(5)
        .layer("Service")
        .with_in(&registry, "audit")
        .and_then(|s| s.with_in(&registry, "observer"))
        .unwrap();

    assert_eq!(signal.value(), Some(&5));
    let reflections = signal.entries()[1].reflections();
    assert_eq!(reflections.len(), 1);
    assert_eq!(reflections[0].message(), "Observed by observer plugin");

    registry.unregister_all().unwrap();
    assert!(registry.is_empty());
}
