// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use serde_json::json;
use signal_trace::config::load_config;
use signal_trace::plugins::{LoggerPlugin, ObserverPlugin};
use signal_trace::{into_context, PluginRegistry, Signal};
use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
struct GatewayConfig {
    host: String,
    retries: u32,
}

#[derive(Debug, Clone)]
struct EnhancedConfig {
    base: GatewayConfig,
    timeout_ms: u64,
}

/// Repository layer: loads the raw gateway configuration.
fn load_gateway_config(name: &str) -> Signal<GatewayConfig> {
    Signal::success(name.to_string())
        .layer("Repository")
        .reflect_from(
            "Loading gateway config",
            Some(into_context(json!({ "name": name }))),
            "GatewayRepository::get_config",
        )
        .ensure(|name| !name.is_empty(), "Config is null")
        .map(|name| GatewayConfig {
            host: format!("{}.internal", name),
            retries: 3,
        })
        .reflect("Gateway config loaded")
}

/// Use-case layer: enriches the configuration with derived settings.
fn enhance_config(name: &str) -> Signal<EnhancedConfig> {
    load_gateway_config(name)
        .layer("UseCase")
        .ensure(|config| config.retries > 0, "Retries must be positive")
        .flat_map(|config| {
            Signal::success(EnhancedConfig {
                base: config.clone(),
                timeout_ms: u64::from(config.retries) * 1_000,
            })
            .reflect_from("Config enhanced", None, "GatewayUseCase::enhance")
        })
}

fn build_registry(args: &[String]) -> Result<PluginRegistry> {
    match args.get(1) {
        Some(path) => {
            let config = load_config(path).with_context(|| format!("loading {}", path))?;
            Ok(PluginRegistry::from_config(&config)?)
        }
        None => {
            let registry = PluginRegistry::new();
            registry.register(Arc::new(LoggerPlugin::with_id("audit")))?;
            registry.register(Arc::new(ObserverPlugin::new()))?;
            Ok(registry)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signal_trace=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let registry = build_registry(&args)?;

    println!("Signal trace demo");
    println!("Plugins: {:?}", registry.plugin_ids());
    println!();

    for name in ["payments", ""] {
        let result = enhance_config(name)
            .with_in(&registry, "audit")?
            .with_in(&registry, "observer")?;

        match result.value() {
            Some(config) => println!(
                "✅ {} -> host={} timeout={}ms",
                name, config.base.host, config.timeout_ms
            ),
            None => println!(
                "❌ {:?} -> {}",
                name,
                result.error().map(|e| e.message()).unwrap_or_default()
            ),
        }
        println!("{}", result.trace());
        println!("{}", serde_json::to_string_pretty(&result.trace_json())?);
        println!("{}", "─".repeat(80));
    }

    registry.unregister_all()?;
    Ok(())
}
