// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the crate. Message types follow a struct-based
//! pattern with `Display` and [`messages::StructuredLog`] implementations to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent across `tracing` events and spans
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::plugin` - Plugin registry lifecycle and execution events
//! * `messages::signal` - Signal chaining faults and logger plugin output
//!
//! # Usage
//!
//! ```rust
//! use signal_trace::observability::messages::plugin::PluginRegistered;
//! use signal_trace::observability::messages::StructuredLog;
//!
//! let msg = PluginRegistered {
//!     plugin_id: "logger",
//!     registered_count: 1,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
