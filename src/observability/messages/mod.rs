// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit a `tracing` event (or open a span) carrying the
//! same data as discrete fields.
//!
//! # Organization
//!
//! * `plugin` - Plugin registration, removal and execution
//! * `signal` - Transform faults and logger plugin records
//!
//! # Usage Pattern
//!
//! ```rust
//! use signal_trace::observability::messages::signal::TransformFaulted;
//!
//! let msg = TransformFaulted {
//!     operation: "map",
//!     signal_id: "7d1c9a52-2f7e-4e55-9d8f-1b0cfa4e2a10",
//!     message: "index out of bounds",
//! };
//!
//! tracing::warn!("{}", msg);
//! ```

use tracing::Span;

pub mod plugin;
pub mod signal;

/// Emit a message as a structured `tracing` event, or wrap work in a span
/// carrying the message's fields.
pub trait StructuredLog {
    fn log(&self);

    fn span(&self, name: &str) -> Span;
}
