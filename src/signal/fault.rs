// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion of panics in caller-supplied closures into signal failures.

use crate::errors::SignalError;
use crate::observability::messages::{signal::TransformFaulted, StructuredLog};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use uuid::Uuid;

/// Run `f`, turning a panic into [`SignalError::Panicked`].
///
/// The closure only ever sees shared borrows of immutable signal data, so a
/// half-finished call cannot leave a signal in a broken state.
pub(crate) fn guard<R>(operation: &'static str, signal_id: Uuid, f: impl FnOnce() -> R) -> Result<R, SignalError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        TransformFaulted {
            operation,
            signal_id: &signal_id.to_string(),
            message: &message,
        }
        .log();
        SignalError::Panicked(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "closure panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_through_result() {
        assert_eq!(guard("map", Uuid::new_v4(), || 2 + 2).unwrap(), 4);
    }

    #[test]
    fn test_guard_captures_static_str_panic() {
        let err = guard("map", Uuid::new_v4(), || -> i32 { panic!("boom") }).unwrap_err();
        assert!(err.is_panic());
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_guard_captures_formatted_panic() {
        let limit = 3;
        let err = guard("ensure", Uuid::new_v4(), || -> bool { panic!("over limit {}", limit) }).unwrap_err();
        assert_eq!(err.message(), "over limit 3");
    }

    #[test]
    fn test_guard_unknown_payload() {
        let err = guard("map", Uuid::new_v4(), || -> () { std::panic::panic_any(17u8) }).unwrap_err();
        assert_eq!(err.message(), "closure panicked");
    }
}
