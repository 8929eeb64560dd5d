// error.rs - Error Types
//
// Two kinds of failure exist in the core: bad input from the user (durations,
// settings strings) and best-effort native window calls that the platform
// refused. Neither is ever fatal.

use thiserror::Error;

/// Errors produced by the focus overlay core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FocusError {
    /// A duration or settings value was rejected; the action is ignored
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A native window-flag call failed; the overlay degrades gracefully
    #[error("platform call `{operation}` failed: {reason}")]
    PlatformInterop {
        operation: &'static str,
        reason: String,
    },
}

impl FocusError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        FocusError::InvalidInput(message.into())
    }

    pub fn platform(operation: &'static str, reason: impl ToString) -> Self {
        FocusError::PlatformInterop {
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FocusError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, FocusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message() {
        let err = FocusError::invalid_input("duration must be positive");
        assert_eq!(err.to_string(), "invalid input: duration must be positive");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn platform_message_names_operation() {
        let err = FocusError::platform("set_click_through", "not supported");
        assert_eq!(
            err.to_string(),
            "platform call `set_click_through` failed: not supported"
        );
        assert!(!err.is_invalid_input());
    }
}
