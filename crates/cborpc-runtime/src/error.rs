use thiserror::Error;

/// An application-level handler failure.
///
/// Reported to the caller as a handler-error response carrying the
/// message; it never aborts the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
