use crate::protocol::ElementId;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuillError>;

/// Failures reported by the browser driver itself.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Driver not ready")]
    NotReady,
    #[error("Failed to connect to WebDriver: {0}")]
    Connect(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Stale element handle {0}")]
    StaleElement(ElementId),
    #[error("Script error: {0}")]
    Script(String),
    #[error("Not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, Error)]
pub enum QuillError {
    #[error("Invalid argument for {what}: {value:?}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("No quotes found: {0}")]
    EmptyResultSet(String),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    WaitTimeout { what: String, timeout: Duration },

    #[error("Outcome for {name:?} is not a boolean: {found}")]
    TypeMismatch { name: String, found: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl QuillError {
    pub fn invalid_argument(what: &'static str, value: impl Into<String>) -> Self {
        QuillError::InvalidArgument {
            what,
            value: value.into(),
        }
    }
}
