//! Error types shared across Hardsub Studio crates.

/// Top-level error type for Hardsub Studio operations.
#[derive(Debug, thiserror::Error)]
pub enum HardsubError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("A hardsub run is already in progress")]
    AlreadyRunning,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using HardsubError.
pub type HardsubResult<T> = Result<T, HardsubError>;

impl HardsubError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: msg.into(),
        }
    }

    /// Whether this error should be shown to the user as a notification.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
