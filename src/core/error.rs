//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Strict level parsing was given a name outside the canonical table
    #[error("Invalid log level: '{name}'")]
    InvalidLevel { name: String },

    /// A logger needs at least one backend
    #[error("Logger requires at least one backend")]
    NoBackends,

    /// A backend failed to accept a record
    #[error("Backend '{name}' failed: {message}")]
    Backend { name: String, message: String },

    /// `Record::formatted` was called on a record no adapter attached a formatter to
    #[error("No formatter attached to record")]
    FormatterMissing,

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    Formatter {
        format_type: String,
        message: String,
    },

    /// The process-wide default formatter can only be initialised once
    #[error("Default formatter already initialised")]
    DefaultFormatterAlreadySet,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create a backend failure
    pub fn backend(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Backend {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Formatter {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
