//! Error types for a3s-log

use thiserror::Error;

/// Errors that can occur while configuring or driving the logger
///
/// None of these ever escape a log call. They surface from construction,
/// transport registration, and the bus client seam only.
#[derive(Debug, Error)]
pub enum LogError {
    /// Level name not present in the level registry
    #[error("Unknown log level: '{0}'")]
    UnknownLevel(String),

    /// Timezone name not present in the IANA database
    #[error("Unknown timezone: '{0}'")]
    Timezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bus or transport connection failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Publish failure
    #[error("Failed to publish log entry to subject '{subject}': {reason}")]
    Publish {
        subject: String,
        reason: String,
    },

    /// Transport write failure
    #[error("Transport '{transport}' failed: {reason}")]
    Transport {
        transport: String,
        reason: String,
    },

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure on a transport socket or writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for logger operations
pub type Result<T> = std::result::Result<T, LogError>;
