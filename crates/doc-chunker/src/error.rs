use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors raised while building a chunker configuration.
///
/// Chunking itself never fails: malformed or degenerate documents produce
/// an empty chunk list instead of an error.
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown content category label
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unknown category error
    pub fn unknown_category(label: impl Into<String>) -> Self {
        Self::UnknownCategory(label.into())
    }
}
