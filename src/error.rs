//! Error types for nfd-lookup

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("encoding address is the wrong length, should be {expected} bytes, got {actual}")]
    WrongAddressLength { expected: usize, actual: usize },
    #[error("address checksum is incorrect, did you copy the address correctly?")]
    ChecksumMismatch,
    #[error("Invalid transaction ID: {0}")]
    InvalidTxId(String),
    #[error("Invalid program: {0}")]
    InvalidProgram(String),
    #[error("Lookup template doesn't match expectation")]
    TemplateMismatch,
    #[error("Invalid registry application ID: {0}")]
    InvalidAppId(i64),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for LookupError {
    fn from(err: toml::de::Error) -> Self {
        LookupError::ConfigError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LookupError>;
