//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Codec failure reported by the library
    #[error("ABI error: {0}")]
    Abi(#[from] bach_abi::AbiError),

    /// A JSON value does not fit its declared type
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
