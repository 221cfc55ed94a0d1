//! ABI error types

use thiserror::Error;

/// ABI codec error
///
/// Every variant is fatal to the call that produced it. The codec is a pure
/// function of its inputs, so retrying with the same arguments yields the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Malformed or unknown type string
    #[error("Parse error: {0}")]
    Parse(String),

    /// Value shape does not match the type descriptor
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Integer outside its declared bit width, or wrong fixed array length
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Decode buffer too short, or an offset points outside the buffer
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Non-zero high bytes in an address word
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Operation not defined for the given type
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl AbiError {
    /// Prefix the message with the parameter it was raised for, keeping the kind.
    pub(crate) fn in_param(self, position: usize, name: &str) -> Self {
        let ctx = |msg: String| {
            if name.is_empty() {
                format!("parameter {}: {}", position, msg)
            } else {
                format!("parameter {} `{}`: {}", position, name, msg)
            }
        };
        match self {
            AbiError::Parse(m) => AbiError::Parse(ctx(m)),
            AbiError::TypeMismatch(m) => AbiError::TypeMismatch(ctx(m)),
            AbiError::OutOfRange(m) => AbiError::OutOfRange(ctx(m)),
            AbiError::MalformedInput(m) => AbiError::MalformedInput(ctx(m)),
            AbiError::InvalidAddress(m) => AbiError::InvalidAddress(ctx(m)),
            AbiError::UnsupportedOperation(m) => AbiError::UnsupportedOperation(ctx(m)),
        }
    }
}

impl From<hex::FromHexError> for AbiError {
    fn from(e: hex::FromHexError) -> Self {
        AbiError::Parse(format!("invalid hex: {}", e))
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::Parse(format!("invalid ABI JSON: {}", e))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AbiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_param_keeps_kind() {
        let err = AbiError::OutOfRange("256 does not fit in uint8".into()).in_param(1, "amount");
        assert!(matches!(err, AbiError::OutOfRange(_)));
        assert_eq!(
            err.to_string(),
            "Out of range: parameter 1 `amount`: 256 does not fit in uint8"
        );
    }

    #[test]
    fn test_in_param_unnamed() {
        let err = AbiError::MalformedInput("short".into()).in_param(0, "");
        assert_eq!(err.to_string(), "Malformed input: parameter 0: short");
    }
}
