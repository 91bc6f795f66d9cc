//! Error taxonomy shared by hosts, managers and the plugin system
//!
//! Every error carries a human-readable message naming the offending
//! identifier, path or value. Errors are raised at the call that detected
//! them and are never deferred or batched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INPUT_VALIDATION: &str = "INPUT_VALIDATION";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
    pub const CONFIGURATION: &str = "CONFIGURATION";
    pub const WHOLE_BATCH: &str = "WHOLE_BATCH";
}

/// Error raised by a public AssetIO operation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AssetIoError {
    /// Malformed or invalid arguments to a public operation.
    #[error("{0}")]
    InputValidation(String),

    /// A value or key is not of a supported kind. A specialisation of
    /// input validation, see [`AssetIoError::is_input_validation`].
    #[error("{0}")]
    Type(String),

    /// A required override was not supplied by a concrete implementation.
    #[error("{0}")]
    NotImplemented(String),

    /// Environment, search path or config file misconfiguration.
    #[error("{0}")]
    Configuration(String),

    /// An entire batched request failed with no partial state change.
    #[error("{0}")]
    WholeBatch(String),
}

impl AssetIoError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AssetIoError::InputValidation(_) => codes::INPUT_VALIDATION,
            AssetIoError::Type(_) => codes::TYPE_ERROR,
            AssetIoError::NotImplemented(_) => codes::NOT_IMPLEMENTED,
            AssetIoError::Configuration(_) => codes::CONFIGURATION,
            AssetIoError::WholeBatch(_) => codes::WHOLE_BATCH,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AssetIoError::InputValidation(m)
            | AssetIoError::Type(m)
            | AssetIoError::NotImplemented(m)
            | AssetIoError::Configuration(m)
            | AssetIoError::WholeBatch(m) => m,
        }
    }

    /// True for input validation failures, including type errors.
    pub fn is_input_validation(&self) -> bool {
        matches!(self, AssetIoError::InputValidation(_) | AssetIoError::Type(_))
    }

    // ========== Common Error Constructors ==========

    pub fn input_validation(message: impl Into<String>) -> Self {
        Self::InputValidation(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// A foreign value kind that cannot be stored as a property.
    pub fn unsupported_kind(kind: &str) -> Self {
        Self::Type(format!("type '{}' is not supported", kind))
    }

    /// A key or identifier argument that is not a string.
    pub fn non_string_argument(argument: &str, kind: &str) -> Self {
        Self::Type(format!("{} must be a string, got '{}'", argument, kind))
    }

    /// A stored or supplied value whose kind differs from the declared one.
    pub fn kind_mismatch(key: &str, expected: &str, got: &str) -> Self {
        Self::Type(format!(
            "property '{}' expects a value of type '{}', got '{}'",
            key, expected, got
        ))
    }

    pub fn empty_argument(argument: &str) -> Self {
        Self::InputValidation(format!("{} must not be empty", argument))
    }
}

/// Result alias used across AssetIO crates
pub type Result<T> = std::result::Result<T, AssetIoError>;
