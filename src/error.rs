//! Error types for the reservation service

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during reservation service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration error (missing credential, bad settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation error (missing/invalid required field, bad phone number)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider call error (the retried external operation exhausted all attempts)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Malformed/unexpected response shape
    #[error("Data error: {0}")]
    Data(String),
}

impl ServiceError {
    /// Coarse error category, embedded in failure outcomes alongside the message
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Configuration(_) => ErrorKind::Configuration,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Provider(_) => ErrorKind::ExternalCall,
            ServiceError::Data(_) => ErrorKind::Data,
        }
    }

    /// The error message without the category prefix.
    ///
    /// Failure records carry the kind as a separate field, so the message
    /// does not repeat it.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Configuration(msg)
            | ServiceError::Validation(msg)
            | ServiceError::Data(msg) => msg.clone(),
            ServiceError::Provider(err) => err.to_string(),
        }
    }
}

/// Error categories reported to callers of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing credential or invalid settings
    Configuration,
    /// Missing/invalid required field or phone number
    Validation,
    /// Retried external call exhausted all attempts
    ExternalCall,
    /// Response lacked an expected identifier or had an unexpected shape
    Data,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::ExternalCall => write!(f, "external_call"),
            ErrorKind::Data => write!(f, "data"),
        }
    }
}

/// Errors specific to voice-agent provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection error: {}", err))
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
