//! Error types for the ccapi client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use bytes::Bytes;
use thiserror::Error;

/// The main error type for the ccapi client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown route: {name}")]
    UnknownRoute { name: String },

    #[error("Missing parameter '{param}' for route '{route}'")]
    MissingRouteParam { route: String, param: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Received response with status code {status}")]
    UnexpectedStatus { status: u16, body: Bytes },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to encode resources: {message}")]
    Encode { message: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("ErrInvalidToken")]
    InvalidToken,

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, body: impl Into<Bytes>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Raw response body carried by a non-200 response, if any
    pub fn response_body(&self) -> Option<&Bytes> {
        match self {
            Error::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Status code of a non-200 response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the caller should refresh its token before trying again
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::InvalidToken => true,
            Error::UnexpectedStatus { status, .. } => *status == 401,
            _ => false,
        }
    }
}

/// Result type alias for the ccapi client
pub type Result<T> = std::result::Result<T, Error>;
