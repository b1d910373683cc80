//! Unified error handling for the friendlang crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! domain errors usable on their own.
//!
//! # Architecture
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Inside a worker only [`ApiError`] is ever handled, and always by skipping
//! the current account. Everything else surfaces at startup and aborts the run.

use std::io;
use thiserror::Error;

pub use crate::utils::error::{ApiError, InputError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// Input parsing and response decoding errors
    Parsing,
    /// Output files and other I/O
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Get description for the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
        }
    }
}

/// Unified error type for the friendlang crate
#[derive(Error, Debug)]
pub enum Error {
    /// Steam Web API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Identifier list errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether retrying the same operation later could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(ApiError::Http(_) | ApiError::Timeout) => true,
            Self::Api(ApiError::Status(code)) => matches!(code, 429 | 500 | 502 | 503 | 504),
            Self::Api(_) => false,
            Self::Io(_) => true,
            Self::Input(_) | Self::Json(_) | Self::Toml(_) | Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(ApiError::Decode(_) | ApiError::InvalidSteamId(_)) => ErrorCategory::Parsing,
            Self::Api(ApiError::InvalidProxy { .. }) => ErrorCategory::Config,
            Self::Api(_) => ErrorCategory::Network,
            Self::Input(InputError::Read { .. }) | Self::Io(_) => ErrorCategory::Storage,
            Self::Input(_) | Self::Json(_) | Self::Toml(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
