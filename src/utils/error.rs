//! Error types for the friendlang classifier
//!
//! This module defines the domain errors raised while talking to the Steam
//! Web API and while reading the identifier list.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during Steam Web API calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code (401 for private profiles, 429, 5xx, ...)
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be decoded
    #[error("Decoding error: {0}")]
    Decode(String),

    /// A steam id in the response was not a decimal u64
    #[error("Invalid steam id: {0}")]
    InvalidSteamId(String),

    /// Proxy configuration rejected by the HTTP client
    #[error("Invalid proxy {host}: {reason}")]
    InvalidProxy { host: String, reason: String },
}

impl ApiError {
    /// Map a reqwest error, separating out timeouts
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors raised while loading the identifier list
#[derive(Error, Debug)]
pub enum InputError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a decimal u64
    #[error("Line {line}: cannot parse {value:?} as a steam id")]
    MalformedLine { line: usize, value: String },
}
