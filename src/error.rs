// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for console sessions
//!
//! Malformed input, transport faults and handshake failures are kept in
//! separate variants so callers can tell "the network is down" apart from
//! "the login flow of the target application changed".

use thiserror::Error;

/// Result type alias for console session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for console sessions
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed at the transport layer
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Target URL could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// URL or query string violates the expected grammar
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Transport failure not originating from reqwest
    #[error("Transport error: {0}")]
    Transport(String),

    /// Login handshake assertion failed
    #[error("Authentication failed at step {step}: {reason}")]
    Authentication {
        step: u8,
        reason: String,
        url: Option<String>,
        status: Option<u16>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a structural URL error
    pub fn malformed_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create an authentication error carrying the offending response context
    pub fn auth_with_response(
        step: u8,
        reason: impl Into<String>,
        url: impl Into<String>,
        status: u16,
    ) -> Self {
        Error::Authentication {
            step,
            reason: reason.into(),
            url: Some(url.into()),
            status: Some(status),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Url(_) | Error::Transport(_))
    }

    /// Check if this is a handshake failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Check if the input itself was unusable
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedUrl { .. } | Error::Url(_))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::MalformedUrl { url, .. } => Some(url),
            Error::Authentication { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }
}
