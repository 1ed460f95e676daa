// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session configuration

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;

/// Login form credentials
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session configuration
///
/// Loaded from JSON:
///
/// ```json
/// {
///   "login_url": "https://sso.example.test/openam/UI/Login",
///   "home_url": "https://console.example.test/console",
///   "credentials": { "username": "tester", "password": "secret" },
///   "login_on_connect": false,
///   "http": { "accept_invalid_certs": true }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Login page the handshake starts from
    #[serde(default)]
    pub login_url: String,
    /// Home page of the console; session calls are made relative to it
    #[serde(default)]
    pub home_url: String,
    /// Login form credentials
    #[serde(default)]
    pub credentials: Credentials,
    /// Run the handshake when the session is created
    #[serde(default)]
    pub login_on_connect: bool,
    /// Transport settings
    #[serde(default)]
    pub http: HttpClientConfig,
}

impl SessionConfig {
    /// Create a new session config
    pub fn new(login_url: impl Into<String>, home_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            home_url: home_url.into(),
            credentials: Credentials::default(),
            login_on_connect: false,
            http: HttpClientConfig::default(),
        }
    }

    /// Set credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    /// Run the handshake on connect
    pub fn login_on_connect(mut self, enabled: bool) -> Self {
        self.login_on_connect = enabled;
        self
    }

    /// Set transport settings
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Error reading file {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Both endpoint URLs must be present
    pub fn validate(&self) -> Result<()> {
        if self.login_url.trim().is_empty() {
            return Err(Error::config("login_url is not defined"));
        }
        if self.home_url.trim().is_empty() {
            return Err(Error::config("home_url is not defined"));
        }
        Ok(())
    }
}
