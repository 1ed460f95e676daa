// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated console session

use parking_lot::{Mutex, RwLock};

use super::config::SessionConfig;
use super::handshake::{self, SessionCookies};
use crate::error::Result;
use crate::http::{HttpClient, Response};

/// Session against the console under test
///
/// Built once at startup and shared by reference. Calls are made relative to
/// the home URL and carry the handshake cookies once [`Session::login`] has
/// succeeded; before that they go out unauthenticated.
pub struct Session {
    config: SessionConfig,
    http: HttpClient,
    cookies: RwLock<SessionCookies>,
    /// Serialises handshake runs
    login_lock: Mutex<()>,
}

impl Session {
    /// Create a session with a reqwest transport built from `config.http`
    pub fn connect(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http.clone())?;
        Self::with_client(config, http)
    }

    /// Create a session over an existing dispatcher
    pub fn with_client(config: SessionConfig, http: HttpClient) -> Result<Self> {
        config.validate()?;
        let session = Self {
            config,
            http,
            cookies: RwLock::new(SessionCookies::default()),
            login_lock: Mutex::new(()),
        };

        if session.config.login_on_connect {
            session.login()?;
        }
        Ok(session)
    }

    /// Run the login handshake.
    ///
    /// The cookie set is replaced only when all three steps succeed.
    pub fn login(&self) -> Result<()> {
        let _guard = self.login_lock.lock();
        let cookies = handshake::run(
            &self.http,
            &self.config.login_url,
            &self.config.home_url,
            &self.config.credentials,
        )?;
        *self.cookies.write() = cookies;
        Ok(())
    }

    /// Check if the handshake has completed
    pub fn is_authenticated(&self) -> bool {
        self.cookies.read().is_authenticated()
    }

    /// Snapshot of the current cookie set
    pub fn cookies(&self) -> SessionCookies {
        self.cookies.read().clone()
    }

    /// GET `home_url + path`
    pub fn get(&self, path: &str, query: Option<&str>) -> Result<Response> {
        let cookie = self.cookie_header();
        self.http.get(&self.url(path), query, cookie.as_deref())
    }

    /// POST a raw form body to `home_url + path`
    pub fn post(&self, path: &str, body: &str) -> Result<Response> {
        let cookie = self.cookie_header();
        self.http.post(&self.url(path), body, cookie.as_deref())
    }

    /// PUT a raw JSON body to `home_url + path`
    pub fn put(&self, path: &str, body: &str) -> Result<Response> {
        let cookie = self.cookie_header();
        self.http.put(&self.url(path), body, cookie.as_deref())
    }

    /// DELETE `home_url + path`
    pub fn delete(&self, path: &str) -> Result<Response> {
        let cookie = self.cookie_header();
        self.http.delete(&self.url(path), cookie.as_deref())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.home_url, path)
    }

    fn cookie_header(&self) -> Option<String> {
        let header = self.cookies.read().cookie_header();
        if header.is_none() {
            tracing::debug!("No session cookies, sending unauthenticated call");
        }
        header
    }
}
