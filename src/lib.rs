// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Console Session - Authenticated HTTP driver for web consoles under test
//!
//! Models HTTP calls as structured requests and responses, and establishes
//! an authenticated session against an OpenAM-fronted console through a
//! fixed three-step cookie handshake.
//!
//! ## Features
//!
//! - Request model: URL decoding, base URL / query parameter split
//! - Response model: status, folded headers, raw body, originating request
//! - Call dispatcher: synchronous GET, POST, PUT, DELETE with cookie injection
//! - Per-client trust policy: accept self-signed staging certificates
//! - Login handshake: strict status and cookie-count checks at every step
//!
//! ## Example
//!
//! ```rust,no_run
//! use console_session::{Session, SessionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::new(
//!         "https://sso.example.test/openam/UI/Login",
//!         "https://console.example.test/console",
//!     )
//!     .credentials("tester", "secret");
//!
//!     let session = Session::connect(config)?;
//!     session.login()?;
//!
//!     let response = session.get("/api/models", Some("page=1"))?;
//!     println!("{} {}", response.status(), response.body());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod session;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Method, Protocol, Request, Response, Transport};

// Session
pub use session::{Credentials, Session, SessionConfig, SessionCookies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
