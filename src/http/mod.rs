// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for console sessions
//!
//! Structured request/response models, a synchronous call dispatcher and
//! the transport seam it sends through.

mod client;
mod cookie;
mod request;
mod response;
mod transport;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::{cookie_header, split_set_cookie, Cookie};
pub use request::{split_url, url_decode, Method, Protocol, Request};
pub use response::Response;
pub use transport::{OutgoingCall, RawResponse, ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::{reply, ScriptedTransport};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("console-session/", env!("CARGO_PKG_VERSION"));

/// Delimiter between entries of a folded `Set-Cookie` header value
pub const COOKIE_SEPARATOR: char = '|';

/// Common HTTP headers
pub mod headers {
    pub const CHARSET: &str = "charset";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const COOKIE: &str = "Cookie";
    pub const SET_COOKIE: &str = "Set-Cookie";
}
