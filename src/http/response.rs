// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::collections::HashMap;
use std::sync::Arc;

use super::request::{Method, Protocol, Request};
use super::headers::SET_COOKIE;

/// Result of one completed call, paired with the request that produced it
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
    request: Arc<Request>,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: impl Into<String>,
        request: Arc<Request>,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            request,
        }
    }

    /// Get status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// All response headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get a header value, matching the name case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw `Set-Cookie` header value, entries joined by the cookie separator
    pub fn set_cookie(&self) -> Option<&str> {
        self.header(SET_COOKIE)
    }

    /// Raw body text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the response, keeping only the body
    pub fn into_body(self) -> String {
        self.body
    }

    /// The originating request
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn base_url(&self) -> &str {
        self.request.base_url()
    }

    pub fn method(&self) -> Method {
        self.request.method()
    }

    pub fn protocol(&self) -> Protocol {
        self.request.protocol()
    }

    pub fn request_headers(&self) -> &HashMap<String, String> {
        self.request.headers()
    }

    pub fn request_header(&self, key: &str) -> Option<&str> {
        self.request.header(key)
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        self.request.parameters()
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.request.parameter(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> Response {
        let request = Request::new(Method::Get, "https://x.test/home?tab=1", HashMap::new()).unwrap();
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body, Arc::new(request))
    }

    #[test]
    fn test_response_status() {
        let resp = response(200, &[], "");
        assert!(resp.is_success());
        assert!(!resp.is_redirect());
        assert!(response(302, &[], "").is_redirect());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let resp = response(200, &[("set-cookie", "a=1|b=2"), ("Location", "/next")], "");
        assert_eq!(resp.set_cookie(), Some("a=1|b=2"));
        assert_eq!(resp.header("Set-Cookie"), Some("a=1|b=2"));
        assert_eq!(resp.header("location"), Some("/next"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_request_projection() {
        let resp = response(200, &[], "Hello, World!");
        assert_eq!(resp.body(), "Hello, World!");
        assert_eq!(resp.base_url(), "https://x.test/home");
        assert_eq!(resp.method(), Method::Get);
        assert_eq!(resp.protocol(), Protocol::Https);
        assert_eq!(resp.parameter("tab"), Some("1"));
        assert!(resp.request_headers().is_empty());
        assert_eq!(resp.into_body(), "Hello, World!");
    }
}
