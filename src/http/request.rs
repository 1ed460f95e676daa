// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request model and URL parsing
//!
//! A [`Request`] is built once, fully, from primitive inputs. For every method
//! except POST the input URL is decoded and split into a base URL and a query
//! parameter map at construction time; POST requests keep the URL verbatim and
//! carry the caller's body fields as their parameters.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// HTTP method of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Protocol derived from the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// `https` when the URL starts with `https:`, `http` otherwise
    pub fn of(base_url: &str) -> Self {
        if base_url.starts_with("https:") {
            Protocol::Https
        } else {
            Protocol::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    base_url: String,
    method: Method,
    protocol: Protocol,
    headers: HashMap<String, String>,
    parameters: HashMap<String, String>,
}

impl Request {
    /// Build a request from a combined URL and query string.
    ///
    /// POST requests never have their URL parsed: the URL is kept verbatim and
    /// the parameter map starts empty. Use [`Request::with_body`] to attach
    /// POST body fields.
    pub fn new(method: Method, url: &str, headers: HashMap<String, String>) -> Result<Self> {
        let (base_url, parameters) = match method {
            Method::Post => (url.to_string(), HashMap::new()),
            _ => split_url(url)?,
        };

        Ok(Self {
            protocol: Protocol::of(&base_url),
            base_url,
            method,
            headers,
            parameters,
        })
    }

    /// Build a POST request whose parameters are the body fields
    pub fn with_body(
        url: &str,
        headers: HashMap<String, String>,
        body: HashMap<String, String>,
    ) -> Self {
        Self {
            base_url: url.to_string(),
            method: Method::Post,
            protocol: Protocol::of(url),
            headers,
            parameters: body,
        }
    }

    /// Target URL without query string
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// All request headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value by exact key
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Query parameters, or body fields for POST
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Parameter value by key
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<_> = self.parameters.iter().collect();
        params.sort();
        writeln!(f, "{} {} {}", self.method, self.protocol, self.base_url)?;
        write!(f, "Parameters: {{")?;
        for (i, (k, v)) in params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        writeln!(f, "}}")
    }
}

/// Decode a URL and split it into base URL and query parameters.
///
/// More than one `?`, or a query pair without `=`, is a structural failure.
/// Empty pairs count as pairs without `=`, except trailing ones, which are
/// dropped. A pair with more than one `=` is ambiguous and is skipped with a
/// warning.
pub fn split_url(url: &str) -> Result<(String, HashMap<String, String>)> {
    let decoded = url_decode(url)?;

    let mut segments = decoded.split('?');
    let base_url = segments.next().unwrap_or_default().to_string();
    let query = segments.next();
    if segments.next().is_some() {
        return Err(Error::malformed_url(url, "more than one '?'"));
    }

    let mut parameters = HashMap::new();
    let Some(query) = query else {
        return Ok((base_url, parameters));
    };

    let mut pairs: Vec<&str> = query.split('&').collect();
    while pairs.last().is_some_and(|p| p.is_empty()) {
        pairs.pop();
    }

    for pair in pairs {
        let mut tokens = pair.split('=');
        let key = tokens.next().unwrap_or_default();
        let Some(value) = tokens.next() else {
            return Err(Error::malformed_url(
                url,
                format!("parameter '{}' does not contain '='", pair),
            ));
        };
        if tokens.next().is_some() {
            tracing::warn!(pair, url, "Multiple '=' in a single parameter pair, skipping");
            continue;
        }
        parameters.insert(key.to_string(), value.to_string());
    }

    Ok((base_url, parameters))
}

/// Decode `%XX` escapes and `+` as UTF-8 text.
///
/// Byte sequences that are not valid UTF-8 are replaced with U+FFFD.
pub fn url_decode(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| {
                        Error::malformed_url(s, format!("invalid escape at offset {}", i))
                    })?;
                out.push(hex);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}
