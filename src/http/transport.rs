// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the call dispatcher and the network

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;

use super::client::HttpClientConfig;
use super::request::Method;
use crate::error::{Error, Result};

/// A fully prepared call handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct OutgoingCall<'a> {
    pub method: Method,
    pub url: &'a str,
    pub headers: &'a HashMap<String, String>,
    pub body: Option<&'a str>,
    pub follow_redirects: bool,
}

/// What came back over the wire, before it is paired with its request
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    /// One entry per header line, in arrival order
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Sends one call and blocks until the response is fully read.
///
/// Implementations must not retry.
pub trait Transport: Send + Sync {
    fn execute(&self, call: &OutgoingCall<'_>) -> Result<RawResponse>;
}

/// Blocking reqwest transport
///
/// The TLS trust policy is fixed when the transport is built and applies to
/// this transport only.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    no_redirect_client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: Self::build(config, Policy::limited(config.max_redirects))?,
            no_redirect_client: Self::build(config, Policy::none())?,
        })
    }

    fn build(config: &HttpClientConfig, redirect: Policy) -> Result<Client> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::config(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::config(format!("Invalid header value for '{}': {}", name, e)))?;
            default_headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .redirect(redirect)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(default_headers)
            .cookie_store(false);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(builder.build()?)
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, call: &OutgoingCall<'_>) -> Result<RawResponse> {
        let client = if call.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let mut builder = client.request(call.method.into(), call.url);
        for (name, value) in call.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = call.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text()?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Transport that replays queued responses and records every call
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: parking_lot::Mutex<std::collections::VecDeque<RawResponse>>,
    calls: parking_lot::Mutex<Vec<RecordedCall>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub follow_redirects: bool,
}

#[cfg(test)]
impl ScriptedTransport {
    pub(crate) fn new(replies: Vec<RawResponse>) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            replies: parking_lot::Mutex::new(replies.into()),
            calls: parking_lot::Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[cfg(test)]
impl Transport for ScriptedTransport {
    fn execute(&self, call: &OutgoingCall<'_>) -> Result<RawResponse> {
        self.calls.lock().push(RecordedCall {
            method: call.method,
            url: call.url.to_string(),
            headers: call.headers.clone(),
            body: call.body.map(str::to_string),
            follow_redirects: call.follow_redirects,
        });
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| Error::transport("no scripted reply left"))
    }
}

/// Scripted reply carrying one `Set-Cookie` line per entry
#[cfg(test)]
pub(crate) fn reply(status: u16, set_cookies: &[&str]) -> RawResponse {
    RawResponse {
        status,
        headers: set_cookies
            .iter()
            .map(|c| ("set-cookie".to_string(), c.to_string()))
            .collect(),
        body: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(&HttpClientConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_default_header_is_config_error() {
        let mut config = HttpClientConfig::default();
        config
            .default_headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            ReqwestTransport::new(&config).unwrap_err(),
            Error::Config(_)
        ));
    }
}
