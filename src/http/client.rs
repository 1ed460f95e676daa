// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP call dispatcher

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use super::request::{Method, Request};
use super::response::Response;
use super::transport::{OutgoingCall, RawResponse, ReqwestTransport, Transport};
use super::{headers, COOKIE_SEPARATOR, DEFAULT_USER_AGENT};
use crate::error::Result;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-call timeout; `None` blocks until the transport returns
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed by GET, PUT and DELETE
    pub max_redirects: usize,
    /// Accept any certificate and hostname (dangerous outside test rigs!)
    pub accept_invalid_certs: bool,
    /// Headers sent with every call
    pub default_headers: HashMap<String, String>,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            max_redirects: 10,
            accept_invalid_certs: true,
            default_headers: HashMap::new(),
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Config that validates certificates, for endpoints with real chains
    pub fn strict() -> Self {
        Self {
            accept_invalid_certs: false,
            ..Default::default()
        }
    }
}

/// Synchronous dispatcher for GET, POST, PUT and DELETE calls.
///
/// Each call builds its own [`Request`], hands it to the transport and pairs
/// the result with that request. Cloning is cheap and clones share the
/// transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(config: HttpClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET `url`, appending `query` verbatim after a `?`.
    ///
    /// The query must already be encoded.
    pub fn get(&self, url: &str, query: Option<&str>, cookie: Option<&str>) -> Result<Response> {
        let target = match query {
            Some(q) => format!("{}?{}", url, q),
            None => url.to_string(),
        };
        let headers = with_cookie(HashMap::new(), cookie);
        let request = Request::new(Method::Get, &target, headers)?;
        self.dispatch(request, &target, None, true)
    }

    /// POST a raw form body. Redirects are returned, not followed.
    pub fn post(&self, url: &str, body: &str, cookie: Option<&str>) -> Result<Response> {
        let mut headers = with_cookie(HashMap::new(), cookie);
        headers.insert(
            headers::CONTENT_TYPE.to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        headers.insert(headers::CHARSET.to_string(), "utf-8".to_string());
        headers.insert(headers::CONTENT_LENGTH.to_string(), body.len().to_string());

        let request = Request::with_body(url, headers, form_fields(body));
        self.dispatch(request, url, Some(body), false)
    }

    /// PUT a raw JSON body
    pub fn put(&self, url: &str, body: &str, cookie: Option<&str>) -> Result<Response> {
        let mut headers = with_cookie(HashMap::new(), cookie);
        headers.insert(
            headers::CONTENT_TYPE.to_string(),
            "application/json".to_string(),
        );

        let request = Request::new(Method::Put, url, headers)?;
        self.dispatch(request, url, Some(body), true)
    }

    /// DELETE `url`; no body is sent
    pub fn delete(&self, url: &str, cookie: Option<&str>) -> Result<Response> {
        let mut headers = with_cookie(HashMap::new(), cookie);
        headers.insert(
            headers::CONTENT_TYPE.to_string(),
            "application/json".to_string(),
        );

        let request = Request::new(Method::Delete, url, headers)?;
        self.dispatch(request, url, None, true)
    }

    fn dispatch(
        &self,
        request: Request,
        target: &str,
        body: Option<&str>,
        follow_redirects: bool,
    ) -> Result<Response> {
        Url::parse(target)?;
        tracing::info!(method = %request.method(), url = target, "Outgoing call");
        if let Some(body) = body {
            tracing::debug!(body, "Request body");
        }

        let call = OutgoingCall {
            method: request.method(),
            url: target,
            headers: request.headers(),
            body,
            follow_redirects,
        };
        let RawResponse {
            status,
            headers,
            body,
        } = self.transport.execute(&call)?;

        tracing::debug!(status, body = %body, "Raw response");
        Ok(Response::new(status, fold_headers(headers), body, Arc::new(request)))
    }
}

fn with_cookie(mut headers: HashMap<String, String>, cookie: Option<&str>) -> HashMap<String, String> {
    if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
        headers.insert(headers::COOKIE.to_string(), cookie.to_string());
    }
    headers
}

/// Body fields of a raw `a=1&b=2` form body
fn form_fields(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Fold repeated header lines into one entry per name.
///
/// `Set-Cookie` lines are joined with the cookie separator, all others with
/// `", "`.
fn fold_headers(lines: Vec<(String, String)>) -> HashMap<String, String> {
    let mut folded: HashMap<String, String> = HashMap::new();
    for (name, value) in lines {
        let existing = folded
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&name))
            .cloned();
        match existing.and_then(|k| folded.get_mut(&k)) {
            Some(current) => {
                if name.eq_ignore_ascii_case(headers::SET_COOKIE) {
                    current.push(COOKIE_SEPARATOR);
                } else {
                    current.push_str(", ");
                }
                current.push_str(&value);
            }
            None => {
                folded.insert(name, value);
            }
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::ScriptedTransport;

    fn client_with(replies: Vec<RawResponse>) -> (HttpClient, Arc<ScriptedTransport>) {
        let transport = ScriptedTransport::new(replies);
        let client = HttpClient::with_transport(HttpClientConfig::default(), transport.clone());
        (client, transport)
    }

    fn ok_reply() -> RawResponse {
        RawResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: "ok".to_string(),
        }
    }

    #[test]
    fn test_get_appends_query_and_cookie() {
        let (client, transport) = client_with(vec![ok_reply()]);
        let resp = client
            .get("http://x.test/path", Some("a=1&b=2"), Some("k=v"))
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.url, "http://x.test/path?a=1&b=2");
        assert_eq!(call.headers.get("Cookie").map(String::as_str), Some("k=v"));
        assert!(call.body.is_none());
        assert!(call.follow_redirects);

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.body(), "ok");
        assert_eq!(resp.header("Content-Type"), Some("text/plain"));
        assert_eq!(resp.base_url(), "http://x.test/path");
        assert_eq!(resp.parameter("b"), Some("2"));
        assert_eq!(resp.request_header("Cookie"), Some("k=v"));
    }

    #[test]
    fn test_empty_cookie_is_not_sent() {
        let (client, transport) = client_with(vec![ok_reply(), ok_reply()]);
        client.get("http://x.test/", None, Some("")).unwrap();
        client.delete("http://x.test/item", None).unwrap();

        for call in transport.calls() {
            assert!(!call.headers.contains_key("Cookie"));
        }
    }

    #[test]
    fn test_post_headers_and_body() {
        let (client, transport) = client_with(vec![RawResponse {
            status: 302,
            ..Default::default()
        }]);
        let body = "IDToken1=user&goto=&gx_charset=UTF-8";
        let resp = client.post("https://x.test/login", body, None).unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.body.as_deref(), Some(body));
        assert!(!call.follow_redirects);
        assert_eq!(call.headers.get("charset").map(String::as_str), Some("utf-8"));
        assert_eq!(
            call.headers.get("Content-Length").cloned(),
            Some(body.len().to_string())
        );
        assert_ne!(
            call.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        assert!(resp.is_redirect());
        assert_eq!(resp.parameter("IDToken1"), Some("user"));
        assert_eq!(resp.parameter("goto"), Some(""));
    }

    #[test]
    fn test_put_and_delete_are_json() {
        let (client, transport) = client_with(vec![ok_reply(), ok_reply()]);
        client
            .put("http://x.test/item/1", r#"{"name":"a"}"#, Some("s=1"))
            .unwrap();
        client.delete("http://x.test/item/1", Some("s=1")).unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].method, Method::Put);
        assert_eq!(calls[0].body.as_deref(), Some(r#"{"name":"a"}"#));
        assert_eq!(calls[1].method, Method::Delete);
        assert!(calls[1].body.is_none());
        for call in &calls {
            assert_eq!(
                call.headers.get("Content-Type").map(String::as_str),
                Some("application/json")
            );
            assert_eq!(call.headers.get("Cookie").map(String::as_str), Some("s=1"));
        }
    }

    #[test]
    fn test_malformed_url_never_reaches_transport() {
        let (client, transport) = client_with(vec![ok_reply()]);

        let err = client.get("http://x.test/p", Some("flag"), None).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl { .. }));

        let err = client.put("not a url", "{}", None).unwrap_err();
        assert!(matches!(err, Error::Url(_)));

        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_transport_failure_propagates() {
        let (client, _transport) = client_with(Vec::new());
        let err = client.get("http://x.test/", None, None).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_fold_headers() {
        let folded = fold_headers(vec![
            ("set-cookie".to_string(), "a=1; Path=/".to_string()),
            ("Set-Cookie".to_string(), "b=2; Path=/".to_string()),
            ("vary".to_string(), "accept".to_string()),
            ("vary".to_string(), "origin".to_string()),
        ]);

        assert_eq!(folded.len(), 2);
        assert_eq!(folded["set-cookie"], "a=1; Path=/|b=2; Path=/");
        assert_eq!(folded["vary"], "accept, origin");
    }

    #[test]
    fn test_default_config_trusts_all() {
        assert!(HttpClientConfig::default().accept_invalid_certs);
        assert!(!HttpClientConfig::strict().accept_invalid_certs);
    }
}
