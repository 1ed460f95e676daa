// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end handshake and dispatcher tests against a local mock server.
//!
//! The blocking client must not be built or dropped on an async worker, so
//! every call runs inside `spawn_blocking`.

use console_session::{Error, HttpClient, Session, SessionConfig};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

async fn mount_handshake(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/openam/UI/Login"))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "Set-Cookie",
            "AMAuthCookie=tok1;Path=/|amlbcookie=lb1;Path=/|JSESSIONID=sess1;Path=/openam",
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/openam/UI/Login"))
        .and(header("Cookie", "JSESSIONID=sess1; amlbCookie=lb1; AMAuthCookie=tok1"))
        .and(body_string_contains("IDToken1=tester"))
        .and(body_string_contains("IDToken2=secret"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/openam/console")
                .insert_header(
                    "Set-Cookie",
                    "iPlanetDirectoryPro=dir1;Path=/|AMAuthCookie=tok2;Path=/",
                ),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/console"))
        .and(header("Cookie", "amlbCookie=lb1; iPlanetDirectoryPro=dir1"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Set-Cookie", "JSESSIONID=console1;Path=/console"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> SessionConfig {
    SessionConfig::new(
        format!("{}/openam/UI/Login", server.uri()),
        format!("{}/console", server.uri()),
    )
    .credentials("tester", "secret")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_handshake_collects_session_cookies() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;

    // The POST redirect must be returned, not followed
    Mock::given(method("GET"))
        .and(path("/openam/console"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server);
    let cookies = blocking(move || {
        let session = Session::connect(config).unwrap();
        session.login().unwrap();
        session.cookies()
    })
    .await;

    assert!(cookies.is_authenticated());
    assert_eq!(cookies.amlb.as_deref(), Some("lb1"));
    assert_eq!(cookies.am_auth.as_deref(), Some("tok2"));
    assert_eq!(cookies.openam_jsessionid.as_deref(), Some("sess1"));
    assert_eq!(cookies.iplanet_directory_pro.as_deref(), Some("dir1"));
    assert_eq!(cookies.console_jsessionid.as_deref(), Some("console1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_authenticated_get_sends_query_and_cookie() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;

    Mock::given(method("GET"))
        .and(path("/console/api/models"))
        .and(query_param("page", "1"))
        .and(header(
            "Cookie",
            "amlbCookie=lb1; iPlanetDirectoryPro=dir1; JSESSIONID=console1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"models":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server).login_on_connect(true);
    let (status, body, page) = blocking(move || {
        let session = Session::connect(config).unwrap();
        let response = session.get("/api/models", Some("page=1")).unwrap();
        (
            response.status(),
            response.body().to_string(),
            response.parameter("page").map(str::to_string),
        )
    })
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, r#"{"models":[]}"#);
    assert_eq!(page.as_deref(), Some("1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_page_failure_aborts_handshake() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openam/UI/Login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(302))
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server);
    let (err, authenticated) = blocking(move || {
        let session = Session::connect(config).unwrap();
        let err = session.login().unwrap_err();
        (err, session.is_authenticated())
    })
    .await;

    assert!(err.is_authentication());
    assert_eq!(err.status_code(), Some(500));
    assert!(!authenticated);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_and_delete_send_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/models/7"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains(r#""name":"m7""#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/models/7"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/api/models/7", server.uri());
    let (put, delete) = blocking(move || {
        let client = HttpClient::new().unwrap();
        let put = client.put(&url, r#"{"name":"m7"}"#, None).unwrap();
        let delete = client.delete(&url, None).unwrap();
        (put.status(), delete.status())
    })
    .await;

    assert_eq!(put, 200);
    assert_eq!(delete, 204);
}

#[test]
fn test_unreachable_host_is_a_transport_error() {
    let client = HttpClient::new().unwrap();
    // Port 9 (discard) on loopback is closed on test hosts
    let err = client.get("http://127.0.0.1:9/", None, None).unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn test_malformed_url_fails_before_sending() {
    let client = HttpClient::new().unwrap();
    let err = client
        .get("http://x.test/a?b=1?c=2", None, None)
        .unwrap_err();
    assert!(err.is_malformed_input());
}
