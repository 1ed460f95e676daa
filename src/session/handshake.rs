// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Three-step login handshake
//!
//! 1. GET the login page without cookies. Expect `200` and exactly three
//!    cookies: auth token, load balancer and OpenAM session id.
//! 2. POST the login form with those cookies. Expect `302` and exactly two
//!    cookies: the directory session and a possibly refreshed auth token.
//! 3. GET the home page with the load balancer and directory cookies.
//!    Expect `200` and exactly one cookie: the console session id.
//!
//! Any other status or cookie count means the target's login flow changed,
//! and the handshake fails rather than continuing with partial credentials.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::config::Credentials;
use crate::error::{Error, Result};
use crate::http::{cookie_header, split_set_cookie, Cookie, HttpClient, Response};

/// Names the target application uses in `Set-Cookie`
pub mod names {
    pub const AM_AUTH: &str = "AMAuthCookie";
    pub const AMLB: &str = "amlbcookie";
    pub const JSESSIONID: &str = "JSESSIONID";
    pub const IPLANET_DIRECTORY_PRO: &str = "iPlanetDirectoryPro";

    /// The load balancer cookie is sent back under a different spelling
    pub const AMLB_OUTGOING: &str = "amlbCookie";
}

/// Cookie values collected across the handshake
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookies {
    pub am_auth: Option<String>,
    pub amlb: Option<String>,
    pub openam_jsessionid: Option<String>,
    pub iplanet_directory_pro: Option<String>,
    pub console_jsessionid: Option<String>,
}

impl SessionCookies {
    /// True once all three reusable cookies are present
    pub fn is_authenticated(&self) -> bool {
        self.amlb.is_some() && self.iplanet_directory_pro.is_some() && self.console_jsessionid.is_some()
    }

    /// `Cookie` header for calls made on behalf of the session
    pub fn cookie_header(&self) -> Option<String> {
        match (&self.amlb, &self.iplanet_directory_pro, &self.console_jsessionid) {
            (Some(amlb), Some(directory), Some(session)) => Some(cookie_header([
                (names::AMLB_OUTGOING, amlb.as_str()),
                (names::IPLANET_DIRECTORY_PRO, directory.as_str()),
                (names::JSESSIONID, session.as_str()),
            ])),
            _ => None,
        }
    }
}

/// Step 1 output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPageCookies {
    pub am_auth: String,
    pub amlb: String,
    pub openam_jsessionid: String,
}

impl LoginPageCookies {
    /// Cookie header for the credential POST
    pub fn cookie_header(&self) -> String {
        cookie_header([
            (names::JSESSIONID, self.openam_jsessionid.as_str()),
            (names::AMLB_OUTGOING, self.amlb.as_str()),
            (names::AM_AUTH, self.am_auth.as_str()),
        ])
    }
}

/// Step 2 output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCookies {
    pub iplanet_directory_pro: String,
    /// Present when the server refreshed the auth token
    pub am_auth: Option<String>,
}

/// URL-encoded login form body
pub fn login_form(credentials: &Credentials) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("IDToken1", &credentials.username)
        .append_pair("IDToken2", &credentials.password)
        .append_pair("IDButton", "Log In")
        .append_pair("goto", "")
        .append_pair("gotoOnFail", "")
        .append_pair("SunQueryParamsString", "")
        .append_pair("encoded", "false")
        .append_pair("gx_charset", "UTF-8")
        .finish()
}

/// Validate the login page response and pull out its three cookies
pub fn login_page_cookies(response: &Response) -> Result<LoginPageCookies> {
    const STEP: u8 = 1;
    expect_status(STEP, response, 200)?;

    let mut am_auth = None;
    let mut amlb = None;
    let mut openam_jsessionid = None;
    for cookie in expect_cookies(STEP, response, 3)? {
        if cookie.name.contains(names::AM_AUTH) {
            am_auth = Some(cookie.value);
        } else if cookie.name.contains(names::AMLB) {
            amlb = Some(cookie.value);
        } else if cookie.name.contains(names::JSESSIONID) {
            openam_jsessionid = Some(cookie.value);
        } else {
            tracing::warn!(step = STEP, name = %cookie.name, "Unexpected cookie");
        }
    }

    Ok(LoginPageCookies {
        am_auth: require(STEP, response, names::AM_AUTH, am_auth)?,
        amlb: require(STEP, response, names::AMLB, amlb)?,
        openam_jsessionid: require(STEP, response, names::JSESSIONID, openam_jsessionid)?,
    })
}

/// Validate the credential POST response and pull out its two cookies
pub fn credential_cookies(response: &Response) -> Result<CredentialCookies> {
    const STEP: u8 = 2;
    expect_status(STEP, response, 302)?;

    let mut directory = None;
    let mut am_auth = None;
    for cookie in expect_cookies(STEP, response, 2)? {
        if cookie.name.contains(names::IPLANET_DIRECTORY_PRO) {
            directory = Some(cookie.value);
        } else if cookie.name.contains(names::AM_AUTH) {
            am_auth = Some(cookie.value);
        } else {
            tracing::warn!(step = STEP, name = %cookie.name, "Unexpected cookie");
        }
    }

    Ok(CredentialCookies {
        iplanet_directory_pro: require(STEP, response, names::IPLANET_DIRECTORY_PRO, directory)?,
        am_auth,
    })
}

/// Validate the home page response and pull out the console session id
pub fn home_page_cookie(response: &Response) -> Result<String> {
    const STEP: u8 = 3;
    expect_status(STEP, response, 200)?;

    let session = expect_cookies(STEP, response, 1)?
        .into_iter()
        .find(|c| c.name.contains(names::JSESSIONID))
        .map(|c| c.value);
    require(STEP, response, names::JSESSIONID, session)
}

/// Run all three steps and return the collected cookie set
pub fn run(
    http: &HttpClient,
    login_url: &str,
    home_url: &str,
    credentials: &Credentials,
) -> Result<SessionCookies> {
    let login_page = login_page_cookies(&http.get(login_url, None, None)?)?;
    tracing::debug!(amlb = %login_page.amlb, "Login page cookies extracted");

    let login = credential_cookies(&http.post(
        login_url,
        &login_form(credentials),
        Some(&login_page.cookie_header()),
    )?)?;
    tracing::debug!("Credential cookies extracted");

    let home_cookie = cookie_header([
        (names::AMLB_OUTGOING, login_page.amlb.as_str()),
        (names::IPLANET_DIRECTORY_PRO, login.iplanet_directory_pro.as_str()),
    ]);
    let console_jsessionid = home_page_cookie(&http.get(home_url, None, Some(&home_cookie))?)?;

    tracing::info!(home_url, "Login successful");
    Ok(SessionCookies {
        am_auth: login.am_auth.or(Some(login_page.am_auth)),
        amlb: Some(login_page.amlb),
        openam_jsessionid: Some(login_page.openam_jsessionid),
        iplanet_directory_pro: Some(login.iplanet_directory_pro),
        console_jsessionid: Some(console_jsessionid),
    })
}

fn expect_status(step: u8, response: &Response, expected: u16) -> Result<()> {
    if response.status() == expected {
        return Ok(());
    }
    Err(Error::auth_with_response(
        step,
        format!("expected status {}, got {}", expected, response.status()),
        response.base_url(),
        response.status(),
    ))
}

fn expect_cookies(step: u8, response: &Response, expected: usize) -> Result<Vec<Cookie>> {
    let entries = response.set_cookie().map(split_set_cookie).unwrap_or_default();
    if entries.len() != expected {
        return Err(Error::auth_with_response(
            step,
            format!("expected {} cookies, got {}", expected, entries.len()),
            response.base_url(),
            response.status(),
        ));
    }

    entries
        .into_iter()
        .map(|entry| {
            Cookie::parse(entry).ok_or_else(|| {
                Error::auth_with_response(
                    step,
                    format!("unparseable cookie '{}'", entry),
                    response.base_url(),
                    response.status(),
                )
            })
        })
        .collect()
}

fn require(step: u8, response: &Response, name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| {
        Error::auth_with_response(
            step,
            format!("missing {} cookie", name),
            response.base_url(),
            response.status(),
        )
    })
}
