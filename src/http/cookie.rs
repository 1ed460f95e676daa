// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Set-Cookie splitting and Cookie header composition
//!
//! Responses fold every `Set-Cookie` line into one header value joined by
//! [`COOKIE_SEPARATOR`](super::COOKIE_SEPARATOR). The handshake splits that
//! value back into entries and matches them by name.

use super::COOKIE_SEPARATOR;

/// Name and value of a single `Set-Cookie` entry; attributes are ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    /// Parse one `Set-Cookie` entry such as `JSESSIONID=abc; Path=/; HttpOnly`.
    ///
    /// The value runs up to the first `;`, so `=` padding is kept.
    pub fn parse(entry: &str) -> Option<Self> {
        let pair = entry.split(';').next()?;
        let (name, value) = pair.trim().split_once('=')?;
        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Split a folded `Set-Cookie` value into its entries
pub fn split_set_cookie(header: &str) -> Vec<&str> {
    header
        .split(COOKIE_SEPARATOR)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

/// Compose a `Cookie` request header from name/value pairs
pub fn cookie_header<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}
