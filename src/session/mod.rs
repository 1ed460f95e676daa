// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated sessions against the console under test

mod config;
pub mod handshake;
mod session;

pub use config::{Credentials, SessionConfig};
pub use handshake::SessionCookies;
pub use session::Session;
