/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use base64::prelude::*;

/// The credentials to use when authenticating against a server.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// The username and password to use for Basic authentication.
    Basic { username: String, password: String },

    /// An OAuth2 access token, obtained out of band.
    Bearer(String),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Formats credentials to be used as the value of an HTTP Authorization
    /// header.
    ///
    /// Returns `None` if there is nothing to authenticate with, in which case
    /// the header should be omitted.
    pub fn to_auth_header_value(&self) -> Option<String> {
        match self {
            Self::Basic { username, password } => {
                if password.is_empty() {
                    None
                } else {
                    // Format credentials per the "Basic" authentication scheme. See
                    // https://datatracker.ietf.org/doc/html/rfc7617 for details.
                    let auth_string = BASE64_STANDARD.encode(format!("{username}:{password}"));

                    Some(format!("Basic {auth_string}"))
                }
            }
            Self::Bearer(token) if token.is_empty() => None,
            Self::Bearer(token) => Some(format!("Bearer {token}")),
        }
    }
}

// Keep secrets out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}
