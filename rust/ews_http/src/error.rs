/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

use crate::{Response, StatusCode};

/// An error that happened either when building a request, sending it, or
/// reading its response.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint could not be parsed as a URL.
    #[error("invalid endpoint URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The provided URL features a protocol scheme that is not supported (i.e.
    /// which is neither HTTP nor HTTPS).
    #[error("url scheme is not supported: {0}")]
    UnsupportedScheme(String),

    /// The request timed out.
    #[error("timed out")]
    TimedOut,

    /// A connection to the server could not be established.
    #[error("failed to connect to the server")]
    Connect(#[source] reqwest::Error),

    /// A redirect loop was detected and the request was aborted.
    #[error("redirect loop detected")]
    RedirectLoop,

    /// A network-related error that does not fit within any other
    /// network-related category.
    #[error("unexpected network error")]
    Network(#[source] reqwest::Error),

    /// The status of the response is either a client error or a server error
    /// (i.e. its status code is within the 400-599 range).
    #[error("HTTP error ({status})")]
    StatusCode {
        status: StatusCode,
        response: Response,
    },

    #[error("failed to access recording file")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize recording")]
    Json(#[from] serde_json::Error),

    /// A request was made after every recorded exchange was replayed.
    #[error("no recorded response left for {operation} request")]
    PlaybackExhausted { operation: String },

    /// The next recorded exchange is for a different operation than the one
    /// requested.
    #[error("recorded response is for {expected}, but a {actual} request was made")]
    PlaybackMismatch { expected: String, actual: String },
}

impl From<reqwest::Error> for Error {
    /// Converts a [`reqwest::Error`] into an [`enum@Error`], matching it
    /// against a more specific variant where possible.
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Error::TimedOut
        } else if value.is_redirect() {
            Error::RedirectLoop
        } else if value.is_connect() {
            Error::Connect(value)
        } else {
            Error::Network(value)
        }
    }
}

/// A result which error type is always an [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;
