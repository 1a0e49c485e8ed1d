/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! HTTP plumbing for sending EWS requests.
//!
//! Requests go through a [`Transport`]. [`HttpTransport`] talks to a live
//! server, [`RecordingTransport`] saves every exchange made through another
//! transport to disk, and [`PlaybackTransport`] replays such a recording
//! without any network access.

use std::future::Future;

mod client;
mod error;
mod playback;
mod recording;
mod request;
mod response;

pub use client::*;
pub use error::*;
pub use playback::*;
pub use recording::*;
pub use request::*;
pub use response::*;

/// A way of delivering a serialized EWS request and getting the server's
/// response back.
pub trait Transport: Send + Sync {
    /// Sends the request and waits for the full response.
    ///
    /// HTTP error statuses are not errors at this level: callers inspect the
    /// [`Response`] and decide, e.g. with [`Response::error_from_status`].
    fn send(&self, request: Request<'_>) -> impl Future<Output = Result<Response>> + Send;
}
