/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};

use crate::{Request, Response, Result, StatusCode, Transport};

/// A single request/response pair as stored in a recording file.
///
/// Recording files hold a JSON array of exchanges, in the order the requests
/// were made.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exchange {
    /// The EWS operation the request was for.
    pub operation: String,

    /// The HTTP status of the response.
    pub status: u16,

    /// The response body.
    pub body: String,
}

impl Exchange {
    pub fn new(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Exchange {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    pub fn to_response(&self) -> Response {
        Response::new(StatusCode(self.status), self.body.as_bytes())
    }
}

/// Reads the exchanges stored in a recording file.
pub fn read_recording(path: impl AsRef<Path>) -> Result<Vec<Exchange>> {
    let content = fs::read(path)?;
    Ok(serde_json::from_slice(&content)?)
}

/// A [`Transport`] wrapping another transport and saving every exchange it
/// makes to a recording file.
///
/// The file is rewritten after each exchange, so that a recording is usable
/// even if the process stops halfway through.
pub struct RecordingTransport<T> {
    inner: T,
    path: PathBuf,
    exchanges: Mutex<Vec<Exchange>>,
}

impl<T> RecordingTransport<T> {
    pub fn new(inner: T, path: impl Into<PathBuf>) -> Self {
        RecordingTransport {
            inner,
            path: path.into(),
            exchanges: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, exchange: Exchange) -> Result<()> {
        // A poisoned lock only means another request panicked while holding
        // it; the list itself is still consistent.
        let mut exchanges = self
            .exchanges
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        exchanges.push(exchange);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_vec_pretty(&*exchanges)?;
        fs::write(&self.path, content)?;

        log::debug!(
            "recorded {} exchange(s) to {}",
            exchanges.len(),
            self.path.display()
        );

        Ok(())
    }
}

impl<T> Transport for RecordingTransport<T>
where
    T: Transport,
{
    async fn send(&self, request: Request<'_>) -> Result<Response> {
        let operation = request.operation.to_owned();
        let response = self.inner.send(request).await?;

        self.record(Exchange::new(
            operation,
            response.status().as_u16(),
            String::from_utf8_lossy(response.body()),
        ))?;

        Ok(response)
    }
}
