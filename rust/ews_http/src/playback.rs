/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{collections::VecDeque, path::Path, sync::Mutex};

use crate::{read_recording, Error, Exchange, Request, Response, Result, Transport};

/// A [`Transport`] replaying previously recorded exchanges, in order, without
/// any network access.
#[derive(Debug)]
pub struct PlaybackTransport {
    exchanges: Mutex<VecDeque<Exchange>>,
}

impl PlaybackTransport {
    /// Loads the exchanges from a file written by a [`RecordingTransport`].
    ///
    /// [`RecordingTransport`]: crate::RecordingTransport
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let exchanges = read_recording(path)?;

        log::debug!(
            "loaded {} recorded exchange(s) from {}",
            exchanges.len(),
            path.display()
        );

        Ok(Self::from_exchanges(exchanges))
    }

    pub fn from_exchanges(exchanges: Vec<Exchange>) -> Self {
        PlaybackTransport {
            exchanges: Mutex::new(exchanges.into()),
        }
    }

    /// The number of exchanges not replayed yet.
    pub fn remaining(&self) -> usize {
        self.exchanges
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn next_response(&self, operation: &str) -> Result<Response> {
        let mut exchanges = self
            .exchanges
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let exchange = exchanges
            .front()
            .ok_or_else(|| Error::PlaybackExhausted {
                operation: operation.to_owned(),
            })?;

        if exchange.operation != operation {
            return Err(Error::PlaybackMismatch {
                expected: exchange.operation.clone(),
                actual: operation.to_owned(),
            });
        }

        let response = exchange.to_response();
        exchanges.pop_front();

        Ok(response)
    }
}

impl Transport for PlaybackTransport {
    async fn send(&self, request: Request<'_>) -> Result<Response> {
        let response = self.next_response(request.operation)?;
        log::debug!(
            "replaying {} response: HTTP {}",
            request.operation,
            response.status()
        );

        Ok(response)
    }
}
