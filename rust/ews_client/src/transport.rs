/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_http::{
    HttpTransport, PlaybackTransport, RecordingTransport, Request, Response, Transport,
};
use url::Url;

use crate::{
    config::{ClientOptions, PlaybackMode},
    EwsClientError,
};

/// The transport selected by a client's playback options.
pub enum ClientTransport {
    Live(HttpTransport),
    Record(RecordingTransport<HttpTransport>),
    Playback(PlaybackTransport),
}

impl ClientTransport {
    pub fn from_options(endpoint: &Url, options: &ClientOptions) -> Result<Self, EwsClientError> {
        let playback = &options.http_playback;

        let transport = match playback.mode {
            PlaybackMode::Live => ClientTransport::Live(http_transport(endpoint, options)?),
            PlaybackMode::Record => {
                let path = playback.recording_path().ok_or_else(|| {
                    EwsClientError::Configuration(
                        "record mode requires a recording file name".to_string(),
                    )
                })?;

                log::info!("recording EWS traffic to {}", path.display());
                ClientTransport::Record(RecordingTransport::new(
                    http_transport(endpoint, options)?,
                    path,
                ))
            }
            PlaybackMode::Playback => {
                let path = playback.recording_path().ok_or_else(|| {
                    EwsClientError::Configuration(
                        "playback mode requires a recording file name".to_string(),
                    )
                })?;

                ClientTransport::Playback(PlaybackTransport::from_file(path)?)
            }
        };

        Ok(transport)
    }
}

fn http_transport(endpoint: &Url, options: &ClientOptions) -> Result<HttpTransport, EwsClientError> {
    let mut builder = HttpTransport::builder(endpoint.as_str())
        .accept_invalid_certs(options.accept_invalid_certs);

    if let Some(timeout) = options.timeout() {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

impl Transport for ClientTransport {
    async fn send(&self, request: Request<'_>) -> ews_http::Result<Response> {
        match self {
            ClientTransport::Live(transport) => transport.send(request).await,
            ClientTransport::Record(transport) => transport.send(request).await,
            ClientTransport::Playback(transport) => transport.send(request).await,
        }
    }
}

/// Builds the EWS endpoint for a server.
///
/// A bare host name, optionally with a port, is expanded to
/// `https://{server}/EWS/Exchange.asmx`. A full HTTP(S) URL is used as is.
pub fn endpoint_for_server(server: &str) -> Result<Url, EwsClientError> {
    let server = server.trim();
    let invalid = |reason: &str| EwsClientError::InvalidEndpoint(format!("{server:?}: {reason}"));

    if server.is_empty() {
        return Err(invalid("no server given"));
    }

    if server.contains("://") {
        // `Url` lowercases the scheme, so `HTTPS://` is accepted too.
        let endpoint = Url::parse(server).map_err(|err| invalid(&err.to_string()))?;

        return match endpoint.scheme() {
            "http" | "https" if endpoint.host_str().is_some() => Ok(endpoint),
            "http" | "https" => Err(invalid("no host in URL")),
            scheme => Err(invalid(&format!("unsupported scheme `{scheme}`"))),
        };
    }

    if server.contains('/') {
        return Err(invalid("expected a host name or a full URL"));
    }

    Url::parse(&format!("https://{server}/EWS/Exchange.asmx"))
        .map_err(|err| invalid(&err.to_string()))
}
