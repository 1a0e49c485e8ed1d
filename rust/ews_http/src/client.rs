/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{Error, Request, Response, Result, StatusCode, Transport};

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// A [`Transport`] sending requests to a live EWS endpoint over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint with default settings.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: &str) -> HttpTransportBuilder {
        HttpTransportBuilder {
            endpoint: endpoint.to_owned(),
            timeout: None,
            accept_invalid_certs: false,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request<'_>) -> Result<Response> {
        log::debug!(
            "POST {} ({} request, {} bytes)",
            self.endpoint,
            request.operation,
            request.body.len()
        );

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(request.body.to_vec());

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = StatusCode(response.status().as_u16());
        let body = response.bytes().await?;

        log::debug!("{} response: HTTP {status}", request.operation);

        Ok(Response::new(status, body.to_vec()))
    }
}

/// Configures and builds an [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl HttpTransportBuilder {
    /// Sets a timeout covering the whole of each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate validation. Only meant for test servers using
    /// self-signed certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let endpoint = Url::parse(&self.endpoint)?;

        match endpoint.scheme() {
            "http" | "https" => (),
            scheme => return Err(Error::UnsupportedScheme(scheme.to_string())),
        }

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if self.accept_invalid_certs {
            log::warn!("TLS certificate validation is disabled for {endpoint}");
        }

        Ok(HttpTransport {
            client: builder.build()?,
            endpoint,
        })
    }
}
