/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod check_connectivity;
mod create_items;
mod delete_items;
mod find_items;
mod folders;
mod get_items;
mod update_items;

#[cfg(test)]
pub(crate) mod mock;

use std::{
    env,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use ews::{
    response::{ResponseClass, ResponseError},
    server_version::{ExchangeServerVersion, ServerVersionInfo},
    soap, MessageXml, Operation, OperationResponse,
};
use ews_http::{Request, Response, StatusCode, Transport};
use uuid::Uuid;

use crate::{authentication::credentials::Credentials, config::ClientOptions, EwsClientError};

pub(crate) const EWS_ROOT_FOLDER: &str = "msgfolderroot";

// The environment variable that controls whether to include request/response
// payloads when logging. We only check for the variable's presence, not any
// specific value.
const LOG_NETWORK_PAYLOADS_ENV_VAR: &str = "EWS_LOG_NETWORK_PAYLOADS";

const DEFAULT_MAX_THROTTLE_RETRIES: u32 = 5;

/// A client for a single EWS endpoint and account.
pub struct EwsClient<T> {
    transport: T,
    credentials: Credentials,
    server_version: Mutex<ExchangeServerVersion>,
    impersonation: Option<String>,
    max_throttle_retries: u32,
}

impl<T> EwsClient<T>
where
    T: Transport,
{
    pub fn new(transport: T, credentials: Credentials) -> Self {
        EwsClient {
            transport,
            credentials,
            server_version: Mutex::new(ExchangeServerVersion::default()),
            impersonation: None,
            max_throttle_retries: DEFAULT_MAX_THROTTLE_RETRIES,
        }
    }

    pub fn with_options(transport: T, credentials: Credentials, options: &ClientOptions) -> Self {
        EwsClient {
            transport,
            credentials,
            server_version: Mutex::new(options.version),
            impersonation: options.impersonation.clone(),
            max_throttle_retries: options.max_throttle_retries,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The schema version sent with requests.
    ///
    /// Starts at the configured version and follows the version reported by
    /// the server once one is known.
    pub fn server_version(&self) -> ExchangeServerVersion {
        *self
            .server_version
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_server_version(&self, version: ExchangeServerVersion) {
        *self
            .server_version
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = version;
    }

    /// Sets the SMTP address of the mailbox to act on behalf of.
    pub fn set_impersonation(&mut self, primary_smtp_address: Option<String>) {
        self.impersonation = primary_smtp_address;
    }

    pub fn set_max_throttle_retries(&mut self, retries: u32) {
        self.max_throttle_retries = retries;
    }

    /// Makes a request to the EWS server for the given operation.
    ///
    /// Throttled requests are retried after the delay advertised by the
    /// server, up to the configured number of retries.
    pub async fn make_operation_request<Op>(&self, op: Op) -> Result<Op::Response, EwsClientError>
    where
        Op: Operation,
    {
        let op_name = Op::NAME;

        let mut headers = vec![soap::Header::RequestServerVersion {
            version: self.server_version(),
        }];
        if let Some(primary_smtp_address) = &self.impersonation {
            headers.push(soap::Header::ExchangeImpersonation {
                primary_smtp_address: primary_smtp_address.clone(),
            });
        }

        let envelope = soap::Envelope { headers, body: op };
        let request_body = envelope.as_xml_document()?;

        let mut retries = 0;

        // Loop in case we need to retry the request after a delay.
        loop {
            let response = self
                .send_authenticated_request(&request_body, op_name)
                .await?;

            // Don't immediately propagate in case the error represents a
            // throttled request, which we can address with retry. SOAP faults
            // come with a 500 status, so the body is parsed before the status
            // is looked at.
            let op_result: Result<soap::Envelope<Op::Response>, _> =
                soap::Envelope::from_xml_document(response.body());

            let delay_ms = match op_result {
                Ok(envelope) => {
                    // If the server responded with a version identifier, store
                    // it so we can use it later.
                    if let Some(info) = envelope.server_version_info() {
                        self.update_server_version(info);
                    }

                    // Check if the first response is a back off message, and
                    // retry if so.
                    match server_busy_delay(envelope.body.response_messages()) {
                        Some(delay_ms) if retries < self.max_throttle_retries => delay_ms,
                        Some(_) => {
                            log::warn!("{op_name} still throttled after {retries} retries");
                            return Ok(envelope.body);
                        }
                        None => return Ok(envelope.body),
                    }
                }
                Err(err) => match maybe_get_backoff_delay_ms(&err) {
                    Some(delay_ms) if retries < self.max_throttle_retries => delay_ms,
                    backoff => {
                        if backoff.is_some() {
                            log::warn!("{op_name} still throttled after {retries} retries");
                        }

                        return Err(response_error(response, err));
                    }
                },
            };

            log::debug!(
                "{op_name} request throttled, will retry after {delay_ms} milliseconds"
            );
            tokio::time::sleep(Duration::from_millis(u64::from(delay_ms))).await;
            retries += 1;
        }
    }

    /// Send an authenticated EWS operation request with the given body.
    async fn send_authenticated_request(
        &self,
        request_body: &[u8],
        op_name: &str,
    ) -> Result<Response, EwsClientError> {
        // Generate random id for logging purposes.
        let request_id = Uuid::new_v4();
        log::info!("Making operation request {request_id}: {op_name}");

        if env::var(LOG_NETWORK_PAYLOADS_ENV_VAR).is_ok() {
            // Also log the request body if requested.
            log::info!("C: {}", String::from_utf8_lossy(request_body));
        }

        let mut request = Request::new(op_name, request_body);
        if let Some(auth_header_value) = self.credentials.to_auth_header_value() {
            request = request.header("Authorization", auth_header_value);
        }

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Request {request_id} FAILED: {err}");
                return Err(err.into());
            }
        };

        let response_status = response.status();
        log::info!(
            "Response received for request {request_id} (status {response_status}): {op_name}"
        );

        if env::var(LOG_NETWORK_PAYLOADS_ENV_VAR).is_ok() {
            // Also log the response body if requested.
            log::info!("S: {}", String::from_utf8_lossy(response.body()));
        }

        // Catch authentication errors quickly so we can react to them
        // appropriately.
        if response_status == StatusCode::UNAUTHORIZED {
            Err(EwsClientError::Authentication)
        } else {
            Ok(response)
        }
    }

    fn update_server_version(&self, info: &ServerVersionInfo) {
        let Some(version) = info.server_version() else {
            log::debug!(
                "server reported an unknown schema version ({:?}), keeping the current one",
                info.version
            );
            return;
        };

        let mut current = self
            .server_version
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if *current != version {
            log::debug!("updating server version from {} to {version}", *current);
            *current = version;
        }
    }
}

/// Picks the error to report for a response which could not be parsed.
///
/// A SOAP fault is more informative than the HTTP status it came with, but a
/// 4xx/5xx response without a SOAP body is reported as an HTTP error.
fn response_error(response: Response, err: ews::Error) -> EwsClientError {
    if matches!(err, ews::Error::RequestFault(_)) {
        return err.into();
    }

    match response.error_from_status() {
        Ok(_) => err.into(),
        Err(http_err) => {
            if let ews_http::Error::StatusCode { status, .. } = &http_err {
                log::error!("Request FAILED with status {status}: {err}");
            }

            http_err.into()
        }
    }
}

/// Gets the time to wait before retrying a throttled request, if any.
///
/// When an Exchange server throttles a request, the response will specify a
/// delay which should be observed before the request is retried.
fn maybe_get_backoff_delay_ms(err: &ews::Error) -> Option<u32> {
    if let ews::Error::RequestFault(fault) = err {
        // We successfully sent a request, but it was rejected for some reason.
        // Whatever the reason, retry if we're provided with a backoff delay.
        fault.back_off_milliseconds()
    } else {
        None
    }
}

/// Gets the delay advertised by a back off message, if the first response
/// message is one.
fn server_busy_delay<T>(response_messages: &[ResponseClass<T>]) -> Option<u32> {
    match response_messages.first() {
        Some(ResponseClass::Error(ResponseError {
            message_xml: Some(MessageXml::ServerBusy(server_busy)),
            ..
        })) => Some(server_busy.back_off_milliseconds),
        _ => None,
    }
}

/// Look at the response class of a response message, and do nothing, warn or
/// return an error accordingly.
pub(crate) fn process_response_message_class<T>(
    op_name: &str,
    response_class: ResponseClass<T>,
) -> Result<T, EwsClientError> {
    match response_class {
        ResponseClass::Success(message) => Ok(message),

        ResponseClass::Warning(message) => {
            log::warn!("{op_name} operation encountered unknown warning");
            Ok(message)
        }

        ResponseClass::Error(err) => {
            log::error!("{op_name} operation failed: {err}");
            Err(err.into())
        }
    }
}

pub(crate) fn validate_response_message_count<T>(
    response_messages: &[ResponseClass<T>],
    expected_len: usize,
) -> Result<(), EwsClientError> {
    if response_messages.len() != expected_len {
        return Err(EwsClientError::UnexpectedResponseMessageCount {
            expected: expected_len,
            actual: response_messages.len(),
        });
    }

    Ok(())
}

/// For responses where we expect a single message, extract that message. Returns
/// [`EwsClientError::Processing`] if no messages are available, prints a warning but succesfully
/// returns the first message if more than one message is available.
pub(crate) fn single_response_or_error<T>(responses: Vec<T>) -> Result<T, EwsClientError> {
    let responses_len = responses.len();
    let Some(message) = responses.into_iter().next() else {
        return Err(EwsClientError::Processing {
            message: "expected 1 response message, got none".to_string(),
        });
    };
    if responses_len != 1 {
        log::warn!("expected 1 response message, got {responses_len}");
    }
    Ok(message)
}

/// Convert the response into a vector of its message type, or return the first error
/// encountered. Warnings are logged but otherwise considered successes.
pub(crate) fn response_into_messages<OpResponse: OperationResponse>(
    response: OpResponse,
) -> Result<Vec<OpResponse::Message>, ResponseError> {
    response
        .into_response_messages()
        .into_iter()
        .map(|response_class| match response_class {
            ResponseClass::Success(message) => Ok(message),
            ResponseClass::Error(err) => Err(err),
            ResponseClass::Warning(message) => {
                log::warn!("{} response contains a warning", OpResponse::NAME);
                Ok(message)
            }
        })
        .collect()
}
