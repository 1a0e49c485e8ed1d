/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{response::ResponseError, ItemId};
use thiserror::Error;

/// Error types for EWS operations.
#[derive(Debug, Error)]
pub enum EwsClientError {
    #[error("an error occurred during HTTP transport")]
    Http(#[from] ews_http::Error),

    #[error("an error occurred while (de)serializing EWS traffic")]
    Ews(#[from] ews::Error),

    #[error("an error occurred while (de)serializing JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),

    #[error("request resulted in an error: {0:?}")]
    ResponseError(#[from] ResponseError),

    /// Some items of a batch were created before another one failed. `created`
    /// holds the ids of the new items, in request order.
    #[error("{} item(s) were created before the request failed: {source:?}", .created.len())]
    PartiallyCreated {
        created: Vec<ItemId>,
        source: ResponseError,
    },

    #[error("error in processing response: {message}")]
    Processing { message: String },

    #[error("missing item or folder ID in response from Exchange")]
    MissingIdInResponse,

    #[error(
        "response contained an unexpected number of response messages: expected {expected}, got {actual}"
    )]
    UnexpectedResponseMessageCount { expected: usize, actual: usize },

    #[error("failed to authenticate")]
    Authentication,

    #[error("invalid EWS endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid client configuration: {0}")]
    Configuration(String),

    #[error("invalid contact field path: {0}")]
    InvalidFieldPath(String),
}
