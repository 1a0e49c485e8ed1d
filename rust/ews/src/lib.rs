/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Types for building Exchange Web Services requests and parsing the
//! corresponding responses.
//!
//! Requests are serialized into a SOAP envelope with
//! [`soap::Envelope::as_xml_document`], and responses are parsed with
//! [`soap::Envelope::from_xml_document`]. Sending them over the network is left
//! to the consumer.

use thiserror::Error;

mod types;

pub use types::*;

#[cfg(test)]
mod test_utils;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize structure as XML")]
    Serialize(#[from] quick_xml::SeError),

    #[error("failed to deserialize structure from XML")]
    Deserialize(#[from] serde_path_to_error::Error<quick_xml::DeError>),

    #[error("error manipulating XML data")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write XML document")]
    Io(#[from] std::io::Error),

    #[error("the request resulted in a SOAP fault: {}", .0.faultstring)]
    RequestFault(Box<soap::Fault>),

    #[error("unknown Exchange Server version identifier: {0}")]
    UnknownServerVersion(String),

    #[error("unknown contact field path: {0}")]
    UnknownFieldPath(String),
}
