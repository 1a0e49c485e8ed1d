/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::{de::DeserializeOwned, Serialize};

use crate::ResponseClass;

/// A marker trait for EWS operations.
///
/// Types implementing this trait may appear in requests to EWS as the
/// operation to be performed. They are usually declared with the
/// `#[operation_response(..)]` attribute, which also generates the matching
/// response type.
pub trait Operation: Serialize + std::fmt::Debug {
    /// The structure returned by EWS in response to requests containing this
    /// operation.
    type Response: OperationResponse;

    /// The name of the operation's element in the SOAP body.
    const NAME: &'static str;
}

/// A marker trait for EWS operation responses.
///
/// Types implementing this trait may appear in responses from EWS after
/// requesting an operation be performed.
pub trait OperationResponse: DeserializeOwned + std::fmt::Debug {
    /// The type of the individual response messages.
    type Message;

    /// The name of the response's element in the SOAP body.
    const NAME: &'static str;

    /// Gets a reference to the response messages contained in this response.
    fn response_messages(&self) -> &[ResponseClass<Self::Message>];

    /// Takes ownership of the response messages contained in this response.
    fn into_response_messages(self) -> Vec<ResponseClass<Self::Message>>;
}
