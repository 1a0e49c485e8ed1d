/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// A serialized EWS request, ready to be sent.
#[derive(Clone, Debug)]
pub struct Request<'a> {
    /// The name of the EWS operation, e.g. `FindItem`. Only used for logging
    /// and for matching recorded exchanges.
    pub operation: &'a str,

    /// The complete SOAP document.
    pub body: &'a [u8],

    /// Additional headers, e.g. `Authorization`.
    pub headers: Vec<(String, String)>,
}

impl<'a> Request<'a> {
    pub fn new(operation: &'a str, body: &'a [u8]) -> Self {
        Request {
            operation,
            body,
            headers: Vec::new(),
        }
    }

    /// Adds a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
