/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! An in-memory transport and canned responses for client tests.

use std::sync::Mutex;

use ews_http::{Exchange, PlaybackTransport, Request, Response, Transport};

/// A request as seen by [`MockTransport`].
#[derive(Clone, Debug)]
pub(crate) struct SentRequest {
    pub operation: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Replays canned exchanges in order and keeps a copy of every request.
pub(crate) struct MockTransport {
    responses: PlaybackTransport,
    requests: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    pub fn new(exchanges: Vec<Exchange>) -> Self {
        MockTransport {
            responses: PlaybackTransport::from_exchanges(exchanges),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request<'_>) -> ews_http::Result<Response> {
        self.requests.lock().unwrap().push(SentRequest {
            operation: request.operation.to_owned(),
            body: String::from_utf8_lossy(request.body).into_owned(),
            headers: request.headers.clone(),
        });

        self.responses.send(request).await
    }
}

pub(crate) const ROOT_FOLDER_MESSAGE: &str = r#"<m:GetFolderResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Folders><t:Folder><t:FolderId Id="AAMkRoot" ChangeKey="AQAAAA=="/></t:Folder></m:Folders></m:GetFolderResponseMessage>"#;

pub(crate) const SERVER_BUSY_MESSAGE: &str = r#"<m:GetFolderResponseMessage ResponseClass="Error"><m:MessageText>The server cannot service this request right now. Try again later.</m:MessageText><m:ResponseCode>ErrorServerBusy</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey><m:MessageXml><t:Value Name="BackOffMilliseconds">250</t:Value></m:MessageXml></m:GetFolderResponseMessage>"#;

pub(crate) const ITEM_NOT_FOUND_MESSAGE: &str = r#"<m:MessageText>The specified object was not found in the store., The process failed to get the correct properties.</m:MessageText><m:ResponseCode>ErrorItemNotFound</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey>"#;

/// Wraps the content of a SOAP body in a response envelope.
pub(crate) fn envelope(server_version: Option<&str>, body: &str) -> String {
    let header = server_version
        .map(|version| {
            format!(
                r#"<s:Header><h:ServerVersionInfo MajorVersion="15" MinorVersion="1" MajorBuildNumber="2507" MinorBuildNumber="57" Version="{version}" xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types"/></s:Header>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">{header}<s:Body>{body}</s:Body></s:Envelope>"#
    )
}

/// Builds the response envelope of an operation holding the given response
/// messages.
pub(crate) fn operation_response(operation: &str, messages: &str) -> String {
    envelope(
        None,
        &format!(
            r#"<m:{operation}Response xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages>{messages}</m:ResponseMessages></m:{operation}Response>"#
        ),
    )
}

pub(crate) fn get_folder_response(messages: &str) -> String {
    operation_response("GetFolder", messages)
}

pub(crate) fn get_folder_response_with_version(messages: &str, version: &str) -> String {
    envelope(
        Some(version),
        &format!(
            r#"<m:GetFolderResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages>{messages}</m:ResponseMessages></m:GetFolderResponse>"#
        ),
    )
}

/// Builds a SOAP fault envelope, optionally advertising a back-off delay.
pub(crate) fn fault_response(
    fault_code: &str,
    response_code: &str,
    back_off_milliseconds: Option<u32>,
) -> String {
    let message_xml = back_off_milliseconds
        .map(|delay| {
            format!(
                r#"<t:MessageXml xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><t:Value Name="BackOffMilliseconds">{delay}</t:Value></t:MessageXml>"#
            )
        })
        .unwrap_or_default();

    envelope(
        None,
        &format!(
            r#"<s:Fault><faultcode xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">{fault_code}</faultcode><faultstring xml:lang="en-US">The request failed.</faultstring><detail><e:ResponseCode xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">{response_code}</e:ResponseCode><e:Message xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">The request failed.</e:Message>{message_xml}</detail></s:Fault>"#
        ),
    )
}
