/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    Writer,
};
use serde::{Deserialize, Serialize};

use crate::{
    server_version::{ExchangeServerVersion, ServerVersionInfo},
    Error, MessageXml, Operation, OperationResponse, ResponseCode, MESSAGES_NS_URI, SOAP_NS_URI,
    TYPES_NS_URI,
};

mod de;
use self::de::{DeserializeEnvelope, EnvelopeContent};

/// An element that can be found in the `soap:Header` section of a request or a
/// response.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383497>
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Header {
    /// The schema version targeted by the attached request.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/requestserverversion>
    RequestServerVersion { version: ExchangeServerVersion },

    /// Act on behalf of another mailbox.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/exchangeimpersonation>
    ExchangeImpersonation { primary_smtp_address: String },

    /// The version information of the Exchange Server instance that generated
    /// the attached response.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/serverversioninfo>
    ServerVersionInfo(ServerVersionInfo),
}

#[derive(Serialize)]
struct RequestServerVersionElement {
    #[serde(rename = "@Version")]
    version: ExchangeServerVersion,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExchangeImpersonationElement<'a> {
    #[serde(rename = "ConnectingSID")]
    connecting_sid: ConnectingSid<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConnectingSid<'a> {
    primary_smtp_address: &'a str,
}

impl Header {
    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        match self {
            Header::RequestServerVersion { version } => writer.write_serializable(
                "RequestServerVersion",
                &RequestServerVersionElement { version: *version },
            )?,
            Header::ExchangeImpersonation {
                primary_smtp_address,
            } => writer.write_serializable(
                "ExchangeImpersonation",
                &ExchangeImpersonationElement {
                    connecting_sid: ConnectingSid {
                        primary_smtp_address,
                    },
                },
            )?,

            // Only ever sent by the server.
            Header::ServerVersionInfo(_) => (),
        }

        Ok(())
    }
}

/// A SOAP envelope containing the body of an EWS operation or response.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383494>
#[derive(Clone, Debug)]
pub struct Envelope<B> {
    pub headers: Vec<Header>,
    pub body: B,
}

impl<B> Envelope<B>
where
    B: Operation,
{
    /// Serializes the SOAP envelope as a complete XML document.
    pub fn as_xml_document(&self) -> Result<Vec<u8>, Error> {
        const SOAP_ENVELOPE: &str = "soap:Envelope";
        const SOAP_HEADER: &str = "soap:Header";
        const SOAP_BODY: &str = "soap:Body";

        let mut writer = Writer::new(Vec::new());

        // All EWS examples use XML 1.0 with UTF-8, so stick to that for now.
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        // Elements from the types namespace are written without a prefix.
        writer.write_event(Event::Start(BytesStart::new(SOAP_ENVELOPE).with_attributes([
            ("xmlns:soap", SOAP_NS_URI),
            ("xmlns", TYPES_NS_URI),
            ("xmlns:m", MESSAGES_NS_URI),
        ])))?;

        writer.write_event(Event::Start(BytesStart::new(SOAP_HEADER)))?;
        for header in &self.headers {
            header.write(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(SOAP_HEADER)))?;

        writer.write_event(Event::Start(BytesStart::new(SOAP_BODY)))?;
        writer.write_serializable(&format!("m:{}", B::NAME), &self.body)?;
        writer.write_event(Event::End(BytesEnd::new(SOAP_BODY)))?;

        writer.write_event(Event::End(BytesEnd::new(SOAP_ENVELOPE)))?;

        Ok(writer.into_inner())
    }
}

impl<B> Envelope<B>
where
    B: OperationResponse,
{
    /// Populates an [`Envelope`] from raw XML.
    pub fn from_xml_document(document: &[u8]) -> Result<Self, Error> {
        let de = &mut quick_xml::de::Deserializer::from_reader(document);

        // `serde_path_to_error` ensures that we get sufficient information to
        // debug errors in deserialization. serde's default errors only provide
        // the immediate error with no context; this gives us a description of
        // the context within the structure.
        let envelope: DeserializeEnvelope<B> = serde_path_to_error::deserialize(de)?;

        match envelope.body {
            EnvelopeContent::Body(body) => {
                let headers = envelope
                    .header
                    .and_then(|header| header.server_version_info)
                    .map(Header::ServerVersionInfo)
                    .into_iter()
                    .collect();

                Ok(Envelope { headers, body })
            }
            EnvelopeContent::Fault(fault) => Err(Error::RequestFault(Box::new(fault))),
        }
    }

    /// The server version information included in the response, if any.
    pub fn server_version_info(&self) -> Option<&ServerVersionInfo> {
        self.headers.iter().find_map(|header| match header {
            Header::ServerVersionInfo(info) => Some(info),
            _ => None,
        })
    }
}

/// A structured representation of a SOAP fault, indicating an error in an EWS
/// request.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383507>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Fault {
    /// An error code indicating the fault in the original request, e.g.
    /// `a:ErrorSchemaValidation`.
    pub faultcode: String,

    /// A human-readable description of the error.
    pub faultstring: String,

    /// A URI indicating the SOAP actor responsible for the error.
    pub faultactor: Option<String>,

    /// Clarifying information about EWS-specific errors.
    pub detail: Option<FaultDetail>,
}

impl Fault {
    /// The delay requested by the server before retrying, if the fault is due
    /// to throttling.
    pub fn back_off_milliseconds(&self) -> Option<u32> {
        match self.detail.as_ref()?.message_xml.as_ref()? {
            MessageXml::ServerBusy(server_busy) => Some(server_busy.back_off_milliseconds),
            _ => None,
        }
    }
}

/// EWS-specific details regarding a SOAP fault.
///
/// This element is not documented in the EWS reference.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FaultDetail {
    /// An error code indicating the nature of the issue.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsecode>
    pub response_code: Option<ResponseCode>,

    /// A human-readable description of the error.
    pub message: Option<String>,

    /// Error-specific information to aid in understanding or responding to the
    /// error.
    pub message_xml: Option<MessageXml>,
}
