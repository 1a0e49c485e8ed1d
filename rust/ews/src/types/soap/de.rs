/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::marker::PhantomData;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::{server_version::ServerVersionInfo, OperationResponse};

use super::Fault;

/// A helper for deserialization of SOAP envelopes.
///
/// This struct is declared separately from the more general [`Envelope`] type
/// so that the latter can be used with types that are write-only.
///
/// [`Envelope`]: super::Envelope
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DeserializeEnvelope<T>
where
    T: OperationResponse,
{
    pub header: Option<ResponseHeader>,

    #[serde(deserialize_with = "deserialize_body")]
    pub body: EnvelopeContent<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ResponseHeader {
    pub server_version_info: Option<ServerVersionInfo>,
}

/// The content of a SOAP body: either the expected response, or a fault.
pub(super) enum EnvelopeContent<T> {
    Body(T),
    Fault(Fault),
}

fn deserialize_body<'de, D, T>(body: D) -> Result<EnvelopeContent<T>, D::Error>
where
    D: Deserializer<'de>,
    T: OperationResponse,
{
    body.deserialize_map(BodyVisitor::<T>(PhantomData))
}

/// A visitor for custom name-based deserialization of operation responses.
struct BodyVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for BodyVisitor<T>
where
    T: OperationResponse,
{
    type Value = EnvelopeContent<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("EWS operation response body")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut content = None;

        while let Some(name) = map.next_key::<String>()? {
            // Attributes, e.g. namespace declarations.
            if name.starts_with('@') {
                map.next_value::<IgnoredAny>()?;
                continue;
            }

            if content.is_some() {
                // The response body contained more than one element, which
                // violates our expectations.
                return Err(serde::de::Error::custom(format_args!(
                    "unexpected element `{name}`"
                )));
            }

            // We expect the body of the response to contain a single element
            // with the name of the expected operation response, or a fault.
            content = if name == "Fault" {
                Some(EnvelopeContent::Fault(map.next_value()?))
            } else if name == T::NAME {
                Some(EnvelopeContent::Body(map.next_value()?))
            } else {
                return Err(serde::de::Error::custom(format_args!(
                    "unknown element `{}`, expected {}",
                    name,
                    T::NAME
                )));
            };
        }

        content.ok_or_else(|| serde::de::Error::invalid_type(serde::de::Unexpected::Map, &self))
    }
}
