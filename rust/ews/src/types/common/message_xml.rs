/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Semi-structured data for diagnosing or responding to an EWS error.
///
/// The contents of this element are not documented. Data which is relevant for
/// reacting to an error programmatically gets its own variant, everything else
/// is kept as a flat list of name/value pairs.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/messagexml>
// Two shapes have been observed in the wild, and are never mixed:
// - `<t:Value Name="Foo">value</t:Value>`
// - `<t:Foo>value</t:Foo>`
// Both are only one level deep.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageXml {
    /// The server is throttling the client.
    ServerBusy(ServerBusy),

    /// Any other content.
    Other(Vec<MessageXmlElement>),
}

/// Data associated with a
/// [`ResponseCode::ErrorServerBusy`](crate::ResponseCode::ErrorServerBusy).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerBusy {
    /// The duration in milliseconds to wait before making additional requests.
    pub back_off_milliseconds: u32,
}

/// A single piece of [`MessageXml`] content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageXmlElement {
    /// The `Name` attribute of a `Value` element, or the tag name otherwise.
    pub name: String,
    pub value: String,
}

#[derive(Deserialize)]
struct NamedValue {
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "$text", default)]
    value: String,
}

// Any namespace declaration on the element is skipped as an unknown field.
#[derive(Deserialize)]
struct TaggedValue {
    #[serde(rename = "$text", default)]
    value: String,
}

struct MessageXmlVisitor;

impl<'de> Visitor<'de> for MessageXmlVisitor {
    type Value = MessageXml;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("non-recursive XML elements with a Name attribute or no attributes")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut elements = Vec::new();

        while let Some(key) = access.next_key::<String>()? {
            if key.starts_with('@') || key.starts_with("xmlns") {
                access.next_value::<IgnoredAny>()?;
                continue;
            }

            let element = if key == "Value" {
                let NamedValue { name, value } = access.next_value()?;
                MessageXmlElement { name, value }
            } else {
                let TaggedValue { value } = access.next_value()?;
                MessageXmlElement { name: key, value }
            };

            elements.push(element);
        }

        let back_off = elements
            .iter()
            .find(|element| element.name == "BackOffMilliseconds");

        if let Some(element) = back_off {
            let back_off_milliseconds = element.value.trim().parse().map_err(de::Error::custom)?;
            return Ok(MessageXml::ServerBusy(ServerBusy {
                back_off_milliseconds,
            }));
        }

        Ok(MessageXml::Other(elements))
    }
}

impl<'de> Deserialize<'de> for MessageXml {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MessageXmlVisitor)
    }
}
