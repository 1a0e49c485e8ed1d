/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{convert::Infallible, fmt, marker::PhantomData, str::FromStr};

use serde::{
    de::{
        self,
        value::{MapAccessDeserializer, StringDeserializer},
        DeserializeSeed, IgnoredAny, IntoDeserializer, MapAccess, Visitor,
    },
    Deserialize, Deserializer,
};

use crate::MessageXml;

/// A collection of response messages from an EWS operation, one for each
/// element of the request.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ResponseMessages<T> {
    #[serde(rename = "$value", default = "Vec::new")]
    pub response_messages: Vec<ResponseClass<T>>,
}

/// The outcome of an EWS operation for a single element of the request.
///
/// The `ResponseClass` attribute of the message determines the variant. On
/// success or warning, the rest of the message is parsed as `T`. On error, the
/// operation-specific content is discarded.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/finditemresponsemessage>
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseClass<T> {
    Success(T),

    // The message text and response code of a warning are dropped for now,
    // since no operation we support can produce one.
    Warning(T),

    Error(ResponseError),
}

impl<T> ResponseClass<T> {
    /// Gets the operation-specific content of the message, or the error if the
    /// operation failed for this element.
    pub fn into_result(self) -> Result<T, ResponseError> {
        match self {
            ResponseClass::Success(value) | ResponseClass::Warning(value) => Ok(value),
            ResponseClass::Error(err) => Err(err),
        }
    }
}

/// An error which prevented an EWS operation from being performed for a single
/// element of the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseError {
    /// A human-readable description of the error.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/messagetext>
    pub message_text: String,

    /// A code identifying the error.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsecode>
    pub response_code: ResponseCode,

    /// Structured data about the error, if any.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/messagexml>
    pub message_xml: Option<MessageXml>,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.response_code, self.message_text)
    }
}

impl std::error::Error for ResponseError {}

#[derive(Clone, Copy, Deserialize)]
enum ResponseClassKind {
    Success,
    Warning,
    Error,
}

/// The fields every response message may carry regardless of its type.
#[derive(Default)]
struct CommonFields {
    message_text: Option<String>,
    response_code: Option<ResponseCode>,
    message_xml: Option<MessageXml>,
}

/// A [`MapAccess`] which captures the common response message fields and
/// forwards everything else to the operation-specific message type.
struct CommonFieldsMap<'a, A> {
    inner: A,
    fields: &'a mut CommonFields,
}

impl<'de, A> MapAccess<'de> for CommonFieldsMap<'_, A>
where
    A: MapAccess<'de>,
{
    type Error = A::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        while let Some(key) = self.inner.next_key::<String>()? {
            match key.as_str() {
                "MessageText" => self.fields.message_text = Some(self.inner.next_value()?),
                "ResponseCode" => self.fields.response_code = Some(self.inner.next_value()?),
                "MessageXml" => self.fields.message_xml = Some(self.inner.next_value()?),
                "DescriptiveLinkKey" => {
                    self.inner.next_value::<IgnoredAny>()?;
                }
                _ => {
                    let key: StringDeserializer<A::Error> = key.into_deserializer();
                    return seed.deserialize(key).map(Some);
                }
            }
        }

        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        self.inner.next_value_seed(seed)
    }
}

struct ResponseClassVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for ResponseClassVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = ResponseClass<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an EWS response message with a ResponseClass attribute")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Attributes always come before child elements.
        let mut kind = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "@ResponseClass" {
                kind = Some(map.next_value::<ResponseClassKind>()?);
                break;
            }

            map.next_value::<IgnoredAny>()?;
        }

        let kind = kind.ok_or_else(|| de::Error::missing_field("@ResponseClass"))?;

        let mut fields = CommonFields::default();
        let wrapped = CommonFieldsMap {
            inner: map,
            fields: &mut fields,
        };

        match kind {
            ResponseClassKind::Success => {
                T::deserialize(MapAccessDeserializer::new(wrapped)).map(ResponseClass::Success)
            }
            ResponseClassKind::Warning => {
                T::deserialize(MapAccessDeserializer::new(wrapped)).map(ResponseClass::Warning)
            }
            ResponseClassKind::Error => {
                IgnoredAny::deserialize(MapAccessDeserializer::new(wrapped))?;

                let response_code = fields
                    .response_code
                    .ok_or_else(|| de::Error::missing_field("ResponseCode"))?;

                Ok(ResponseClass::Error(ResponseError {
                    message_text: fields.message_text.unwrap_or_default(),
                    response_code,
                    message_xml: fields.message_xml,
                }))
            }
        }
    }
}

impl<'de, T> Deserialize<'de> for ResponseClass<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResponseClassVisitor(PhantomData))
    }
}

macro_rules! response_codes {
    ($($code:ident),+ $(,)?) => {
        /// A code identifying the outcome of an EWS operation.
        ///
        /// Only the codes this crate has a use for are listed; any other value
        /// is preserved in [`ResponseCode::Other`].
        ///
        /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsecode>
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ResponseCode {
            $($code,)+
            Other(String),
        }

        impl ResponseCode {
            pub fn as_str(&self) -> &str {
                match self {
                    $(ResponseCode::$code => stringify!($code),)+
                    ResponseCode::Other(code) => code.as_str(),
                }
            }
        }

        impl FromStr for ResponseCode {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code = match s {
                    $(stringify!($code) => ResponseCode::$code,)+
                    other => ResponseCode::Other(other.to_string()),
                };

                Ok(code)
            }
        }
    };
}

response_codes! {
    NoError,
    ErrorAccessDenied,
    ErrorChangeKeyRequiredForWriteOperations,
    ErrorExceededConnectionCount,
    ErrorFolderNotFound,
    ErrorInternalServerError,
    ErrorInvalidChangeKey,
    ErrorInvalidIdMalformed,
    ErrorInvalidPropertyRequest,
    ErrorInvalidPropertySet,
    ErrorInvalidRequest,
    ErrorIrresolvableConflict,
    ErrorItemNotFound,
    ErrorNonExistentMailbox,
    ErrorSchemaValidation,
    ErrorServerBusy,
    ErrorTimeoutExpired,
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResponseCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;

        Ok(code
            .trim()
            .parse()
            .unwrap_or_else(|never: Infallible| match never {}))
    }
}
