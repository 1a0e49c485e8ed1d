/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The Exchange Server version identifiers allowed in `RequestServerVersion`
/// headers.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/requestserverversion#version-attribute-values>
#[allow(non_camel_case_types)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum ExchangeServerVersion {
    Exchange2007,
    Exchange2007_SP1,
    #[default]
    Exchange2010,
    Exchange2010_SP1,
    Exchange2010_SP2,
    Exchange2013,
    Exchange2013_SP1,
    Exchange2016,
}

impl ExchangeServerVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeServerVersion::Exchange2007 => "Exchange2007",
            ExchangeServerVersion::Exchange2007_SP1 => "Exchange2007_SP1",
            ExchangeServerVersion::Exchange2010 => "Exchange2010",
            ExchangeServerVersion::Exchange2010_SP1 => "Exchange2010_SP1",
            ExchangeServerVersion::Exchange2010_SP2 => "Exchange2010_SP2",
            ExchangeServerVersion::Exchange2013 => "Exchange2013",
            ExchangeServerVersion::Exchange2013_SP1 => "Exchange2013_SP1",
            ExchangeServerVersion::Exchange2016 => "Exchange2016",
        }
    }
}

/// Parses the provided string into a known version identifier.
impl TryFrom<&str> for ExchangeServerVersion {
    /// If the provided string could not be turned into a known version
    /// identifier, [`Error::UnknownServerVersion`] is returned.
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Exchange2007" => Ok(ExchangeServerVersion::Exchange2007),
            "Exchange2007_SP1" => Ok(ExchangeServerVersion::Exchange2007_SP1),
            "Exchange2010" => Ok(ExchangeServerVersion::Exchange2010),
            "Exchange2010_SP1" => Ok(ExchangeServerVersion::Exchange2010_SP1),
            "Exchange2010_SP2" => Ok(ExchangeServerVersion::Exchange2010_SP2),
            "Exchange2013" => Ok(ExchangeServerVersion::Exchange2013),
            "Exchange2013_SP1" => Ok(ExchangeServerVersion::Exchange2013_SP1),
            "Exchange2016" => Ok(ExchangeServerVersion::Exchange2016),

            _ => Err(Error::UnknownServerVersion(value.to_owned())),
        }
    }
}

impl fmt::Display for ExchangeServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The version information of the Exchange Server instance that generated
/// the attached response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/serverversioninfo>
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServerVersionInfo {
    #[serde(rename = "@MajorVersion")]
    pub major_version: Option<String>,

    #[serde(rename = "@MinorVersion")]
    pub minor_version: Option<String>,

    #[serde(rename = "@MajorBuildNumber")]
    pub major_build_number: Option<String>,

    #[serde(rename = "@MinorBuildNumber")]
    pub minor_build_number: Option<String>,

    /// The schema version identifier, e.g. `Exchange2013_SP1`.
    ///
    /// Exchange Online reports internal identifiers such as `V2018_01_08`
    /// here, which do not map to any [`ExchangeServerVersion`].
    #[serde(rename = "@Version")]
    pub version: Option<String>,
}

impl ServerVersionInfo {
    /// The known schema version reported by the server, if any.
    pub fn server_version(&self) -> Option<ExchangeServerVersion> {
        self.version
            .as_deref()
            .and_then(|version| ExchangeServerVersion::try_from(version).ok())
    }
}
