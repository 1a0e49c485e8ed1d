/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Client configuration.
//!
//! Options are plain serde structures, so they can be built in code or loaded
//! from JSON files such as:
//!
//! ```json
//! {
//!     "version": "Exchange2013",
//!     "timeoutSecs": 30,
//!     "httpPlayback": { "mode": "record", "recordFileName": "contacts.json" }
//! }
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use ews::server_version::ExchangeServerVersion;
use serde::{Deserialize, Serialize};

use crate::EwsClientError;

/// The environment variable overriding the HTTP playback mode.
pub const HTTP_PLAYBACK_ENV_VAR: &str = "EWS_HTTP_PLAYBACK";

const DEFAULT_RECORD_LOCATION: &str = "tests/recordings";
const DEFAULT_MAX_THROTTLE_RETRIES: u32 = 5;

/// Options controlling how a client talks to the server.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// The schema version to request until the server reports its own.
    pub version: ExchangeServerVersion,

    /// The SMTP address of a mailbox to act on behalf of.
    pub impersonation: Option<String>,

    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate validation. Only meant for test servers.
    pub accept_invalid_certs: bool,

    /// How many times a throttled request is retried before giving up.
    pub max_throttle_retries: u32,

    pub http_playback: PlaybackOptions,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            version: ExchangeServerVersion::default(),
            impersonation: None,
            timeout_secs: None,
            accept_invalid_certs: false,
            max_throttle_retries: DEFAULT_MAX_THROTTLE_RETRIES,
            http_playback: PlaybackOptions::default(),
        }
    }
}

impl ClientOptions {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EwsClientError> {
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Whether requests reach a live server, and whether exchanges are recorded
/// or replayed.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackOptions {
    pub mode: PlaybackMode,

    /// The name of the recording file, required unless `mode` is `live`.
    pub record_file_name: Option<String>,

    /// The directory holding recording files. Defaults to `tests/recordings`.
    pub record_location: Option<PathBuf>,
}

impl PlaybackOptions {
    /// The full path of the recording file, if a file name is set.
    pub fn recording_path(&self) -> Option<PathBuf> {
        let file_name = self.record_file_name.as_ref()?;
        let location = self
            .record_location
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORD_LOCATION));

        Some(location.join(file_name))
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Talk to the server without recording anything.
    #[default]
    Live,

    /// Talk to the server and save every exchange to the recording file.
    Record,

    /// Replay the recording file without any network access.
    Playback,
}

impl PlaybackMode {
    /// Reads the mode from [`HTTP_PLAYBACK_ENV_VAR`], if set to a known value.
    pub fn from_env() -> Option<PlaybackMode> {
        let value = env::var(HTTP_PLAYBACK_ENV_VAR).ok()?;

        match value.parse() {
            Ok(mode) => Some(mode),
            Err(err) => {
                log::warn!("ignoring {HTTP_PLAYBACK_ENV_VAR}: {err}");
                None
            }
        }
    }
}

impl FromStr for PlaybackMode {
    type Err = EwsClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(PlaybackMode::Live),
            "record" => Ok(PlaybackMode::Record),
            "playback" => Ok(PlaybackMode::Playback),
            _ => Err(EwsClientError::Configuration(format!(
                "unknown playback mode `{s}`"
            ))),
        }
    }
}

/// Server and account details, usually kept out of version control in an
/// `auth.json` file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    pub server: String,
    pub user: String,
    pub password: String,
}

impl Default for AuthConfig {
    /// Placeholder details, good enough for replaying recordings.
    fn default() -> Self {
        AuthConfig {
            server: "server".to_string(),
            user: "user".to_string(),
            password: "password".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EwsClientError> {
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// Loads the file at `path`, or falls back to [`AuthConfig::default`] if
    /// there is no such file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, EwsClientError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
