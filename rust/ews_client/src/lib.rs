/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! An asynchronous client for Exchange Web Services.
//!
//! [`EwsClient`] sends typed operations from the `ews` crate through an
//! [`ews_http::Transport`], handling authentication, throttling and server
//! version negotiation. [`ContactsApi`] builds on top of it to manage the
//! contacts stored in a single folder.

pub mod authentication;
mod client;
pub mod config;
pub mod contacts;
mod error;
pub mod transport;

pub use client::EwsClient;
pub use contacts::{ContactChanges, ContactsApi};
pub use error::EwsClientError;
