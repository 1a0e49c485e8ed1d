/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{Deserialize, Serialize};

use crate::{Items, TargetFolderId};

/// A request to create (and optionally send) one or more Exchange items.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem>
#[derive(Clone, Debug, Serialize)]
#[operation_response(CreateItemResponseMessage)]
pub struct CreateItem {
    /// The action the Exchange server will take upon creating this item.
    ///
    /// This field is required for and only applicable to message items.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem#messagedisposition-attribute>
    #[serde(
        rename = "@MessageDisposition",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_disposition: Option<MessageDisposition>,

    /// Whether to send invitations when creating a calendar item.
    #[serde(
        rename = "@SendMeetingInvitations",
        skip_serializing_if = "Option::is_none"
    )]
    pub send_meeting_invitations: Option<SendMeetingInvitations>,

    /// The folder in which to store an item once it has been created.
    ///
    /// Defaults to the standard folder for the item's type.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/saveditemfolderid>
    #[serde(
        rename = "m:SavedItemFolderId",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_item_folder_id: Option<TargetFolderId>,

    /// The item or items to create.
    #[serde(rename = "m:Items")]
    pub items: Items,
}

/// The action to take when creating or updating a message item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem#messagedisposition-attribute>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MessageDisposition {
    SaveOnly,
    SendOnly,
    SendAndSaveCopy,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem#sendmeetinginvitations-attribute>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SendMeetingInvitations {
    SendToNone,
    SendOnlyToAll,
    SendToAllAndSaveCopy,
}

/// A response to a [`CreateItem`] request.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateItemResponseMessage {
    /// The created items, with only their identifiers populated.
    #[serde(default)]
    pub items: Items,
}
