/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{Deserialize, Serialize};

use crate::{DeleteType, ItemIds};

/// Whether to send meeting cancellations when deleting a calendar item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitem#sendmeetingcancellations-attribute>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SendMeetingCancellations {
    SendToNone,
    SendOnlyToAll,
    SendToAllAndSaveCopy,
}

/// Which tasks should be impacted when deleting a task item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitem#affectedtaskoccurrences-attribute>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AffectedTaskOccurrences {
    AllOccurrences,
    SpecifiedOccurrenceOnly,
}

/// A request to delete one or more Exchange items.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitem>
#[derive(Clone, Debug, Serialize)]
#[operation_response(DeleteItemResponseMessage)]
pub struct DeleteItem {
    /// The method the EWS server will use to perform the deletion.
    #[serde(rename = "@DeleteType")]
    pub delete_type: DeleteType,

    /// The action the EWS server will take when deleting a calendar item.
    ///
    /// Required when deleting calendar items, otherwise it has no effect.
    #[serde(
        rename = "@SendMeetingCancellations",
        skip_serializing_if = "Option::is_none"
    )]
    pub send_meeting_cancellations: Option<SendMeetingCancellations>,

    /// The task item(s) to delete.
    ///
    /// Required when deleting task items, otherwise it has no effect.
    #[serde(
        rename = "@AffectedTaskOccurrences",
        skip_serializing_if = "Option::is_none"
    )]
    pub affected_task_occurrences: Option<AffectedTaskOccurrences>,

    /// Whether to suppress read receipts for the deleted item(s).
    #[serde(
        rename = "@SuppressReadReceipts",
        skip_serializing_if = "Option::is_none"
    )]
    pub suppress_read_receipts: Option<bool>,

    /// A list of items to delete.
    #[serde(rename = "m:ItemIds")]
    pub item_ids: ItemIds,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DeleteItemResponseMessage {}
