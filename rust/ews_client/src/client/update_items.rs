/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    update_item::{ConflictResolution, ItemChange, ItemChanges, UpdateItem},
    ItemId, Operation, OperationResponse, RealItem,
};
use ews_http::Transport;

use super::{response_into_messages, validate_response_message_count, EwsClient, EwsClientError};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Applies the given changes, one per item.
    ///
    /// Returns the updated ids of the items, which carry new change keys.
    pub async fn update_items(
        &self,
        changes: Vec<ItemChange>,
        conflict_resolution: ConflictResolution,
    ) -> Result<Vec<ItemId>, EwsClientError> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = changes.len();
        let update_item = UpdateItem {
            message_disposition: None,
            conflict_resolution,
            saved_item_folder_id: None,
            item_changes: ItemChanges { inner: changes },
        };

        let response = self.make_operation_request(update_item).await?;
        validate_response_message_count(response.response_messages(), expected_len)?;

        response_into_messages(response)?
            .into_iter()
            .map(|message| {
                if let Some(conflicts) = message.conflict_results.filter(|c| c.count > 0) {
                    log::warn!(
                        "{} resolved {} conflict(s) with {conflict_resolution:?}",
                        UpdateItem::NAME,
                        conflicts.count
                    );
                }

                message
                    .items
                    .inner
                    .first()
                    .and_then(RealItem::item_id)
                    .cloned()
                    .ok_or(EwsClientError::MissingIdInResponse)
            })
            .collect()
    }
}
