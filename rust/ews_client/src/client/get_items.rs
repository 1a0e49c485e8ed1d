/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    get_item::GetItem, response::ResponseCode, BaseItemId, ItemId, ItemShape, Operation,
    OperationResponse, RealItem, ResponseClass,
};
use ews_http::Transport;

use super::{
    process_response_message_class, validate_response_message_count, EwsClient, EwsClientError,
};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Fetches the items with the given ids.
    ///
    /// The result holds one entry per id, in order, which is `None` if the
    /// item does not exist (anymore).
    pub async fn get_items(
        &self,
        ids: Vec<ItemId>,
        item_shape: ItemShape,
    ) -> Result<Vec<Option<RealItem>>, EwsClientError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = ids.len();
        let get_item = GetItem {
            item_shape,
            item_ids: ids
                .into_iter()
                .map(BaseItemId::from)
                .collect::<Vec<_>>()
                .into(),
        };

        let response_messages = self
            .make_operation_request(get_item)
            .await?
            .into_response_messages();
        validate_response_message_count(&response_messages, expected_len)?;

        response_messages
            .into_iter()
            .map(|response_class| match response_class {
                ResponseClass::Error(err) if err.response_code == ResponseCode::ErrorItemNotFound => {
                    log::warn!("{}: {}", GetItem::NAME, err.message_text);
                    Ok(None)
                }
                response_class => {
                    let message = process_response_message_class(GetItem::NAME, response_class)?;

                    let item_count = message.items.inner.len();
                    if item_count != 1 {
                        log::warn!("expected one item per response message, got {item_count}");
                    }

                    message
                        .items
                        .inner
                        .into_iter()
                        .next()
                        .map(Some)
                        .ok_or_else(|| EwsClientError::Processing {
                            message: format!("{} response message holds no item", GetItem::NAME),
                        })
                }
            })
            .collect()
    }
}
