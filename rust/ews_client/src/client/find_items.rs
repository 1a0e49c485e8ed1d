/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    find_item::{FindItem, RootFolder, Traversal},
    BaseFolderId, BasePoint, ItemShape, Operation, OperationResponse, RealItem, View,
};
use ews_http::Transport;

use super::{process_response_message_class, single_response_or_error, EwsClient, EwsClientError};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Runs a single FindItem request against `parent`.
    ///
    /// Without a view, the server decides how many items to return.
    pub async fn find_items(
        &self,
        parent: BaseFolderId,
        item_shape: ItemShape,
        view: Option<View>,
    ) -> Result<RootFolder, EwsClientError> {
        let find_item = FindItem {
            traversal: Traversal::Shallow,
            item_shape,
            view,
            parent_folder_ids: vec![parent].into(),
        };

        let response_messages = self
            .make_operation_request(find_item)
            .await?
            .into_response_messages();

        let response_class = single_response_or_error(response_messages)?;
        let message = process_response_message_class(FindItem::NAME, response_class)?;

        Ok(message.root_folder)
    }

    /// Lists every item in `parent`, requesting pages of `page_size` items
    /// until the server reports the last one was included.
    pub async fn find_all_items(
        &self,
        parent: BaseFolderId,
        item_shape: ItemShape,
        page_size: usize,
    ) -> Result<Vec<RealItem>, EwsClientError> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let view = View::IndexedPageItemView {
                max_entries_returned: Some(page_size),
                offset,
                base_point: BasePoint::Beginning,
            };

            let page = self
                .find_items(parent.clone(), item_shape.clone(), Some(view))
                .await?;

            let page_len = page.items.inner.len();
            items.extend(page.items.inner);

            // An empty page means there is nothing left, whatever the server
            // claims.
            if page.includes_last_item_in_range.unwrap_or(true) || page_len == 0 {
                break;
            }

            offset = page.indexed_paging_offset.unwrap_or(offset + page_len);
            log::debug!("fetching next page of items at offset {offset}");
        }

        Ok(items)
    }
}
