/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    find_folder::{FindFolder, FolderTraversal},
    get_folder::GetFolder,
    BaseFolderId, BaseShape, Folder, FolderShape, Operation, OperationResponse,
};
use ews_http::Transport;

use super::{
    process_response_message_class, single_response_or_error, validate_response_message_count,
    EwsClient, EwsClientError,
};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Lists the folders under `parent`.
    pub async fn find_folders(
        &self,
        parent: BaseFolderId,
        traversal: FolderTraversal,
    ) -> Result<Vec<Folder>, EwsClientError> {
        let find_folder = FindFolder {
            traversal,
            folder_shape: FolderShape {
                base_shape: BaseShape::Default,
            },
            parent_folder_ids: vec![parent].into(),
        };

        let response_messages = self
            .make_operation_request(find_folder)
            .await?
            .into_response_messages();

        let response_class = single_response_or_error(response_messages)?;
        let message = process_response_message_class(FindFolder::NAME, response_class)?;

        let root_folder = message.root_folder;
        if root_folder.includes_last_item_in_range == Some(false) {
            log::warn!(
                "{} returned a partial folder list ({} of {:?})",
                FindFolder::NAME,
                root_folder.folders.inner.len(),
                root_folder.total_items_in_view
            );
        }

        Ok(root_folder.folders.inner)
    }

    /// Looks up a direct child of `parent` by its display name.
    ///
    /// If several folders share the name, the first one returned by the server
    /// wins.
    pub async fn get_folder_by_display_name(
        &self,
        display_name: &str,
        parent: BaseFolderId,
    ) -> Result<Option<Folder>, EwsClientError> {
        let folders = self
            .find_folders(parent, FolderTraversal::Shallow)
            .await?;

        let folder = folders
            .into_iter()
            .find(|folder| folder.display_name() == Some(display_name));

        if folder.is_none() {
            log::debug!("no folder named {display_name:?}");
        }

        Ok(folder)
    }

    /// Fetches the folders with the given ids, in order.
    pub async fn get_folders(&self, ids: Vec<BaseFolderId>) -> Result<Vec<Folder>, EwsClientError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = ids.len();
        let get_folder = GetFolder {
            folder_shape: FolderShape {
                base_shape: BaseShape::AllProperties,
            },
            folder_ids: ids.into(),
        };

        let response_messages = self
            .make_operation_request(get_folder)
            .await?
            .into_response_messages();
        validate_response_message_count(&response_messages, expected_len)?;

        let mut folders = Vec::with_capacity(expected_len);
        for response_class in response_messages {
            let message = process_response_message_class(GetFolder::NAME, response_class)?;
            folders.extend(message.folders.inner);
        }

        Ok(folders)
    }
}
