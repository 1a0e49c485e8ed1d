/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    get_folder::{GetFolder, GetFolderResponseMessage},
    BaseFolderId, BaseShape, FolderId, FolderShape, Operation, OperationResponse,
};
use ews_http::Transport;

use super::{
    process_response_message_class, single_response_or_error, EwsClient, EwsClientError,
    EWS_ROOT_FOLDER,
};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Performs a connectivity check to the EWS server.
    ///
    /// Because EWS does not have a dedicated endpoint to test connectivity and
    /// authentication, we try to look up the ID of the account's root folder,
    /// since it produces a fairly small request.
    pub async fn check_connectivity(&self) -> Result<(), EwsClientError> {
        // Request the EWS ID of the root folder.
        let get_root_folder = GetFolder {
            folder_shape: FolderShape {
                base_shape: BaseShape::IdOnly,
            },
            folder_ids: vec![BaseFolderId::distinguished(EWS_ROOT_FOLDER)].into(),
        };

        let response_messages = self
            .make_operation_request(get_root_folder)
            .await
            .inspect_err(|err| log::error!("connectivity check failed with error: {err}"))?
            .into_response_messages();

        // Get the first (and only) response message so we can inspect it.
        let response_class = single_response_or_error(response_messages)?;
        let message = process_response_message_class(GetFolder::NAME, response_class)?;

        validate_get_folder_response_message(&message)?;

        Ok(())
    }
}

/// Verifies that a response message for a GetFolder request holds exactly one
/// folder with an id.
///
/// Returns the ID of the folder for convenience.
fn validate_get_folder_response_message(
    message: &GetFolderResponseMessage,
) -> Result<FolderId, EwsClientError> {
    match message.folders.inner.as_slice() {
        [folder] => folder
            .folder_id()
            .cloned()
            .ok_or(EwsClientError::MissingIdInResponse),
        folders => Err(EwsClientError::Processing {
            message: format!(
                "expected exactly one folder per response message, got {}",
                folders.len()
            ),
        }),
    }
}
