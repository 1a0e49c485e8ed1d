/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{Deserialize, Serialize};

use crate::{FolderIds, FolderShape, Folders};

/// A request to list the subfolders of one or more folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/findfolder>
#[derive(Clone, Debug, Serialize)]
#[operation_response(FindFolderResponseMessage)]
pub struct FindFolder {
    /// How deep into the folder hierarchy the search goes.
    #[serde(rename = "@Traversal")]
    pub traversal: FolderTraversal,

    /// The properties to return for each folder.
    #[serde(rename = "m:FolderShape")]
    pub folder_shape: FolderShape,

    /// The folders whose subfolders should be listed.
    #[serde(rename = "m:ParentFolderIds")]
    pub parent_folder_ids: FolderIds,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/findfolder#attributes>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FolderTraversal {
    /// Only the direct subfolders.
    #[default]
    Shallow,

    /// Every folder below the parent.
    Deep,

    /// Only soft-deleted folders.
    SoftDeleted,
}

/// Contains the status and result of a single [`FindFolder`] operation
/// request.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/findfolderresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct FindFolderResponseMessage {
    pub root_folder: RootFolder,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/rootfolder-findfolderresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RootFolder {
    #[serde(rename = "@IndexedPagingOffset")]
    pub indexed_paging_offset: Option<usize>,

    #[serde(rename = "@TotalItemsInView")]
    pub total_items_in_view: Option<usize>,

    #[serde(rename = "@IncludesLastItemInRange")]
    pub includes_last_item_in_range: Option<bool>,

    #[serde(default)]
    pub folders: Folders,
}
