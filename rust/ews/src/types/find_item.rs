/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{Deserialize, Serialize};

use crate::{FolderIds, ItemShape, Items, View};

/// Defines a request to find items in a mailbox.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/finditem>
#[derive(Clone, Debug, Serialize)]
#[operation_response(FindItemResponseMessage)]
pub struct FindItem {
    #[serde(rename = "@Traversal")]
    pub traversal: Traversal,

    #[serde(rename = "m:ItemShape")]
    pub item_shape: ItemShape,

    /// Paging or filtering applied to the results. Without one, the server
    /// returns as many items as its throttling policy allows.
    #[serde(rename = "$value", skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,

    #[serde(rename = "m:ParentFolderIds")]
    pub parent_folder_ids: FolderIds,
}

/// Defines whether the search finds items in folders or the folders' dumpsters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Traversal {
    /// Returns only the identities of items in the folder.
    #[default]
    Shallow,

    /// Returns only the identities of items that are in a folder's dumpster.
    /// Note that a soft-deleted traversal combined with a search restriction
    /// will result in zero items returned even if there are items that match the search criteria.
    SoftDeleted,

    /// Returns only the identities of associated items in the folder.
    Associated,
}

/// Contains the status and result of a single [`FindItem`] operation request.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/finditemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct FindItemResponseMessage {
    pub root_folder: RootFolder,
}

/// The `RootFolder` element of a `FindItemResponseMessage`
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/rootfolder-finditemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RootFolder {
    /// The offset to use for the next page when using an indexed paging view.
    #[serde(rename = "@IndexedPagingOffset")]
    pub indexed_paging_offset: Option<usize>,

    /// The total number of items matching the query.
    #[serde(rename = "@TotalItemsInView")]
    pub total_items_in_view: Option<usize>,

    /// Whether the current results contain the last item in the query, such
    /// that further paging is not needed.
    #[serde(rename = "@IncludesLastItemInRange")]
    pub includes_last_item_in_range: Option<bool>,

    #[serde(default)]
    pub items: Items,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{assert_deserialized_content, assert_serialized_content},
        AdditionalProperties, BaseFolderId, BasePoint, BaseShape, Contact, Item, ItemId,
        PathToElement, RealItem, ResponseClass, ResponseMessages,
    };

    #[test]
    fn serialize_find_item_with_indexed_page_view() {
        let find_item = FindItem {
            traversal: Traversal::Shallow,
            item_shape: ItemShape {
                base_shape: BaseShape::AllProperties,
                ..Default::default()
            },
            view: Some(View::IndexedPageItemView {
                max_entries_returned: Some(100),
                offset: 0,
                base_point: BasePoint::Beginning,
            }),
            parent_folder_ids: FolderIds::from(vec![BaseFolderId::FolderId {
                id: "AAMkTest".to_string(),
                change_key: Some("AQAAAA==".to_string()),
            }]),
        };

        let expected = r#"<m:FindItem Traversal="Shallow"><m:ItemShape><BaseShape>AllProperties</BaseShape></m:ItemShape><m:IndexedPageItemView MaxEntriesReturned="100" Offset="0" BasePoint="Beginning"/><m:ParentFolderIds><FolderId Id="AAMkTest" ChangeKey="AQAAAA=="/></m:ParentFolderIds></m:FindItem>"#;

        assert_serialized_content(&find_item, "m:FindItem", expected);
    }

    #[test]
    fn serialize_find_item_with_contacts_view() {
        let find_item = FindItem {
            traversal: Traversal::Shallow,
            item_shape: ItemShape {
                base_shape: BaseShape::IdOnly,
                additional_properties: Some(AdditionalProperties {
                    inner: vec![PathToElement::field("contacts:DisplayName")],
                }),
                ..Default::default()
            },
            view: Some(View::ContactsView {
                max_entries_returned: None,
                initial_name: Some("A".to_string()),
                final_name: Some("M".to_string()),
            }),
            parent_folder_ids: FolderIds::from(vec![BaseFolderId::distinguished("contacts")]),
        };

        let expected = r#"<m:FindItem Traversal="Shallow"><m:ItemShape><BaseShape>IdOnly</BaseShape><AdditionalProperties><FieldURI FieldURI="contacts:DisplayName"/></AdditionalProperties></m:ItemShape><m:ContactsView InitialName="A" FinalName="M"/><m:ParentFolderIds><DistinguishedFolderId Id="contacts"/></m:ParentFolderIds></m:FindItem>"#;

        assert_serialized_content(&find_item, "m:FindItem", expected);
    }

    #[test]
    fn deserialize_find_item_response() {
        let xml = r#"<m:FindItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages><m:FindItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:RootFolder IndexedPagingOffset="2" TotalItemsInView="2" IncludesLastItemInRange="true"><t:Items><t:Contact><t:ItemId Id="AAMkContact" ChangeKey="EQAAABYA"/><t:DisplayName>John Smith</t:DisplayName></t:Contact><t:DistributionList><t:ItemId Id="AAMkList" ChangeKey="EgAAABYA"/><t:Subject>Friends</t:Subject></t:DistributionList></t:Items></m:RootFolder></m:FindItemResponseMessage></m:ResponseMessages></m:FindItemResponse>"#;

        let expected = FindItemResponse {
            response_messages: ResponseMessages {
                response_messages: vec![ResponseClass::Success(FindItemResponseMessage {
                    root_folder: RootFolder {
                        indexed_paging_offset: Some(2),
                        total_items_in_view: Some(2),
                        includes_last_item_in_range: Some(true),
                        items: Items {
                            inner: vec![
                                RealItem::Contact(Contact {
                                    item_id: Some(ItemId {
                                        id: "AAMkContact".to_string(),
                                        change_key: Some("EQAAABYA".to_string()),
                                    }),
                                    display_name: Some("John Smith".to_string()),
                                    ..Default::default()
                                }),
                                RealItem::DistributionList(Item {
                                    item_id: Some(ItemId {
                                        id: "AAMkList".to_string(),
                                        change_key: Some("EgAAABYA".to_string()),
                                    }),
                                    subject: Some("Friends".to_string()),
                                    ..Default::default()
                                }),
                            ],
                        },
                    },
                })],
            },
        };

        assert_deserialized_content(xml, expected);
    }

    #[test]
    fn deserialize_empty_find_item_response() {
        let xml = r#"<m:FindItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages><m:FindItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:RootFolder IndexedPagingOffset="0" TotalItemsInView="0" IncludesLastItemInRange="true"><t:Items/></m:RootFolder></m:FindItemResponseMessage></m:ResponseMessages></m:FindItemResponse>"#;

        let expected = FindItemResponse {
            response_messages: ResponseMessages {
                response_messages: vec![ResponseClass::Success(FindItemResponseMessage {
                    root_folder: RootFolder {
                        indexed_paging_offset: Some(0),
                        total_items_in_view: Some(0),
                        includes_last_item_in_range: Some(true),
                        items: Items::default(),
                    },
                })],
            },
        };

        assert_deserialized_content(xml, expected);
    }
}
