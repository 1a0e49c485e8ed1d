/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use crate::{
    create_item::MessageDisposition, BaseItemId, Items, PathToElement, RealItem, TargetFolderId,
};

/// A request to update properties of one or more Exchange items.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem>
#[derive(Clone, Debug, Serialize)]
#[operation_response(UpdateItemResponseMessage)]
pub struct UpdateItem {
    /// The action the Exchange server will take upon updating this item.
    ///
    /// This field is required for and only applicable to message items.
    #[serde(
        rename = "@MessageDisposition",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_disposition: Option<MessageDisposition>,

    /// The method the Exchange server will use to resolve conflicts between
    /// updates.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem#conflictresolution-attribute>
    #[serde(rename = "@ConflictResolution")]
    pub conflict_resolution: ConflictResolution,

    #[serde(
        rename = "m:SavedItemFolderId",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_item_folder_id: Option<TargetFolderId>,

    /// A list of items and their corresponding updates.
    #[serde(rename = "m:ItemChanges")]
    pub item_changes: ItemChanges,
}

/// The method used by the Exchange server to resolve conflicts between item
/// updates.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem#conflictresolution-attribute>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ConflictResolution {
    /// Conflicts will cause the update to fail and return an error.
    NeverOverwrite,

    /// The Exchange server will attempt to resolve any conflicts automatically.
    #[default]
    AutoResolve,

    /// Conflicting fields will be overwritten with the contents of the update.
    AlwaysOverwrite,
}

/// A list of updates to items, with each element representing a single item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemchanges>
#[derive(Clone, Debug, Default, Serialize)]
pub struct ItemChanges {
    #[serde(rename = "ItemChange")]
    pub inner: Vec<ItemChange>,
}

/// One or more updates to a single item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemchange>
#[derive(Clone, Debug, Serialize)]
pub struct ItemChange {
    /// The ID of the item to be updated.
    #[serde(rename = "$value")]
    pub item_id: BaseItemId,

    /// The changes to make to the item.
    #[serde(rename = "Updates")]
    pub updates: Updates,
}

/// A list of changes to fields, with each element representing a single change.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updates-item>
#[derive(Clone, Debug, Default, Serialize)]
pub struct Updates {
    #[serde(rename = "$value")]
    pub inner: Vec<ItemChangeDescription>,
}

impl Updates {
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// An individual change to a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ItemChangeDescription {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/setitemfield>
    SetItemField(SetItemField),

    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitemfield>
    DeleteItemField(DeleteItemField),
}

/// An update setting the value of a single field.
///
/// `item` must only carry the value of the field named by `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetItemField {
    /// The field to be updated.
    pub path: PathToElement,

    /// An item holding the new value of the field.
    pub item: RealItem,
}

// Both members are written under their own element name, which serde derive
// cannot express for two fields of the same struct.
impl Serialize for SetItemField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SetItemField", 2)?;
        state.serialize_field("$value", &self.path)?;
        state.serialize_field("$value", &self.item)?;
        state.end()
    }
}

/// An update clearing the value of a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteItemField {
    #[serde(rename = "$value")]
    pub path: PathToElement,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemResponseMessage {
    /// The updated items, with their new change keys.
    #[serde(default)]
    pub items: Items,

    pub conflict_results: Option<ConflictResults>,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/conflictresults>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ConflictResults {
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{assert_deserialized_content, assert_serialized_content},
        Contact, ItemId, PhysicalAddressEntry, PhysicalAddressKey,
        PhysicalAddresses, ResponseClass, ResponseMessages,
    };

    #[test]
    fn serialize_update_item() {
        let update_item = UpdateItem {
            message_disposition: None,
            conflict_resolution: ConflictResolution::AlwaysOverwrite,
            saved_item_folder_id: None,
            item_changes: ItemChanges {
                inner: vec![ItemChange {
                    item_id: BaseItemId::ItemId {
                        id: "AAMkContact".to_string(),
                        change_key: Some("EQAAABYA".to_string()),
                    },
                    updates: Updates {
                        inner: vec![
                            ItemChangeDescription::SetItemField(SetItemField {
                                path: PathToElement::field("contacts:GivenName"),
                                item: RealItem::Contact(Contact {
                                    given_name: Some("Jane".to_string()),
                                    ..Default::default()
                                }),
                            }),
                            ItemChangeDescription::SetItemField(SetItemField {
                                path: PathToElement::indexed(
                                    "contacts:PhysicalAddress:Street",
                                    "Home",
                                ),
                                item: RealItem::Contact(Contact {
                                    physical_addresses: Some(PhysicalAddresses::from_iter([
                                        PhysicalAddressEntry {
                                            street: Some("123 Street New".to_string()),
                                            ..PhysicalAddressEntry::new(PhysicalAddressKey::Home)
                                        },
                                    ])),
                                    ..Default::default()
                                }),
                            }),
                            ItemChangeDescription::DeleteItemField(DeleteItemField {
                                path: PathToElement::indexed(
                                    "contacts:PhysicalAddress:City",
                                    "Business",
                                ),
                            }),
                        ],
                    },
                }],
            },
        };

        let expected = r#"<m:UpdateItem ConflictResolution="AlwaysOverwrite"><m:ItemChanges><ItemChange><ItemId Id="AAMkContact" ChangeKey="EQAAABYA"/><Updates><SetItemField><FieldURI FieldURI="contacts:GivenName"/><Contact><GivenName>Jane</GivenName></Contact></SetItemField><SetItemField><IndexedFieldURI FieldURI="contacts:PhysicalAddress:Street" FieldIndex="Home"/><Contact><PhysicalAddresses><Entry Key="Home"><Street>123 Street New</Street></Entry></PhysicalAddresses></Contact></SetItemField><DeleteItemField><IndexedFieldURI FieldURI="contacts:PhysicalAddress:City" FieldIndex="Business"/></DeleteItemField></Updates></ItemChange></m:ItemChanges></m:UpdateItem>"#;

        assert_serialized_content(&update_item, "m:UpdateItem", expected);
    }

    #[test]
    fn deserialize_update_item_response() {
        let xml = r#"<m:UpdateItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages><m:UpdateItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items><t:Contact><t:ItemId Id="AAMkContact" ChangeKey="EQAAABYB"/></t:Contact></m:Items><m:ConflictResults><t:Count>0</t:Count></m:ConflictResults></m:UpdateItemResponseMessage></m:ResponseMessages></m:UpdateItemResponse>"#;

        let expected = UpdateItemResponse {
            response_messages: ResponseMessages {
                response_messages: vec![ResponseClass::Success(UpdateItemResponseMessage {
                    items: Items {
                        inner: vec![RealItem::Contact(Contact {
                            item_id: Some(ItemId {
                                id: "AAMkContact".to_string(),
                                change_key: Some("EQAAABYB".to_string()),
                            }),
                            ..Default::default()
                        })],
                    },
                    conflict_results: Some(ConflictResults { count: 0 }),
                })],
            },
        };

        assert_deserialized_content(xml, expected);
    }
}
