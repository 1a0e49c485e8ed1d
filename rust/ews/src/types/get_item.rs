/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_proc_macros::operation_response;
use serde::{Deserialize, Serialize};

use crate::{ItemIds, ItemShape, Items};

/// A request for the properties of one or more Exchange items, e.g. messages,
/// calendar events, or contacts.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/getitem>
#[derive(Clone, Debug, Serialize)]
#[operation_response(GetItemResponseMessage)]
pub struct GetItem {
    /// A description of the information to be included in the response for each
    /// item.
    #[serde(rename = "m:ItemShape")]
    pub item_shape: ItemShape,

    /// The Exchange identifiers of the items which should be fetched.
    #[serde(rename = "m:ItemIds")]
    pub item_ids: ItemIds,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/getitemresponsemessage>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemResponseMessage {
    #[serde(default)]
    pub items: Items,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        soap::Envelope, test_utils::assert_serialized_content, BaseItemId, BaseShape,
        EmailAddressKey, ItemId, PhoneNumberKey, ResponseClass, ResponseCode, ResponseError,
    };

    #[test]
    fn serialize_get_item() {
        let get_item = GetItem {
            item_shape: ItemShape::all_properties(),
            item_ids: ItemIds::from(vec![BaseItemId::ItemId {
                id: "AAMkContact".to_string(),
                change_key: Some("EQAAABYA".to_string()),
            }]),
        };

        let expected = r#"<m:GetItem><m:ItemShape><BaseShape>AllProperties</BaseShape></m:ItemShape><m:ItemIds><ItemId Id="AAMkContact" ChangeKey="EQAAABYA"/></m:ItemIds></m:GetItem>"#;

        assert_serialized_content(&get_item, "m:GetItem", expected);
        assert_eq!(get_item.item_shape.base_shape, BaseShape::AllProperties);
    }

    #[test]
    fn deserialize_get_item_response_with_missing_item() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Header><h:ServerVersionInfo MajorVersion="15" MinorVersion="1" MajorBuildNumber="2507" MinorBuildNumber="57" Version="Exchange2016" xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types"/></s:Header><s:Body><m:GetItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><m:ResponseMessages><m:GetItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items><t:Contact><t:ItemId Id="AAMkContact" ChangeKey="EQAAABYA"/><t:GivenName>John</t:GivenName><t:EmailAddresses><t:Entry Key="EmailAddress1">john.smith@gmail.com</t:Entry></t:EmailAddresses><t:PhoneNumbers><t:Entry Key="HomePhone">000</t:Entry><t:Entry Key="MobilePhone"/></t:PhoneNumbers></t:Contact></m:Items></m:GetItemResponseMessage><m:GetItemResponseMessage ResponseClass="Error"><m:MessageText>The specified object was not found in the store.</m:MessageText><m:ResponseCode>ErrorItemNotFound</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey><m:Items/></m:GetItemResponseMessage></m:ResponseMessages></m:GetItemResponse></s:Body></s:Envelope>"#;

        let envelope: Envelope<GetItemResponse> =
            Envelope::from_xml_document(xml.as_bytes()).expect("deserialization should succeed");
        let mut messages = envelope.body.response_messages.response_messages.into_iter();

        let Some(ResponseClass::Success(message)) = messages.next() else {
            panic!("first message should be a success");
        };
        let contact = message
            .items
            .inner
            .into_iter()
            .next()
            .and_then(|item| item.into_contact())
            .expect("item should be a contact");

        assert_eq!(
            contact.item_id,
            Some(ItemId {
                id: "AAMkContact".to_string(),
                change_key: Some("EQAAABYA".to_string()),
            })
        );
        assert_eq!(contact.given_name.as_deref(), Some("John"));
        assert_eq!(
            contact.email_address(EmailAddressKey::EmailAddress1),
            Some("john.smith@gmail.com")
        );
        assert_eq!(contact.phone_number(PhoneNumberKey::HomePhone), Some("000"));
        assert_eq!(contact.phone_number(PhoneNumberKey::MobilePhone), Some(""));
        assert_eq!(contact.phone_number(PhoneNumberKey::Pager), None);

        assert_eq!(
            messages.next(),
            Some(ResponseClass::Error(ResponseError {
                message_text: "The specified object was not found in the store.".to_string(),
                response_code: ResponseCode::ErrorItemNotFound,
                message_xml: None,
            }))
        );
    }
}
