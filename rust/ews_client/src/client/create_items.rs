/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    create_item::CreateItem, response::ResponseClass, BaseFolderId, ItemId, Items, Operation,
    OperationResponse, RealItem, TargetFolderId,
};
use ews_http::Transport;

use super::{validate_response_message_count, EwsClient, EwsClientError};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Creates the given items, in `saved_folder` if set or in the default
    /// folder for their kind otherwise.
    ///
    /// Returns the ids of the new items, in order.
    pub async fn create_items(
        &self,
        items: Vec<RealItem>,
        saved_folder: Option<BaseFolderId>,
    ) -> Result<Vec<ItemId>, EwsClientError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = items.len();
        let create_item = CreateItem {
            message_disposition: None,
            send_meeting_invitations: None,
            saved_item_folder_id: saved_folder.map(|folder_id| TargetFolderId { inner: folder_id }),
            items: Items { inner: items },
        };

        let response_messages = self
            .make_operation_request(create_item)
            .await?
            .into_response_messages();
        validate_response_message_count(&response_messages, expected_len)?;

        let mut created = Vec::with_capacity(expected_len);
        let mut first_error = None;

        for response_class in response_messages {
            let message = match response_class {
                ResponseClass::Success(message) => message,
                ResponseClass::Warning(message) => {
                    log::warn!("{} operation encountered unknown warning", CreateItem::NAME);
                    message
                }
                ResponseClass::Error(err) => {
                    log::error!("{} operation failed: {err}", CreateItem::NAME);
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                    continue;
                }
            };

            let id = message
                .items
                .inner
                .first()
                .and_then(RealItem::item_id)
                .cloned()
                .ok_or(EwsClientError::MissingIdInResponse)?;
            created.push(id);
        }

        match first_error {
            None => Ok(created),
            Some(err) if created.is_empty() => Err(err.into()),
            Some(err) => Err(EwsClientError::PartiallyCreated {
                created,
                source: err,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use ews::{
        response::{ResponseCode, ResponseError},
        Contact,
    };
    use ews_http::Exchange;

    use super::*;
    use crate::{authentication::credentials::Credentials, client::mock::*};

    #[tokio::test]
    async fn returns_new_ids_in_order() {
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "CreateItem",
                200,
                operation_response(
                    "CreateItem",
                    r#"<m:CreateItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items><t:Contact><t:ItemId Id="AAMkOne" ChangeKey="EQAAABYA"/></t:Contact></m:Items></m:CreateItemResponseMessage><m:CreateItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items><t:Contact><t:ItemId Id="AAMkTwo" ChangeKey="EQAAABYB"/></t:Contact></m:Items></m:CreateItemResponseMessage>"#,
                ),
            )]),
            Credentials::basic("user", "password"),
        );

        let contact = |name: &str| {
            RealItem::Contact(Contact {
                given_name: Some(name.to_string()),
                ..Default::default()
            })
        };

        let ids = client
            .create_items(
                vec![contact("John"), contact("Jane")],
                Some(BaseFolderId::distinguished("contacts")),
            )
            .await
            .expect("request should succeed");

        assert_eq!(
            ids.iter().map(|id| id.id.as_str()).collect::<Vec<_>>(),
            ["AAMkOne", "AAMkTwo"]
        );

        let requests = client.transport().requests();
        assert!(requests[0].body.contains(
            r#"<m:CreateItem><m:SavedItemFolderId><DistinguishedFolderId Id="contacts"/></m:SavedItemFolderId><m:Items><Contact><GivenName>John</GivenName></Contact><Contact><GivenName>Jane</GivenName></Contact></m:Items></m:CreateItem>"#
        ));
    }

    #[tokio::test]
    async fn partial_failure_reports_created_ids() {
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "CreateItem",
                200,
                operation_response(
                    "CreateItem",
                    r#"<m:CreateItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items><t:Contact><t:ItemId Id="AAMkOne" ChangeKey="EQAAABYA"/></t:Contact></m:Items></m:CreateItemResponseMessage><m:CreateItemResponseMessage ResponseClass="Error"><m:MessageText>The property is not valid.</m:MessageText><m:ResponseCode>ErrorInvalidPropertyRequest</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey><m:Items/></m:CreateItemResponseMessage>"#,
                ),
            )]),
            Credentials::basic("user", "password"),
        );

        let err = client
            .create_items(
                vec![
                    RealItem::Contact(Contact::default()),
                    RealItem::Contact(Contact::default()),
                ],
                None,
            )
            .await
            .expect_err("second item failed");

        match err {
            EwsClientError::PartiallyCreated { created, source } => {
                assert_eq!(
                    created.iter().map(|id| id.id.as_str()).collect::<Vec<_>>(),
                    ["AAMkOne"]
                );
                assert_eq!(source.response_code, ResponseCode::ErrorInvalidPropertyRequest);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn total_failure_is_a_response_error() {
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "CreateItem",
                200,
                operation_response(
                    "CreateItem",
                    r#"<m:CreateItemResponseMessage ResponseClass="Error"><m:MessageText>The property is not valid.</m:MessageText><m:ResponseCode>ErrorInvalidPropertyRequest</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey><m:Items/></m:CreateItemResponseMessage>"#,
                ),
            )]),
            Credentials::basic("user", "password"),
        );

        let err = client
            .create_items(vec![RealItem::Contact(Contact::default())], None)
            .await
            .expect_err("item failed");

        assert!(matches!(
            err,
            EwsClientError::ResponseError(ResponseError {
                response_code: ResponseCode::ErrorInvalidPropertyRequest,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn missing_id_is_an_error() {
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "CreateItem",
                200,
                operation_response(
                    "CreateItem",
                    r#"<m:CreateItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode><m:Items/></m:CreateItemResponseMessage>"#,
                ),
            )]),
            Credentials::basic("user", "password"),
        );

        let err = client
            .create_items(vec![RealItem::Contact(Contact::default())], None)
            .await
            .expect_err("no id in response");

        assert!(matches!(err, EwsClientError::MissingIdInResponse));
    }
}
