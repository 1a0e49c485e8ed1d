/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    delete_item::DeleteItem, response::ResponseCode, BaseItemId, DeleteType, ItemId, Operation,
    OperationResponse, ResponseClass,
};
use ews_http::Transport;

use super::{
    process_response_message_class, validate_response_message_count, EwsClient, EwsClientError,
};

impl<T> EwsClient<T>
where
    T: Transport,
{
    /// Deletes the items with the given ids.
    ///
    /// Items which no longer exist are skipped: the end result is the same.
    pub async fn delete_items(
        &self,
        ids: Vec<ItemId>,
        delete_type: DeleteType,
    ) -> Result<(), EwsClientError> {
        if ids.is_empty() {
            return Ok(());
        }

        let expected_len = ids.len();
        let delete_item = DeleteItem {
            delete_type,
            send_meeting_cancellations: None,
            affected_task_occurrences: None,
            suppress_read_receipts: None,
            item_ids: ids
                .into_iter()
                .map(BaseItemId::from)
                .collect::<Vec<_>>()
                .into(),
        };

        let response_messages = self
            .make_operation_request(delete_item)
            .await?
            .into_response_messages();
        validate_response_message_count(&response_messages, expected_len)?;

        for response_class in response_messages {
            match response_class {
                ResponseClass::Error(err) if err.response_code == ResponseCode::ErrorItemNotFound => {
                    log::warn!("item to delete was not found: {}", err.message_text);
                }
                response_class => {
                    process_response_message_class(DeleteItem::NAME, response_class)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ews_http::Exchange;

    use super::*;
    use crate::{authentication::credentials::Credentials, client::mock::*};

    fn ids(ids: &[&str]) -> Vec<ItemId> {
        ids.iter()
            .map(|id| ItemId {
                id: id.to_string(),
                change_key: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn missing_items_are_ignored() {
        let messages = format!(
            r#"<m:DeleteItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode></m:DeleteItemResponseMessage><m:DeleteItemResponseMessage ResponseClass="Error">{ITEM_NOT_FOUND_MESSAGE}</m:DeleteItemResponseMessage>"#
        );
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "DeleteItem",
                200,
                operation_response("DeleteItem", &messages),
            )]),
            Credentials::basic("user", "password"),
        );

        client
            .delete_items(ids(&["AAMkOne", "AAMkGone"]), DeleteType::HardDelete)
            .await
            .expect("missing items should not fail the deletion");

        let requests = client.transport().requests();
        assert!(requests[0].body.contains(
            r#"<m:DeleteItem DeleteType="HardDelete"><m:ItemIds><ItemId Id="AAMkOne"/><ItemId Id="AAMkGone"/></m:ItemIds></m:DeleteItem>"#
        ));
    }

    #[tokio::test]
    async fn other_errors_fail() {
        let client = EwsClient::new(
            MockTransport::new(vec![Exchange::new(
                "DeleteItem",
                200,
                operation_response(
                    "DeleteItem",
                    r#"<m:DeleteItemResponseMessage ResponseClass="Error"><m:MessageText>Access is denied.</m:MessageText><m:ResponseCode>ErrorAccessDenied</m:ResponseCode><m:DescriptiveLinkKey>0</m:DescriptiveLinkKey></m:DeleteItemResponseMessage>"#,
                ),
            )]),
            Credentials::basic("user", "password"),
        );

        let err = client
            .delete_items(ids(&["AAMkOne"]), DeleteType::MoveToDeletedItems)
            .await
            .expect_err("access denied");

        assert!(matches!(
            err,
            EwsClientError::ResponseError(ref error)
                if error.response_code == ResponseCode::ErrorAccessDenied
        ));
    }
}
