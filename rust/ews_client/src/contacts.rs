/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Management of the contacts stored in a single folder.

mod changes;

use ews::{
    update_item::{ConflictResolution, ItemChange},
    BaseFolderId, BaseItemId, Contact, DeleteType, Folder, ItemId, ItemShape, RealItem,
};
use ews_http::Transport;

pub use self::changes::ContactChanges;

use crate::{
    authentication::credentials::Credentials,
    client::single_response_or_error,
    config::ClientOptions,
    transport::{endpoint_for_server, ClientTransport},
    EwsClient, EwsClientError,
};

const CONTACTS_FOLDER: &str = "contacts";

// The largest page EWS returns by default.
const PAGE_SIZE: usize = 1000;

/// Reads and writes the contacts of a working folder, which defaults to the
/// account's main contacts folder.
pub struct ContactsApi<T = ClientTransport> {
    client: EwsClient<T>,
    folder_id: BaseFolderId,
}

impl ContactsApi<ClientTransport> {
    /// Creates an API for the given server, authenticating with Basic
    /// credentials.
    ///
    /// `server` is either a host name, in which case the standard EWS path is
    /// used, or the full URL of the endpoint. Which transport is used depends
    /// on `options.http_playback`.
    pub fn with_username_and_password(
        server: &str,
        username: &str,
        password: &str,
        options: ClientOptions,
    ) -> Result<Self, EwsClientError> {
        let endpoint = endpoint_for_server(server)?;
        let transport = ClientTransport::from_options(&endpoint, &options)?;
        let credentials = Credentials::basic(username, password);

        Ok(Self::new(EwsClient::with_options(
            transport,
            credentials,
            &options,
        )))
    }
}

impl<T> ContactsApi<T>
where
    T: Transport,
{
    pub fn new(client: EwsClient<T>) -> Self {
        ContactsApi {
            client,
            folder_id: BaseFolderId::distinguished(CONTACTS_FOLDER),
        }
    }

    pub fn client(&self) -> &EwsClient<T> {
        &self.client
    }

    pub fn folder_id(&self) -> &BaseFolderId {
        &self.folder_id
    }

    /// Sets the folder the other methods work in.
    pub fn set_folder_id(&mut self, folder_id: impl Into<BaseFolderId>) {
        self.folder_id = folder_id.into();
    }

    pub async fn get_folder_by_display_name(
        &self,
        display_name: &str,
        parent: BaseFolderId,
    ) -> Result<Option<Folder>, EwsClientError> {
        self.client
            .get_folder_by_display_name(display_name, parent)
            .await
    }

    /// Lists the contacts in the working folder.
    ///
    /// Other kinds of items, such as distribution lists, are left out.
    pub async fn get_contacts(&self) -> Result<Vec<Contact>, EwsClientError> {
        self.get_contacts_in(self.folder_id.clone()).await
    }

    pub async fn get_contacts_in(
        &self,
        folder_id: BaseFolderId,
    ) -> Result<Vec<Contact>, EwsClientError> {
        let items = self
            .client
            .find_all_items(folder_id, ItemShape::all_properties(), PAGE_SIZE)
            .await?;

        Ok(items.into_iter().filter_map(RealItem::into_contact).collect())
    }

    /// Creates the given contacts in the working folder, returning their ids
    /// in order.
    ///
    /// If only some of the contacts could be created, the ids of those that
    /// were are returned in [`EwsClientError::PartiallyCreated`].
    pub async fn create_contacts(
        &self,
        contacts: Vec<Contact>,
    ) -> Result<Vec<ItemId>, EwsClientError> {
        let items = contacts.into_iter().map(RealItem::Contact).collect();

        self.client
            .create_items(items, Some(self.folder_id.clone()))
            .await
    }

    /// Fetches a single contact, or `None` if it does not exist.
    pub async fn get_contact(&self, id: ItemId) -> Result<Option<Contact>, EwsClientError> {
        let items = self
            .client
            .get_items(vec![id], ItemShape::all_properties())
            .await?;

        match single_response_or_error(items)? {
            Some(RealItem::Contact(contact)) => Ok(Some(contact)),
            Some(_) => Err(EwsClientError::Processing {
                message: "requested item is not a contact".to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Applies `changes` to a contact, overwriting any conflicting change made
    /// since `id` was obtained.
    ///
    /// Returns the id of the contact with its new change key.
    pub async fn update_contact_item(
        &self,
        id: ItemId,
        changes: ContactChanges,
    ) -> Result<ItemId, EwsClientError> {
        if changes.is_empty() {
            return Err(EwsClientError::Processing {
                message: "no changes to apply to contact".to_string(),
            });
        }

        let change = ItemChange {
            item_id: BaseItemId::from(id),
            updates: changes.into_updates(),
        };

        let ids = self
            .client
            .update_items(vec![change], ConflictResolution::AlwaysOverwrite)
            .await?;

        single_response_or_error(ids)
    }

    /// Moves the given items to the Deleted Items folder.
    pub async fn delete_items(&self, ids: Vec<ItemId>) -> Result<(), EwsClientError> {
        self.delete_items_with(ids, DeleteType::MoveToDeletedItems)
            .await
    }

    pub async fn delete_items_with(
        &self,
        ids: Vec<ItemId>,
        delete_type: DeleteType,
    ) -> Result<(), EwsClientError> {
        self.client.delete_items(ids, delete_type).await
    }
}
