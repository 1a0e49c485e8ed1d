/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Contacts round trips against a server.
//!
//! By default the exchanges stored in `tests/recordings` are replayed. Set
//! `EWS_HTTP_PLAYBACK=record` and provide `tests/auth.json` to run against a
//! real server (with a contacts folder named "Test") and refresh the
//! recordings.

use std::path::PathBuf;

use ews::{
    Contact, EmailAddressKey, EmailAddresses, ItemId, PhoneNumberKey, PhoneNumbers,
    PhysicalAddressEntry, PhysicalAddressKey, PhysicalAddresses,
};
use ews_client::{
    config::{AuthConfig, ClientOptions, PlaybackMode, PlaybackOptions},
    ContactChanges, ContactsApi,
};

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

async fn get_client(test_name: &str) -> ContactsApi {
    let mode = PlaybackMode::from_env().unwrap_or(PlaybackMode::Playback);
    let auth = AuthConfig::load_or_default(manifest_dir().join("tests").join("auth.json"))
        .expect("auth.json should be valid");

    let options = ClientOptions {
        http_playback: PlaybackOptions {
            mode,
            record_file_name: Some(format!("ContactsApi.{test_name}.json")),
            record_location: Some(manifest_dir().join("tests").join("recordings")),
        },
        ..Default::default()
    };

    let mut api =
        ContactsApi::with_username_and_password(&auth.server, &auth.user, &auth.password, options)
            .expect("client should be created");

    let test_folder = api
        .get_folder_by_display_name("Test", api.folder_id().clone())
        .await
        .expect("folder lookup should succeed")
        .expect("Test folder should exist");
    let folder_id = test_folder
        .folder_id()
        .cloned()
        .expect("Test folder should have an id");
    api.set_folder_id(folder_id);

    api
}

fn john_smith() -> Contact {
    Contact {
        given_name: Some("John".to_string()),
        surname: Some("Smith".to_string()),
        email_addresses: Some(EmailAddresses::from_iter([(
            EmailAddressKey::EmailAddress1,
            "john.smith@gmail.com",
        )])),
        phone_numbers: Some(PhoneNumbers::from_iter([(PhoneNumberKey::HomePhone, "000")])),
        ..Default::default()
    }
}

fn item_id(contact: &Contact) -> ItemId {
    contact
        .item_id
        .clone()
        .expect("contact should have an id")
}

#[tokio::test]
async fn get_contacts() {
    let api = get_client("get_contacts").await;

    let contacts = api.get_contacts().await.expect("listing should succeed");
    assert!(contacts.is_empty());

    let ids = api
        .create_contacts(vec![john_smith()])
        .await
        .expect("creation should succeed");
    let contacts = api.get_contacts().await.expect("listing should succeed");
    api.delete_items(ids).await.expect("deletion should succeed");

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].display_name.as_deref(), Some("John Smith"));
}

#[tokio::test]
async fn create_contact() {
    let api = get_client("create_contact").await;

    let ids = api
        .create_contacts(vec![john_smith()])
        .await
        .expect("creation should succeed");
    assert_eq!(ids.len(), 1);

    let contact = api
        .get_contact(ids[0].clone())
        .await
        .expect("fetching should succeed")
        .expect("contact should exist");
    assert_eq!(contact.given_name.as_deref(), Some("John"));
    assert_eq!(
        contact.email_address(EmailAddressKey::EmailAddress1),
        Some("john.smith@gmail.com")
    );

    api.delete_items(vec![item_id(&contact)])
        .await
        .expect("deletion should succeed");
}

#[tokio::test]
async fn update_contact() {
    let api = get_client("update_contact").await;

    let ids = api
        .create_contacts(vec![Contact {
            physical_addresses: Some(PhysicalAddresses::from_iter([PhysicalAddressEntry {
                street: Some("123 Street".to_string()),
                city: Some("123 City".to_string()),
                state: Some("123 State".to_string()),
                country_or_region: Some("123 Country".to_string()),
                postal_code: Some("12345".to_string()),
                ..PhysicalAddressEntry::new(PhysicalAddressKey::Home)
            }])),
            ..john_smith()
        }])
        .await
        .expect("creation should succeed");

    let changes = ContactChanges::new().set(Contact {
        given_name: Some("Jane".to_string()),
        email_addresses: Some(EmailAddresses::from_iter([(
            EmailAddressKey::EmailAddress1,
            "jane.smith@gmail.com",
        )])),
        phone_numbers: Some(PhoneNumbers::from_iter([(PhoneNumberKey::HomePhone, "111")])),
        physical_addresses: Some(PhysicalAddresses::from_iter([PhysicalAddressEntry {
            street: Some("123 Street New".to_string()),
            city: Some("123 City New".to_string()),
            ..PhysicalAddressEntry::new(PhysicalAddressKey::Home)
        }])),
        ..Default::default()
    });

    let updated_id = api
        .update_contact_item(ids[0].clone(), changes)
        .await
        .expect("update should succeed");
    assert_eq!(updated_id.id, ids[0].id);
    assert_ne!(updated_id.change_key, ids[0].change_key);

    let contact = api
        .get_contact(updated_id)
        .await
        .expect("fetching should succeed")
        .expect("contact should exist");

    assert_eq!(contact.given_name.as_deref(), Some("Jane"));
    assert_eq!(
        contact.email_address(EmailAddressKey::EmailAddress1),
        Some("jane.smith@gmail.com")
    );
    assert_eq!(contact.phone_number(PhoneNumberKey::HomePhone), Some("111"));

    let home = contact
        .physical_address(PhysicalAddressKey::Home)
        .expect("home address should exist");
    assert_eq!(home.street.as_deref(), Some("123 Street New"));
    assert_eq!(home.city.as_deref(), Some("123 City New"));
    assert_eq!(home.state.as_deref(), Some("123 State"));

    api.delete_items(vec![item_id(&contact)])
        .await
        .expect("deletion should succeed");
}

#[tokio::test]
async fn delete_contact_field() {
    let api = get_client("delete_contact_field").await;

    let ids = api
        .create_contacts(vec![Contact {
            given_name: Some("John".to_string()),
            surname: Some("Smith".to_string()),
            email_addresses: Some(EmailAddresses::from_iter([(
                EmailAddressKey::EmailAddress1,
                "john.smith@gmail.com",
            )])),
            physical_addresses: Some(PhysicalAddresses::from_iter([
                PhysicalAddressEntry {
                    street: Some("123 Street".to_string()),
                    city: Some("123 City".to_string()),
                    state: Some("123 State".to_string()),
                    ..PhysicalAddressEntry::new(PhysicalAddressKey::Business)
                },
                PhysicalAddressEntry {
                    street: Some("321 Street".to_string()),
                    city: Some("321 City".to_string()),
                    state: Some("321 State".to_string()),
                    ..PhysicalAddressEntry::new(PhysicalAddressKey::Home)
                },
            ])),
            ..Default::default()
        }])
        .await
        .expect("creation should succeed");

    let mut changes = ContactChanges::new();
    for path in ["GivenName", "PhysicalAddress:Home", "PhysicalAddress:City:Business"] {
        changes = changes.delete_str(path).expect("path should be valid");
    }

    let updated_id = api
        .update_contact_item(ids[0].clone(), changes)
        .await
        .expect("update should succeed");

    let contact = api
        .get_contact(updated_id)
        .await
        .expect("fetching should succeed")
        .expect("contact should exist");
    api.delete_items(vec![item_id(&contact)])
        .await
        .expect("deletion should succeed");

    let addresses = contact
        .physical_addresses
        .as_ref()
        .expect("addresses should exist");
    assert_eq!(addresses.entries.len(), 1);

    let business = contact
        .physical_address(PhysicalAddressKey::Business)
        .expect("business address should remain");
    assert_eq!(business.city, None);
    assert_eq!(business.street.as_deref(), Some("123 Street"));
    assert_eq!(contact.given_name, None);
}

#[tokio::test]
async fn deleted_contact_is_gone() {
    let api = get_client("deleted_contact_is_gone").await;

    let ids = api
        .create_contacts(vec![john_smith()])
        .await
        .expect("creation should succeed");
    api.delete_items(ids.clone())
        .await
        .expect("deletion should succeed");

    let contact = api
        .get_contact(ids[0].clone())
        .await
        .expect("fetching should succeed");
    assert!(contact.is_none());

    // Deleting again is not an error.
    api.delete_items(ids).await.expect("deletion should succeed");
}
