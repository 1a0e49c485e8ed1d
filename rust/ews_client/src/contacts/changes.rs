/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews::{
    update_item::{DeleteItemField, ItemChangeDescription, SetItemField, Updates},
    Contact, ContactField, ContactFieldPath, Dictionary, PhysicalAddressField, PhysicalAddresses,
    RealItem,
};

use crate::EwsClientError;

/// A set of changes to apply to a single contact.
///
/// ```
/// # use ews::{Contact, ContactField};
/// # use ews_client::ContactChanges;
/// let changes = ContactChanges::new()
///     .set(Contact {
///         given_name: Some("Jane".to_string()),
///         ..Default::default()
///     })
///     .delete(ContactField::Nickname)
///     .delete_str("PhysicalAddress:City:Business")?;
/// assert_eq!(changes.len(), 3);
/// # Ok::<(), ews_client::EwsClientError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContactChanges {
    updates: Vec<ItemChangeDescription>,
}

/// Queues one update per simple field set on `$contact`, each carrying a
/// contact with only that field.
macro_rules! set_simple_fields {
    ($changes:ident, $contact:ident, { $($field:ident => $variant:ident),+ $(,)? }) => {
        $(
            if let Some(value) = $contact.$field.take() {
                $changes.push_set(
                    ContactField::$variant.into(),
                    Contact {
                        $field: Some(value),
                        ..Default::default()
                    },
                );
            }
        )+
    };
}

impl ContactChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets every field present on `contact`.
    ///
    /// Dictionary entries are set individually, so entries under other keys
    /// are left untouched. Physical addresses are set one component at a
    /// time, leaving components absent from `contact` as they are.
    pub fn set(mut self, mut contact: Contact) -> Self {
        set_simple_fields!(self, contact, {
            item_class => ItemClass,
            subject => Subject,
            sensitivity => Sensitivity,
            body => Body,
            categories => Categories,
            importance => Importance,
            file_as => FileAs,
            display_name => DisplayName,
            given_name => GivenName,
            initials => Initials,
            middle_name => MiddleName,
            nickname => Nickname,
            company_name => CompanyName,
            assistant_name => AssistantName,
            birthday => Birthday,
            business_home_page => BusinessHomePage,
            department => Department,
            generation => Generation,
            job_title => JobTitle,
            manager => Manager,
            office_location => OfficeLocation,
            profession => Profession,
            spouse_name => SpouseName,
            surname => Surname,
        });

        for entry in contact.email_addresses.take().into_iter().flat_map(|d| d.entries) {
            self.push_set(
                ContactFieldPath::EmailAddress(entry.key),
                Contact {
                    email_addresses: Some(Dictionary {
                        entries: vec![entry],
                    }),
                    ..Default::default()
                },
            );
        }

        for entry in contact.phone_numbers.take().into_iter().flat_map(|d| d.entries) {
            self.push_set(
                ContactFieldPath::PhoneNumber(entry.key),
                Contact {
                    phone_numbers: Some(Dictionary {
                        entries: vec![entry],
                    }),
                    ..Default::default()
                },
            );
        }

        for entry in contact.im_addresses.take().into_iter().flat_map(|d| d.entries) {
            self.push_set(
                ContactFieldPath::ImAddress(entry.key),
                Contact {
                    im_addresses: Some(Dictionary {
                        entries: vec![entry],
                    }),
                    ..Default::default()
                },
            );
        }

        for entry in contact
            .physical_addresses
            .take()
            .into_iter()
            .flat_map(|addresses| addresses.entries)
        {
            for field in PhysicalAddressField::ALL {
                if entry.field(*field).is_none() {
                    continue;
                }

                self.push_set(
                    ContactFieldPath::PhysicalAddressField(*field, entry.key),
                    Contact {
                        physical_addresses: Some(PhysicalAddresses::from_iter([
                            entry.only(*field)
                        ])),
                        ..Default::default()
                    },
                );
            }
        }

        self
    }

    /// Clears the field(s) named by `path`.
    pub fn delete(mut self, path: impl Into<ContactFieldPath>) -> Self {
        self.updates.extend(path.into().to_paths().into_iter().map(|path| {
            ItemChangeDescription::DeleteItemField(DeleteItemField { path })
        }));

        self
    }

    /// Clears the field(s) named by a path such as `GivenName` or
    /// `PhysicalAddress:City:Business`.
    pub fn delete_str(self, path: &str) -> Result<Self, EwsClientError> {
        let path: ContactFieldPath = path
            .parse()
            .map_err(|_| EwsClientError::InvalidFieldPath(path.to_owned()))?;

        Ok(self.delete(path))
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub(crate) fn into_updates(self) -> Updates {
        Updates {
            inner: self.updates,
        }
    }

    fn push_set(&mut self, path: ContactFieldPath, contact: Contact) {
        for path in path.to_paths() {
            self.updates
                .push(ItemChangeDescription::SetItemField(SetItemField {
                    path,
                    item: RealItem::Contact(contact.clone()),
                }));
        }
    }
}
