/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    ArrayOfStrings, Body, DateTime, Error, FolderId, Importance, ItemId, PathToElement,
    Sensitivity,
};

/// A contact item.
///
/// Fields are declared in the order of the `ContactItemType` schema, which
/// EWS enforces when validating requests.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/contact>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(skip_serializing)]
    pub item_id: Option<ItemId>,

    #[serde(skip_serializing)]
    pub parent_folder_id: Option<FolderId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<ArrayOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,

    #[serde(skip_serializing)]
    pub date_time_created: Option<DateTime>,

    #[serde(skip_serializing)]
    pub last_modified_time: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_as: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_addresses: Option<PhysicalAddresses>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_home_page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub im_addresses: Option<ImAddresses>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(skip_serializing)]
    pub has_picture: Option<bool>,
}

impl Contact {
    /// The email address stored under `key`, if any.
    pub fn email_address(&self, key: EmailAddressKey) -> Option<&str> {
        self.email_addresses.as_ref()?.get(key)
    }

    /// The phone number stored under `key`, if any.
    pub fn phone_number(&self, key: PhoneNumberKey) -> Option<&str> {
        self.phone_numbers.as_ref()?.get(key)
    }

    /// The instant messaging address stored under `key`, if any.
    pub fn im_address(&self, key: ImAddressKey) -> Option<&str> {
        self.im_addresses.as_ref()?.get(key)
    }

    /// The postal address stored under `key`, if any.
    pub fn physical_address(&self, key: PhysicalAddressKey) -> Option<&PhysicalAddressEntry> {
        self.physical_addresses.as_ref()?.get(key)
    }
}

/// A list of `Entry` elements, each holding a single string value under a key.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Dictionary<K> {
    #[serde(rename = "Entry", default = "Vec::new")]
    pub entries: Vec<DictionaryEntry<K>>,
}

impl<K> Default for Dictionary<K> {
    fn default() -> Self {
        Dictionary {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Copy> Dictionary<K> {
    /// The value stored under `key`, if any.
    pub fn get(&self, key: K) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

impl<K, V: Into<String>> FromIterator<(K, V)> for Dictionary<K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary {
            entries: iter
                .into_iter()
                .map(|(key, value)| DictionaryEntry {
                    key,
                    value: value.into(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DictionaryEntry<K> {
    #[serde(rename = "@Key")]
    pub key: K,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/emailaddresses>
pub type EmailAddresses = Dictionary<EmailAddressKey>;

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/phonenumbers>
pub type PhoneNumbers = Dictionary<PhoneNumberKey>;

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/imaddresses>
pub type ImAddresses = Dictionary<ImAddressKey>;

/// The postal addresses of a contact.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/physicaladdresses>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PhysicalAddresses {
    #[serde(rename = "Entry", default)]
    pub entries: Vec<PhysicalAddressEntry>,
}

impl PhysicalAddresses {
    pub fn get(&self, key: PhysicalAddressKey) -> Option<&PhysicalAddressEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}

impl FromIterator<PhysicalAddressEntry> for PhysicalAddresses {
    fn from_iter<I: IntoIterator<Item = PhysicalAddressEntry>>(iter: I) -> Self {
        PhysicalAddresses {
            entries: iter.into_iter().collect(),
        }
    }
}

/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-physicaladdress>
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicalAddressEntry {
    #[serde(rename = "@Key")]
    pub key: PhysicalAddressKey,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_or_region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl PhysicalAddressEntry {
    /// An entry with no fields set.
    pub fn new(key: PhysicalAddressKey) -> Self {
        PhysicalAddressEntry {
            key,
            street: None,
            city: None,
            state: None,
            country_or_region: None,
            postal_code: None,
        }
    }

    pub fn field(&self, field: PhysicalAddressField) -> Option<&str> {
        match field {
            PhysicalAddressField::Street => self.street.as_deref(),
            PhysicalAddressField::City => self.city.as_deref(),
            PhysicalAddressField::State => self.state.as_deref(),
            PhysicalAddressField::CountryOrRegion => self.country_or_region.as_deref(),
            PhysicalAddressField::PostalCode => self.postal_code.as_deref(),
        }
    }

    /// Gets a copy of this entry with only `field` set.
    pub fn only(&self, field: PhysicalAddressField) -> Self {
        let mut entry = PhysicalAddressEntry::new(self.key);
        let value = self.field(field).map(str::to_owned);

        match field {
            PhysicalAddressField::Street => entry.street = value,
            PhysicalAddressField::City => entry.city = value,
            PhysicalAddressField::State => entry.state = value,
            PhysicalAddressField::CountryOrRegion => entry.country_or_region = value,
            PhysicalAddressField::PostalCode => entry.postal_code = value,
        }

        entry
    }
}

/// Declares a fieldless enum whose variant names double as their string
/// representation in EWS documents and in contact field paths.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    _ => Err(Error::UnknownFieldPath(s.to_owned())),
                }
            }
        }
    };
}

named_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-emailaddress>
    EmailAddressKey {
        EmailAddress1,
        EmailAddress2,
        EmailAddress3,
    }
}

named_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-phonenumber>
    PhoneNumberKey {
        AssistantPhone,
        BusinessFax,
        BusinessPhone,
        BusinessPhone2,
        Callback,
        CarPhone,
        CompanyMainPhone,
        HomeFax,
        HomePhone,
        HomePhone2,
        Isdn,
        MobilePhone,
        OtherFax,
        OtherTelephone,
        Pager,
        PrimaryPhone,
        RadioPhone,
        Telex,
        TtyTddPhone,
    }
}

named_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-imaddress>
    ImAddressKey {
        ImAddress1,
        ImAddress2,
        ImAddress3,
    }
}

named_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-physicaladdress>
    PhysicalAddressKey {
        Home,
        Business,
        Other,
    }
}

named_enum! {
    /// A component of a postal address.
    PhysicalAddressField {
        Street,
        City,
        State,
        CountryOrRegion,
        PostalCode,
    }
}

impl PhysicalAddressField {
    pub fn field_uri(&self) -> String {
        format!("contacts:PhysicalAddress:{}", self.as_str())
    }
}

named_enum! {
    /// A single-valued property of a contact which can be updated or deleted.
    ContactField {
        ItemClass,
        Subject,
        Sensitivity,
        Body,
        Categories,
        Importance,
        FileAs,
        DisplayName,
        GivenName,
        Initials,
        MiddleName,
        Nickname,
        CompanyName,
        AssistantName,
        Birthday,
        BusinessHomePage,
        Department,
        Generation,
        JobTitle,
        Manager,
        OfficeLocation,
        Profession,
        SpouseName,
        Surname,
    }
}

impl ContactField {
    /// The `FieldURI` identifying this property, e.g. `contacts:GivenName`.
    pub fn field_uri(&self) -> String {
        use ContactField::*;

        let prefix = match self {
            ItemClass | Subject | Sensitivity | Body | Categories | Importance => "item",
            _ => "contacts",
        };

        format!("{prefix}:{}", self.as_str())
    }
}

/// Identifies the part of a contact touched by an update.
///
/// Paths can be parsed from a colon-separated syntax:
///
/// - `GivenName` for a single-valued property;
/// - `EmailAddress:EmailAddress1`, `PhoneNumber:HomePhone` or
///   `ImAddress:ImAddress1` for one entry of a dictionary;
/// - `PhysicalAddress:Home` for a whole postal address;
/// - `PhysicalAddress:City:Business` for one component of a postal address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactFieldPath {
    Field(ContactField),
    EmailAddress(EmailAddressKey),
    PhoneNumber(PhoneNumberKey),
    ImAddress(ImAddressKey),
    PhysicalAddress(PhysicalAddressKey),
    PhysicalAddressField(PhysicalAddressField, PhysicalAddressKey),
}

impl ContactFieldPath {
    /// The EWS property paths this path stands for.
    ///
    /// A whole postal address has no property path of its own, so it expands
    /// to one path per component.
    pub fn to_paths(&self) -> Vec<PathToElement> {
        match self {
            ContactFieldPath::Field(field) => vec![PathToElement::field(field.field_uri())],
            ContactFieldPath::EmailAddress(key) => {
                vec![PathToElement::indexed("contacts:EmailAddress", key.as_str())]
            }
            ContactFieldPath::PhoneNumber(key) => {
                vec![PathToElement::indexed("contacts:PhoneNumber", key.as_str())]
            }
            ContactFieldPath::ImAddress(key) => {
                vec![PathToElement::indexed("contacts:ImAddress", key.as_str())]
            }
            ContactFieldPath::PhysicalAddress(key) => PhysicalAddressField::ALL
                .iter()
                .map(|field| PathToElement::indexed(field.field_uri(), key.as_str()))
                .collect(),
            ContactFieldPath::PhysicalAddressField(field, key) => {
                vec![PathToElement::indexed(field.field_uri(), key.as_str())]
            }
        }
    }
}

impl From<ContactField> for ContactFieldPath {
    fn from(value: ContactField) -> Self {
        ContactFieldPath::Field(value)
    }
}

impl FromStr for ContactFieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = |_| Error::UnknownFieldPath(s.to_owned());
        let parts: Vec<&str> = s.split(':').collect();

        let path = match parts.as_slice() {
            [field] => ContactFieldPath::Field(field.parse().map_err(unknown)?),
            ["EmailAddress", key] => ContactFieldPath::EmailAddress(key.parse().map_err(unknown)?),
            ["PhoneNumber", key] => ContactFieldPath::PhoneNumber(key.parse().map_err(unknown)?),
            ["ImAddress", key] => ContactFieldPath::ImAddress(key.parse().map_err(unknown)?),
            ["PhysicalAddress", key] => {
                ContactFieldPath::PhysicalAddress(key.parse().map_err(unknown)?)
            }
            ["PhysicalAddress", field, key] => ContactFieldPath::PhysicalAddressField(
                field.parse().map_err(unknown)?,
                key.parse().map_err(unknown)?,
            ),
            _ => return Err(Error::UnknownFieldPath(s.to_owned())),
        };

        Ok(path)
    }
}
