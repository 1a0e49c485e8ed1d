/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::{Deserialize, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;

use crate::Contact;

pub mod message_xml;
pub use self::message_xml::{MessageXml, MessageXmlElement, ServerBusy};
pub mod response;
pub use self::response::{ResponseClass, ResponseCode, ResponseError, ResponseMessages};

// Requests declare the types namespace as the default namespace of the
// document, so that the (much more numerous) elements from that namespace do
// not need a prefix. Elements from the messages namespace use the `m` prefix.
pub(crate) const MESSAGES_NS_URI: &str =
    "http://schemas.microsoft.com/exchange/services/2006/messages";
pub(crate) const SOAP_NS_URI: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub(crate) const TYPES_NS_URI: &str = "http://schemas.microsoft.com/exchange/services/2006/types";

/// The folder properties which should be included in the response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/foldershape>.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderShape {
    pub base_shape: BaseShape,
}

/// The item properties which should be included in the response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemshape>.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemShape {
    /// The base set of properties to include, which may be extended by other
    /// fields.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/baseshape>
    pub base_shape: BaseShape,

    /// Whether the MIME content of an item should be included.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/includemimecontent>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_mime_content: Option<bool>,

    /// The format in which the item's body should be returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,

    /// A list of properties which should be included in addition to those
    /// implied by other fields.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/additionalproperties>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
}

impl ItemShape {
    /// A shape requesting every property of the items.
    pub fn all_properties() -> Self {
        ItemShape {
            base_shape: BaseShape::AllProperties,
            ..Default::default()
        }
    }
}

/// A list of properties to return on top of the ones implied by a base shape.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AdditionalProperties {
    #[serde(rename = "$value")]
    pub inner: Vec<PathToElement>,
}

/// An identifier for a property on an Exchange entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PathToElement {
    /// An identifier for a property given by a well-known string.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/fielduri>
    FieldURI {
        /// The well-known string, e.g. `contacts:GivenName`.
        #[serde(rename = "@FieldURI")]
        field_uri: String,
    },

    /// An identifier for a specific element of a dictionary-based property.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/indexedfielduri>
    IndexedFieldURI {
        /// The well-known string identifier of the property.
        #[serde(rename = "@FieldURI")]
        field_uri: String,

        /// The member within the dictionary to access.
        #[serde(rename = "@FieldIndex")]
        field_index: String,
    },
}

impl PathToElement {
    pub fn field(field_uri: impl Into<String>) -> Self {
        PathToElement::FieldURI {
            field_uri: field_uri.into(),
        }
    }

    pub fn indexed(field_uri: impl Into<String>, field_index: impl Into<String>) -> Self {
        PathToElement::IndexedFieldURI {
            field_uri: field_uri.into(),
            field_index: field_index.into(),
        }
    }
}

/// The base set of properties to be returned in response to our request.
/// Additional properties may be specified by the parent element.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/baseshape>.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum BaseShape {
    /// Only the IDs of any items or folders returned.
    IdOnly,

    /// The default set of properties for the relevant item or folder.
    ///
    /// The properties returned are dependent on the type of item or folder. See
    /// the EWS documentation for details.
    #[default]
    Default,

    /// All properties of an item or folder.
    AllProperties,
}

/// An identifier for an Exchange folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BaseFolderId {
    /// An identifier for an arbitrary folder.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folderid>.
    FolderId {
        #[serde(rename = "@Id")]
        id: String,

        #[serde(rename = "@ChangeKey", skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
    },

    /// An identifier for referencing a folder by name, e.g. "contacts" or
    /// "msgfolderroot".
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/distinguishedfolderid>.
    DistinguishedFolderId {
        #[serde(rename = "@Id")]
        id: String,

        #[serde(rename = "@ChangeKey", skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
    },
}

impl BaseFolderId {
    /// Refers to a well-known folder by its distinguished name.
    pub fn distinguished(id: impl Into<String>) -> Self {
        BaseFolderId::DistinguishedFolderId {
            id: id.into(),
            change_key: None,
        }
    }
}

impl From<FolderId> for BaseFolderId {
    fn from(value: FolderId) -> Self {
        BaseFolderId::FolderId {
            id: value.id,
            change_key: value.change_key,
        }
    }
}

/// A list of folder identifiers, e.g. the `ParentFolderIds` of a query.
#[derive(Clone, Debug, Serialize)]
pub struct FolderIds {
    #[serde(rename = "$value")]
    pub inner: Vec<BaseFolderId>,
}

impl From<Vec<BaseFolderId>> for FolderIds {
    fn from(inner: Vec<BaseFolderId>) -> Self {
        FolderIds { inner }
    }
}

/// The target folder of an operation which saves items.
#[derive(Clone, Debug, Serialize)]
pub struct TargetFolderId {
    #[serde(rename = "$value")]
    pub inner: BaseFolderId,
}

/// The unique identifier of a folder.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folderid>
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct FolderId {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@ChangeKey", skip_serializing_if = "Option::is_none")]
    pub change_key: Option<String>,
}

/// The manner in which items or folders are deleted.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deletetype>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteType {
    HardDelete,
    #[default]
    MoveToDeletedItems,
    SoftDelete,
}

/// An identifier for an Exchange item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemids>
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BaseItemId {
    /// An identifier for a standard Exchange item.
    ItemId {
        #[serde(rename = "@Id")]
        id: String,

        #[serde(rename = "@ChangeKey", skip_serializing_if = "Option::is_none")]
        change_key: Option<String>,
    },
}

impl From<ItemId> for BaseItemId {
    fn from(value: ItemId) -> Self {
        BaseItemId::ItemId {
            id: value.id,
            change_key: value.change_key,
        }
    }
}

/// A list of item identifiers.
#[derive(Clone, Debug, Serialize)]
pub struct ItemIds {
    #[serde(rename = "$value")]
    pub inner: Vec<BaseItemId>,
}

impl From<Vec<BaseItemId>> for ItemIds {
    fn from(inner: Vec<BaseItemId>) -> Self {
        ItemIds { inner }
    }
}

impl ItemIds {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// The unique identifier of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemid>
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct ItemId {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@ChangeKey", skip_serializing_if = "Option::is_none")]
    pub change_key: Option<String>,
}

/// The representation of a folder in an EWS response.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum Folder {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folder>
    Folder(FolderProperties),

    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/calendarfolder>
    CalendarFolder(FolderProperties),

    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/contactsfolder>
    ContactsFolder(FolderProperties),

    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/searchfolder>
    SearchFolder(FolderProperties),

    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/tasksfolder>
    TasksFolder(FolderProperties),
}

impl Folder {
    pub fn properties(&self) -> &FolderProperties {
        match self {
            Folder::Folder(props)
            | Folder::CalendarFolder(props)
            | Folder::ContactsFolder(props)
            | Folder::SearchFolder(props)
            | Folder::TasksFolder(props) => props,
        }
    }

    pub fn into_properties(self) -> FolderProperties {
        match self {
            Folder::Folder(props)
            | Folder::CalendarFolder(props)
            | Folder::ContactsFolder(props)
            | Folder::SearchFolder(props)
            | Folder::TasksFolder(props) => props,
        }
    }

    pub fn folder_id(&self) -> Option<&FolderId> {
        self.properties().folder_id.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.properties().display_name.as_deref()
    }
}

/// The properties shared by all kinds of folders.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct FolderProperties {
    pub folder_id: Option<FolderId>,
    pub parent_folder_id: Option<FolderId>,
    pub folder_class: Option<String>,
    pub display_name: Option<String>,
    pub total_count: Option<u32>,
    pub child_folder_count: Option<u32>,
    pub unread_count: Option<u32>,
}

/// A collection of information on Exchange folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folders-ex15websvcsotherref>
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Folders {
    #[serde(rename = "$value", default)]
    pub inner: Vec<Folder>,
}

/// An array of items.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Items {
    #[serde(rename = "$value", default)]
    pub inner: Vec<RealItem>,
}

/// An item which may appear as the result of a request to read or modify an
/// Exchange item.
///
/// Only contacts are fully typed. Other kinds of items only expose the
/// properties common to all items, which lets queries against folders of
/// mixed content succeed.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/items>
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum RealItem {
    Item(Item),
    Message(Item),
    CalendarItem(Item),
    Contact(Contact),
    DistributionList(Item),
    MeetingMessage(Item),
    MeetingRequest(Item),
    MeetingResponse(Item),
    MeetingCancellation(Item),
    Task(Item),
    PostItem(Item),
}

impl RealItem {
    /// The identifier of this item, if the server included it.
    pub fn item_id(&self) -> Option<&ItemId> {
        use RealItem::*;
        match self {
            Contact(contact) => contact.item_id.as_ref(),
            Item(item)
            | Message(item)
            | CalendarItem(item)
            | DistributionList(item)
            | MeetingMessage(item)
            | MeetingRequest(item)
            | MeetingResponse(item)
            | MeetingCancellation(item)
            | Task(item)
            | PostItem(item) => item.item_id.as_ref(),
        }
    }

    /// Takes ownership of the inner [`Contact`], if this item is one.
    pub fn into_contact(self) -> Option<Contact> {
        match self {
            RealItem::Contact(contact) => Some(contact),
            _ => None,
        }
    }
}

/// The properties common to every kind of item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/item>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
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
}

/// A date and time with second precision.
// `time` provides an `Option<OffsetDateTime>` deserializer, but it does not
// work with map fields which may be omitted, as in our case.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DateTime(#[serde(with = "time::serde::iso8601")] pub time::OffsetDateTime);

impl Serialize for DateTime {
    // `time`'s own ISO 8601 serializer writes six-digit years, which Exchange
    // rejects as an invalid `xs:dateTime`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self
            .0
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&formatted)
    }
}

/// A list of strings, e.g. the categories of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/categories-ex15websvcsotherref>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ArrayOfStrings {
    #[serde(rename = "String", default)]
    pub strings: Vec<String>,
}

impl<S: Into<String>> FromIterator<S> for ArrayOfStrings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ArrayOfStrings {
            strings: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The priority level of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/importance>
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Importance {
    Low,
    Normal,
    High,
}

/// The sensitivity of the contents of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/sensitivity>
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Sensitivity {
    Normal,
    Personal,
    Private,
    Confidential,
}

/// The body of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/body>
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Body {
    /// The content type of the body.
    #[serde(rename = "@BodyType")]
    pub body_type: BodyType,

    /// Whether the body has been truncated.
    #[serde(rename = "@IsTruncated", skip_serializing_if = "Option::is_none")]
    pub is_truncated: Option<bool>,

    /// The content of the body.
    // Empty bodies are returned as self-closing elements.
    #[serde(rename = "$text", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Body {
    pub fn text(content: impl Into<String>) -> Self {
        Body {
            body_type: BodyType::Text,
            is_truncated: None,
            content: Some(content.into()),
        }
    }
}

/// The content type of an item's body.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/body>
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum BodyType {
    HTML,
    Text,
}

/// The paging or filtering view applied to a `FindItem` query.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/indexedpageitemview>
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/contactsview>
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum View {
    /// Describes how paged item information is returned.
    #[serde(rename = "m:IndexedPageItemView")]
    IndexedPageItemView {
        /// The maximum number of items to return in a single page.
        #[serde(
            rename = "@MaxEntriesReturned",
            skip_serializing_if = "Option::is_none"
        )]
        max_entries_returned: Option<usize>,

        /// The offset from the base point at which the page starts.
        #[serde(rename = "@Offset")]
        offset: usize,

        #[serde(rename = "@BasePoint")]
        base_point: BasePoint,
    },

    /// Restricts a query in a contacts folder to a range of display names.
    #[serde(rename = "m:ContactsView")]
    ContactsView {
        #[serde(
            rename = "@MaxEntriesReturned",
            skip_serializing_if = "Option::is_none"
        )]
        max_entries_returned: Option<usize>,

        #[serde(rename = "@InitialName", skip_serializing_if = "Option::is_none")]
        initial_name: Option<String>,

        #[serde(rename = "@FinalName", skip_serializing_if = "Option::is_none")]
        final_name: Option<String>,
    },
}

/// Whether a paged view starts from the beginning or the end of the results.
/// Seeking from the end always searches backward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum BasePoint {
    #[default]
    Beginning,
    End,
}
