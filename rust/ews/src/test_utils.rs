/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use quick_xml::{de::Deserializer, se::to_string_with_root};
use serde::{Deserialize, Serialize};

/// Assert the expected result of XML serialization.
pub fn assert_serialized_content<T: Serialize>(
    data: &T,
    root_tag_name: &str,
    expected_xml_content: &str,
) {
    let actual_xml_content = to_string_with_root(root_tag_name, data).unwrap();

    assert_eq!(actual_xml_content, expected_xml_content);
}

/// Assert the expected result of XML deserialization.
pub fn assert_deserialized_content<T>(content: &str, expected: T)
where
    T: for<'a> Deserialize<'a> + Eq + std::fmt::Debug,
{
    let mut deserializer = Deserializer::from_reader(content.as_bytes());
    let deserialized_data: T = serde_path_to_error::deserialize(&mut deserializer).unwrap();
    assert_eq!(deserialized_data, expected);
}
