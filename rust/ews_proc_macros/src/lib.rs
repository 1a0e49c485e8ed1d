/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Ident, ItemStruct};

/// Marks a request struct as an EWS operation whose response carries messages
/// of the given type.
///
/// The generated response struct is named by appending "Response" to the name
/// of the annotated struct, and the operation and response element names are
/// derived from the same identifiers. For example:
///
/// ```ignore
/// #[operation_response(GetItemResponseMessage)]
/// pub struct GetItem { .. }
/// ```
///
/// generates `GetItemResponse`, implements `Operation` for `GetItem` and
/// `OperationResponse` for `GetItemResponse`.
#[proc_macro_attribute]
pub fn operation_response(attr: TokenStream, annotated_item: TokenStream) -> TokenStream {
    let message_type = parse_macro_input!(attr as Ident);
    let request = parse_macro_input!(annotated_item as ItemStruct);

    let request_name = request.ident.clone();
    let response_name = Ident::new(&format!("{request_name}Response"), request_name.span());

    let response_doc = format!(
        r#"A response to a [`{request_name}`] operation.

See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/{}>"#,
        response_name.to_string().to_ascii_lowercase()
    );

    let expanded = quote! {
        #request

        impl crate::Operation for #request_name {
            type Response = #response_name;
            const NAME: &'static str = stringify!(#request_name);
        }

        #[doc = #response_doc]
        #[derive(Clone, Debug, serde::Deserialize, PartialEq, Eq)]
        #[serde(rename_all = "PascalCase")]
        pub struct #response_name {
            pub response_messages: crate::ResponseMessages<#message_type>,
        }

        impl crate::OperationResponse for #response_name {
            type Message = #message_type;
            const NAME: &'static str = stringify!(#response_name);

            fn response_messages(&self) -> &[crate::ResponseClass<Self::Message>] {
                self.response_messages.response_messages.as_slice()
            }

            fn into_response_messages(self) -> Vec<crate::ResponseClass<Self::Message>> {
                self.response_messages.response_messages
            }
        }
    };

    TokenStream::from(expanded)
}
