//! Derive macros for uiscope.
//!
//! - `#[derive(CustomAction)]` - implements `uiscope::CustomAction`

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod custom_action;

/// Derive macro for implementing the `CustomAction` trait.
///
/// The action type string defaults to `"<module path>/<TypeName>"`. Override
/// it with `#[action(name = "...")]`:
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize, CustomAction)]
/// #[action(name = "my_app/SELECT_ROW")]
/// struct SelectRow { index: usize }
/// ```
#[proc_macro_derive(CustomAction, attributes(action))]
pub fn derive_custom_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    custom_action::derive_custom_action_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
