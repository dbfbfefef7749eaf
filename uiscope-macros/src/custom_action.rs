//! `#[derive(CustomAction)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, LitStr};

/// Arguments collected from `#[action(...)]` attributes.
#[derive(Default)]
struct ActionArgs {
    name: Option<LitStr>,
}

impl ActionArgs {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = ActionArgs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("action")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(meta.error("action name must not be empty"));
                    }
                    args.name = Some(lit);
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute, expected `name`"))
                }
            })?;
        }
        Ok(args)
    }
}

/// Expand `#[derive(CustomAction)]` for `input`.
pub fn derive_custom_action_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let args = ActionArgs::from_attrs(&input.attrs)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let type_string = match args.name {
        Some(lit) => quote! { #lit },
        None => quote! { ::core::concat!(::core::module_path!(), "/", ::core::stringify!(#name)) },
    };

    Ok(quote! {
        impl #impl_generics ::uiscope::CustomAction for #name #ty_generics #where_clause {
            const TYPE: &'static str = #type_string;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn explicit_name_is_used_verbatim() {
        let input: DeriveInput = parse_quote! {
            #[action(name = "table/SELECT_ROW")]
            struct SelectRow { index: usize }
        };
        let tokens = derive_custom_action_impl(&input).unwrap().to_string();
        assert!(tokens.contains("\"table/SELECT_ROW\""));
        assert!(!tokens.contains("module_path"));
    }

    #[test]
    fn default_name_is_module_qualified() {
        let input: DeriveInput = parse_quote! {
            struct ClearSelection;
        };
        let tokens = derive_custom_action_impl(&input).unwrap().to_string();
        assert!(tokens.contains("module_path"));
        assert!(tokens.contains("ClearSelection"));
    }

    #[test]
    fn rejects_unknown_and_empty_arguments() {
        let unknown: DeriveInput = parse_quote! {
            #[action(kind = "x")]
            struct A;
        };
        assert!(derive_custom_action_impl(&unknown).is_err());

        let empty: DeriveInput = parse_quote! {
            #[action(name = "")]
            struct B;
        };
        assert!(derive_custom_action_impl(&empty).is_err());
    }
}
