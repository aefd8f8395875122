//! `#[derive(Declared)]` for typedecl.
//!
//! ```ignore
//! #[derive(Debug, Declared)]
//! pub struct FlagStruct {
//!     #[typedecl(identifier)]
//!     pub name: &'static str,
//!     pub default_on: bool,
//! }
//! ```
//!
//! - A named struct with one `#[typedecl(identifier)]` field is identified by
//!   that field. More than one tagged field is a compile error.
//! - A single-field tuple struct encodes as its inner value, so
//!   `Level("low")` compares equal to a declaration written `Level("low")`.
//! - Everything else encodes with its `Debug` output.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident};

const TAG: &str = "typedecl";
const IDENTIFIER: &str = "identifier";

#[proc_macro_derive(Declared, attributes(typedecl))]
pub fn derive_declared(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let mut tagged: Vec<&Ident> = Vec::new();
                for field in &fields.named {
                    if is_identifier(&field.attrs)? {
                        if let Some(ident) = &field.ident {
                            tagged.push(ident);
                        }
                    }
                }
                match tagged.as_slice() {
                    [] => debug_repr(),
                    [ident] => {
                        let field_name = ident.to_string();
                        let repr = debug_repr();
                        quote! {
                            fn identifier(&self) -> ::core::option::Option<::typedecl_core::Identifier<'_>> {
                                ::core::option::Option::Some(::typedecl_core::Identifier::new(#field_name, &self.#ident))
                            }

                            #repr
                        }
                    }
                    [_, second, ..] => {
                        return Err(syn::Error::new_spanned(
                            second,
                            "only one field may be tagged #[typedecl(identifier)]",
                        ))
                    }
                }
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                for field in &fields.unnamed {
                    if is_identifier(&field.attrs)? {
                        return Err(syn::Error::new_spanned(
                            field,
                            "#[typedecl(identifier)] is only supported on named fields",
                        ));
                    }
                }
                quote! {
                    fn repr(&self) -> ::std::string::String {
                        ::std::format!("{:?}", self.0)
                    }
                }
            }
            _ => debug_repr(),
        },
        Data::Enum(_) => debug_repr(),
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Declared cannot be derived for unions",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::typedecl_core::Declared for #name #ty_generics #where_clause {
            #body
        }
    })
}

fn debug_repr() -> TokenStream2 {
    quote! {
        fn repr(&self) -> ::std::string::String {
            ::std::format!("{:?}", self)
        }
    }
}

fn is_identifier(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs {
        if !attr.path().is_ident(TAG) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(IDENTIFIER) {
                found = true;
                Ok(())
            } else {
                Err(meta.error("unsupported typedecl attribute, expected `identifier`"))
            }
        })?;
    }
    Ok(found)
}
