use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::{impl_trait_value, where_clause_tokens};
use crate::derive_data::SchemaDerive;
use crate::path;

/// Implement `Value`, `Enum`, `Typed` and `Blank` for a fieldless enum.
pub(crate) fn impl_enum(derive: &SchemaDerive, variants: &[&Ident]) -> TokenStream {
    let tw_schema_path = &derive.tw_schema_path;
    let value_kind_ = path::value_kind_(tw_schema_path);
    let typed_ = path::typed_(tw_schema_path);
    let blank_ = path::blank_(tw_schema_path);
    let enum_ = path::enum_(tw_schema_path);

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();
    let where_clause = where_clause_tokens(derive, &[]);

    let value_tokens = impl_trait_value(derive, &where_clause, quote!(Enum));

    let indices: Vec<u32> = (0..variants.len())
        .map(|index| u32::try_from(index).unwrap_or(u32::MAX))
        .collect();
    let names: Vec<String> = variants.iter().map(ToString::to_string).collect();
    let variant_len = u32::try_from(variants.len()).unwrap_or(u32::MAX);
    // Non-empty, checked while parsing.
    let first = variants[0];

    quote! {
        #value_tokens

        impl #impl_generics #enum_ for #ident #ty_generics #where_clause {
            fn variant_index(&self) -> u32 {
                match self {
                    #(Self::#variants => #indices,)*
                }
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            #[inline]
            fn variant_len(&self) -> u32 {
                #variant_len
            }

            fn set_variant_index(&mut self, index: u32) -> bool {
                match index {
                    #(#indices => {
                        *self = Self::#variants;
                        true
                    })*
                    _ => false,
                }
            }
        }

        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            #[inline]
            fn kind() -> #value_kind_ {
                #value_kind_::Enum(::core::any::type_name::<Self>())
            }
        }

        impl #impl_generics #blank_ for #ident #ty_generics #where_clause {
            #[inline]
            fn blank() -> Self {
                Self::#first
            }
        }
    }
}
