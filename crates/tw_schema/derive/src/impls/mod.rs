//! Code generation for `#[derive(Schema)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{SchemaData, SchemaDerive};

use auto_register::get_auto_register_impl;

pub(crate) fn impl_schema(derive: &SchemaDerive) -> TokenStream {
    let kind_tokens = match &derive.data {
        SchemaData::Struct(fields) => struct_kind::impl_struct(derive, fields),
        SchemaData::Enum(variants) => enum_kind::impl_enum(derive, variants),
    };
    let auto_register_tokens = get_auto_register_impl(derive);

    quote! {
        const _: () = {
            #kind_tokens
            #auto_register_tokens
        };
    }
}

/// The `where` clause of every generated impl.
///
/// Type parameters must be `Send + Sync + 'static` for the type to be a
/// `Value`; `extra` adds per-field bounds.
fn where_clause_tokens(derive: &SchemaDerive, extra: &[TokenStream]) -> TokenStream {
    let existing: Vec<_> = derive
        .generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .collect();
    let params: Vec<_> = derive
        .generics
        .type_params()
        .map(|param| {
            let ident = &param.ident;
            quote!(#ident: ::core::marker::Send + ::core::marker::Sync + 'static)
        })
        .collect();

    if existing.is_empty() && params.is_empty() && extra.is_empty() {
        return TokenStream::new();
    }

    quote! {
        where #(#existing,)* #(#params,)* #(#extra,)*
    }
}

/// `Value` implementation viewing `Self` as `view` (`Message` or `Enum`).
fn impl_trait_value(derive: &SchemaDerive, where_clause: &TokenStream, view: TokenStream) -> TokenStream {
    let tw_schema_path = &derive.tw_schema_path;
    let value_ = crate::path::value_(tw_schema_path);
    let value_ref_ = crate::path::value_ref_(tw_schema_path);
    let value_mut_ = crate::path::value_mut_(tw_schema_path);

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();

    quote! {
        impl #impl_generics #value_ for #ident #ty_generics #where_clause {
            #[inline]
            fn value_ref(&self) -> #value_ref_<'_> {
                #value_ref_::#view(self)
            }

            #[inline]
            fn value_mut(&mut self) -> #value_mut_<'_> {
                #value_mut_::#view(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }
    }
}
