use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_value, where_clause_tokens};
use crate::derive_data::{SchemaDerive, SchemaField};
use crate::path;

/// Implement `Value`, `Message`, `Typed`, `Blank` and `Schema` for a struct.
pub(crate) fn impl_struct(derive: &SchemaDerive, fields: &[SchemaField]) -> TokenStream {
    let tw_schema_path = &derive.tw_schema_path;
    let value_ = path::value_(tw_schema_path);
    let value_kind_ = path::value_kind_(tw_schema_path);
    let typed_ = path::typed_(tw_schema_path);
    let blank_ = path::blank_(tw_schema_path);
    let message_ = path::message_(tw_schema_path);
    let schema_ = path::schema_(tw_schema_path);
    let field_info_ = path::field_info_(tw_schema_path);
    let message_type_ = path::message_type_(tw_schema_path);
    let schema_registry_ = path::schema_registry_(tw_schema_path);

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();

    let active: Vec<&SchemaField> = fields.iter().filter(|field| !field.attrs.skip).collect();

    let bounds: Vec<TokenStream> = if derive.impl_with_generic() {
        fields
            .iter()
            .map(|field| {
                let ty = field.ty;
                if field.attrs.skip {
                    quote!(#ty: ::core::default::Default)
                } else {
                    quote!(#ty: #typed_ + #blank_)
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let where_clause = where_clause_tokens(derive, &bounds);

    // trait: Value
    let value_tokens = impl_trait_value(derive, &where_clause, quote!(Message));

    // trait: Message
    let indices: Vec<usize> = (0..active.len()).collect();
    let members: Vec<_> = active.iter().map(|field| &field.member).collect();
    let field_len = active.len();

    let message_tokens = quote! {
        impl #impl_generics #message_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_message_type(&self) -> #message_type_ {
                <Self as #schema_>::message_type()
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn #value_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#members as &dyn #value_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #value_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#members as &mut dyn #value_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    };

    // trait: Typed
    let typed_tokens = quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            #[inline]
            fn kind() -> #value_kind_ {
                #value_kind_::Message(::core::any::type_name::<Self>())
            }

            #[inline]
            fn register_into(registry: &#schema_registry_) {
                registry.register::<Self>();
            }
        }
    };

    // trait: Blank
    let inits = fields.iter().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        if field.attrs.skip {
            quote!(#member: <#ty as ::core::default::Default>::default())
        } else {
            quote!(#member: <#ty as #blank_>::blank())
        }
    });

    let blank_tokens = quote! {
        impl #impl_generics #blank_ for #ident #ty_generics #where_clause {
            fn blank() -> Self {
                Self {
                    #(#inits,)*
                }
            }
        }
    };

    // trait: Schema
    let field_infos = active.iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        match field.attrs.tag {
            Some(tag) => quote!(#field_info_::new::<#ty>(#name).with_tag(#tag)),
            None => quote!(#field_info_::new::<#ty>(#name)),
        }
    });
    let field_types = active.iter().map(|field| field.ty);
    let registry = if active.is_empty() {
        quote!(_registry)
    } else {
        quote!(registry)
    };

    let schema_tokens = quote! {
        impl #impl_generics #schema_ for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#field_info_> {
                ::std::vec![#(#field_infos),*]
            }

            fn register_dependencies(#registry: &#schema_registry_) {
                #(<#field_types as #typed_>::register_into(registry);)*
            }
        }
    };

    quote! {
        #value_tokens
        #message_tokens
        #typed_tokens
        #blank_tokens
        #schema_tokens
    }
}
