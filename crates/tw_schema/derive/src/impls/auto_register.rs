use proc_macro2::TokenStream;

use crate::derive_data::SchemaDerive;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(derive: &SchemaDerive) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = derive.attrs.auto_register else {
        return TokenStream::new();
    };
    // A generic type has no single `TypeId` to register.
    if derive.impl_with_generic() {
        return TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(&derive.tw_schema_path);
    let ident = derive.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &SchemaDerive) -> TokenStream {
    TokenStream::new()
}
