//! Paths into `tw_schema` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `tw_schema` crate.
///
/// 1. For crates that depend on `tw_schema`, `::tw_schema` is returned.
/// 2. For crates that depend on `tagwire`, `::tagwire::schema` is returned.
/// 3. Otherwise `::tw_schema` is returned, which may be incorrect.
///
/// Reading the manifest is relatively costly, so the path is obtained once
/// per expansion and passed around.
pub(crate) fn tw_schema() -> syn::Path {
    tw_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tw_schema"))
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn value_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::Value
    }
}

#[inline(always)]
pub(crate) fn value_ref_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ValueRef
    }
}

#[inline(always)]
pub(crate) fn value_mut_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ValueMut
    }
}

#[inline(always)]
pub(crate) fn value_kind_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ValueKind
    }
}

#[inline(always)]
pub(crate) fn typed_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::Typed
    }
}

#[inline(always)]
pub(crate) fn blank_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::Blank
    }
}

#[inline(always)]
pub(crate) fn message_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ops::Message
    }
}

#[inline(always)]
pub(crate) fn schema_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ops::Schema
    }
}

#[inline(always)]
pub(crate) fn enum_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::ops::Enum
    }
}

#[inline(always)]
pub(crate) fn field_info_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::info::FieldInfo
    }
}

#[inline(always)]
pub(crate) fn message_type_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::info::MessageType
    }
}

#[inline(always)]
pub(crate) fn schema_registry_(tw_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #tw_schema_path::registry::SchemaRegistry
    }
}
