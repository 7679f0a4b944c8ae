use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitInt};

use crate::SCHEMA_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the type, `#[schema(auto_register)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SCHEMA_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    if this.auto_register.is_some() {
                        return Err(meta.error("duplicate `auto_register`"));
                    }
                    this.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unknown type attribute, expected `auto_register`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a field, `#[schema(skip)]` and `#[schema(tag = N)]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub tag: Option<u32>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SCHEMA_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else if meta.path.is_ident("tag") {
                    if this.tag.is_some() {
                        return Err(meta.error("duplicate `tag`"));
                    }
                    let lit: LitInt = meta.value()?.parse()?;
                    this.tag = Some(lit.base10_parse::<u32>()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute, expected `skip` or `tag = N`"))
                }
            })?;
        }

        if this.skip && this.tag.is_some() {
            return Err(syn::Error::new(
                Span::call_site(),
                "a skipped field cannot have a `tag`",
            ));
        }

        Ok(this)
    }
}
