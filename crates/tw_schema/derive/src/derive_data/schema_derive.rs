use syn::{Data, DeriveInput, Fields, Generics, Ident, Member, Type};

use crate::derive_data::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// SchemaField

/// One struct field, serialized or skipped.
pub(crate) struct SchemaField<'a> {
    pub member: Member,
    /// The name recorded in `FieldInfo`, the index for tuple fields.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// SchemaData

pub(crate) enum SchemaData<'a> {
    Struct(Vec<SchemaField<'a>>),
    /// Variant identifiers in declaration order.
    Enum(Vec<&'a Ident>),
}

// -----------------------------------------------------------------------------
// SchemaDerive

pub(crate) struct SchemaDerive<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub tw_schema_path: syn::Path,
    pub data: SchemaData<'a>,
}

impl<'a> SchemaDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let data = match &input.data {
            Data::Struct(data) => SchemaData::Struct(Self::collect_fields(&data.fields)?),
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`Schema` cannot be derived for an enum without variants",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            "`Schema` enums must be fieldless",
                        ));
                    }
                    variants.push(&variant.ident);
                }
                SchemaData::Enum(variants)
            }
            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "`Schema` cannot be derived for unions",
                ));
            }
        };

        if let (SchemaData::Enum(_), Some(span)) = (&data, attrs.auto_register) {
            return Err(syn::Error::new(
                span,
                "`auto_register` only applies to structs",
            ));
        }

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            tw_schema_path: crate::path::tw_schema(),
            data,
        })
    }

    fn collect_fields(fields: &'a Fields) -> syn::Result<Vec<SchemaField<'a>>> {
        let mut out = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let (member, name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (Member::Unnamed(index.into()), index.to_string()),
            };
            out.push(SchemaField {
                member,
                name,
                ty: &field.ty,
                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            });
        }
        Ok(out)
    }

    /// Whether the type has generic parameters, lifetimes aside.
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
            || self.generics.const_params().next().is_some()
    }
}
