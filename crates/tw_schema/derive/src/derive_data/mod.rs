//! Parsed form of a `#[derive(Schema)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod schema_derive;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use schema_derive::{SchemaData, SchemaDerive, SchemaField};
