//! See [`Schema`](derive_schema).
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SCHEMA_ATTRIBUTE_NAME: &str = "schema";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Schema Derivation
///
/// `#[derive(Schema)]` implements the following traits:
///
/// - `Value`
/// - `Typed`
/// - `Blank`
/// - `Message` and `Schema` (for structs)
/// - `Enum` (for fieldless enums)
///
/// Named, tuple and unit structs become messages. Enums must be fieldless;
/// they are encoded as the index of the variant in declaration order.
/// Unions and enums with data are rejected at compile time.
///
/// ## Field Attributes
///
/// ### Skipping
///
/// `#[schema(skip)]` leaves a field out of the schema. Blank instances fill it
/// with `Default::default()`, so its type must implement `Default`.
///
/// ```rust, ignore
/// #[derive(Schema)]
/// struct Conn {
///     peer: String,
///     #[schema(skip)]
///     socket: Option<std::net::TcpStream>,
/// }
/// ```
///
/// ### Explicit Field Numbers
///
/// Untagged fields are numbered 1, 2, 3... in declaration order.
/// `#[schema(tag = N)]` pins a field number instead, so fields can be
/// reordered or removed without breaking old payloads. A type tags all of
/// its serialized fields or none of them; mixing is reported when the
/// schema is derived.
///
/// ```rust, ignore
/// #[derive(Schema)]
/// struct Reply {
///     #[schema(tag = 2)]
///     body: String,
///     #[schema(tag = 1)]
///     status: u16,
/// }
/// ```
///
/// ## Type Attributes
///
/// ### Auto Register
///
/// `#[schema(auto_register)]` collects the type at link time so that
/// `SchemaRegistry::auto_register` registers it. Ignored for generic types
/// and without the `auto_register` feature.
///
/// ```rust, ignore
/// #[derive(Schema)]
/// #[schema(auto_register)]
/// struct Heartbeat {
///     at: u64,
/// }
/// ```
///
/// ## Generics
///
/// Generic messages get `FieldType: Typed + Blank` bounds for every
/// serialized field and `FieldType: Default` for skipped ones.
#[proc_macro_derive(Schema, attributes(schema))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::SchemaDerive::from_input(&ast) {
        Ok(derive) => impls::impl_schema(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
