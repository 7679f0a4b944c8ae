//! The schema cache and the object factory.
//!
//! ## Menu
//!
//! - [`SchemaRegistry`]: derives a [`FieldSchema`] on first request and returns
//!   the cached one afterwards; also maps type ids and type paths to
//!   [`MessageType`]s.
//! - [`SchemaRegistry::create_blank`]: creates a blank instance of a registered
//!   type without naming it statically.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, every non-generic type marked
//! `#[schema(auto_register)]` is collected at link time through the
//! [`inventory`] crate. [`SchemaRegistry::global`] runs the collection once;
//! other registries can call [`SchemaRegistry::auto_register`] themselves.
//!
//! On platforms `inventory` does not support, collection silently registers
//! nothing and `auto_register` returns `false`.
//!
//! [`FieldSchema`]: crate::schema::FieldSchema
//! [`MessageType`]: crate::info::MessageType
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod factory;
mod schema_registry;

// -----------------------------------------------------------------------------
// Exports

pub use schema_registry::SchemaRegistry;
