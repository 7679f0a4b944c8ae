//! Field layouts and reflection plumbing for tag-prefixed binary messages.
//!
//! A type deriving [`Schema`](derive::Schema) describes its fields statically
//! through a [`MessageType`](info::MessageType). The first time the layout is
//! needed, the [`SchemaRegistry`](registry::SchemaRegistry) turns that
//! description into a validated [`FieldSchema`](schema::FieldSchema) and caches
//! it for the rest of the process.
//!
//! ```
//! use tw_schema::{Blank, derive::Schema, registry::SchemaRegistry};
//!
//! #[derive(Schema, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: String,
//! }
//!
//! let registry = SchemaRegistry::new();
//! let schema = registry.get::<Point>().unwrap();
//!
//! let numbers: Vec<u32> = schema.iter().map(|field| field.number()).collect();
//! assert_eq!(numbers, [1, 2, 3]);
//!
//! // Blank instances never run user constructors.
//! assert_eq!(Point::blank(), Point { x: 0, y: 0, label: String::new() });
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro resolves this crate through the caller's `Cargo.toml`,
// which names `tw_schema`; doctests and unit tests need the same name.
extern crate self as tw_schema;

// -----------------------------------------------------------------------------
// Modules

mod bytes;
mod error;
mod kind;
mod value;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod schema;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use bytes::Bytes;
pub use error::{InstantiationError, SchemaError};
pub use kind::{ValueKind, WireKind};
pub use ops::{Enum, List, Map, Message, Optional, Schema};
pub use value::{Blank, Typed, Value, ValueMut, ValueRef, blank};

pub use tw_schema_derive as derive;
