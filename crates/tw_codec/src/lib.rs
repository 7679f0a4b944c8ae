//! Tag-prefixed binary encoding of [`Message`](tw_schema::Message)s.
//!
//! Every field is written as a tag, `(field_number << 3) | wire_kind` as a
//! varint, followed by its payload:
//!
//! | wire kind | bits | payload |
//! |---|---|---|
//! | varint | 0 | `bool`, enum variant index |
//! | fixed64 | 1 | `i64`, `u64`, `f64`, little-endian |
//! | length-delimited | 2 | varint length, then text, bytes, a nested message or a map entry |
//! | fixed32 | 5 | `i8`-`i32` sign-extended, `u8`-`u32`, `char`, `f32`, little-endian |
//!
//! Fields go out in ascending field-number order. Lists repeat the tag for
//! each element, absent options write nothing, and map entries are nested
//! messages with the key as field 1 and the value as field 2. Decoders skip
//! field numbers they do not know, so old readers accept new payloads.
//!
//! ```
//! use tw_codec::Codec;
//! use tw_schema::{derive::Schema, registry::SchemaRegistry};
//!
//! #[derive(Schema, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: String,
//! }
//!
//! let codec = Codec::new(SchemaRegistry::global());
//! let point = Point { x: 3, y: 4, label: "origin".into() };
//!
//! let bytes = codec.serialize(&point).unwrap();
//! assert_eq!(
//!     bytes,
//!     [
//!         0x0D, 0x03, 0x00, 0x00, 0x00, // x: field 1, fixed32
//!         0x15, 0x04, 0x00, 0x00, 0x00, // y: field 2, fixed32
//!         0x1A, 0x06, b'o', b'r', b'i', b'g', b'i', b'n', // label: field 3, length-delimited
//!     ]
//! );
//!
//! let decoded: Point = codec.deserialize(&bytes).unwrap();
//! assert_eq!(decoded, point);
//!
//! // A payload cut short is rejected.
//! assert!(codec.deserialize::<Point>(&bytes[..bytes.len() - 1]).is_err());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod buffer;
mod codec;
mod config;
mod decode;
mod encode;
mod error;

pub mod wire;

// -----------------------------------------------------------------------------
// Exports

pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{DecodingError, DeserializeError, EncodingError};

use tw_schema::{Message, Schema};

/// Serializes a message with the [global codec](Codec::global).
#[inline]
pub fn serialize(message: &dyn Message) -> Result<Vec<u8>, EncodingError> {
    Codec::global().serialize(message)
}

/// Deserializes a `T` with the [global codec](Codec::global).
#[inline]
pub fn deserialize<T: Schema>(bytes: &[u8]) -> Result<T, DecodingError> {
    Codec::global().deserialize(bytes)
}
