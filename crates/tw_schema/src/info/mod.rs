//! Static descriptions generated by `#[derive(Schema)]`.
//!
//! - [`FieldInfo`]: one serialized field, its name, optional explicit tag and kind.
//! - [`MessageType`]: a message type, its identity, its fields and how to
//!   create a blank instance of it.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod message_type;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::FieldInfo;
pub use message_type::MessageType;
