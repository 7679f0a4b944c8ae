//! Validated field layouts.
//!
//! A [`FieldSchema`] is derived once per type from its [`MessageType`] and is
//! immutable afterwards. Deriving is a pure function of the type, so two
//! derivations of the same type always compare equal.
//!
//! [`MessageType`]: crate::info::MessageType

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod field_schema;
mod validate;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::FieldDescriptor;
pub use field_schema::FieldSchema;

/// The smallest valid field number.
pub const MIN_FIELD_NUMBER: u32 = 1;

/// The largest valid field number, `2^29 - 1`.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;
