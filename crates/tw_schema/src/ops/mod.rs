//! Dynamic access interfaces, one per composite [`ValueKind`].
//!
//! ## Menu
//!
//! - [`Message`]: derived structs, accessed field by field.
//! - [`Schema`]: the static side of a message, used for derivation and blanks.
//! - [`List`]: `Vec<T>`.
//! - [`Map`]: `BTreeMap<K, V>` and `HashMap<K, V, S>`.
//! - [`Optional`]: `Option<T>`.
//! - [`Enum`]: fieldless enums, addressed by declaration index.
//!
//! [`ValueKind`]: crate::ValueKind

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod list_ops;
mod map_ops;
mod message_ops;
mod optional_ops;

// -----------------------------------------------------------------------------
// Exports

pub use enum_ops::Enum;
pub use list_ops::List;
pub use map_ops::Map;
pub use message_ops::{Message, Schema};
pub use optional_ops::Optional;
