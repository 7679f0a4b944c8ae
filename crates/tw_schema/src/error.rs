use thiserror::Error;

// -----------------------------------------------------------------------------
// SchemaError

/// A type's field layout could not be derived.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("field `{field}` of `{type_path}` has unsupported kind {kind}: {reason}")]
    UnsupportedField {
        type_path: &'static str,
        field: &'static str,
        kind: String,
        reason: &'static str,
    },

    #[error("`{type_path}` mixes tagged and untagged fields")]
    MixedTagging { type_path: &'static str },

    #[error("field `{field}` of `{type_path}` has number {number}, outside 1..=536870911")]
    InvalidFieldNumber {
        type_path: &'static str,
        field: &'static str,
        number: u32,
    },

    #[error("fields `{first}` and `{second}` of `{type_path}` share number {number}")]
    DuplicateFieldNumber {
        type_path: &'static str,
        first: &'static str,
        second: &'static str,
        number: u32,
    },

    #[error("no message type is registered for `{0}`")]
    UnknownType(String),
}

// -----------------------------------------------------------------------------
// InstantiationError

/// A blank instance of a type could not be created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InstantiationError {
    #[error("no message type is registered for `{0}`")]
    UnknownType(String),

    #[error("`{type_path}` has no blank constructor")]
    NotInstantiable { type_path: &'static str },
}
