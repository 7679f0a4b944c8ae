use core::str::Utf8Error;

use thiserror::Error;
use tw_schema::{InstantiationError, SchemaError, WireKind};

// -----------------------------------------------------------------------------
// EncodingError

/// A message could not be serialized.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodingError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("`{type_path}` does not expose its field `{field}`")]
    MissingField {
        type_path: &'static str,
        field: &'static str,
    },

    #[error("cannot encode a {found} value as {expected}")]
    UnsupportedValue {
        expected: String,
        found: &'static str,
    },

    #[error("message nesting exceeds {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("in field `{field}` of `{type_path}`: {source}")]
    InField {
        type_path: &'static str,
        field: &'static str,
        #[source]
        source: Box<EncodingError>,
    },
}

impl EncodingError {
    /// Strips [`InField`](Self::InField) context down to the root cause.
    pub fn innermost(&self) -> &Self {
        let mut err = self;
        while let Self::InField { source, .. } = err {
            err = source;
        }
        err
    }

    #[inline]
    pub(crate) fn in_field(self, type_path: &'static str, field: &'static str) -> Self {
        Self::InField {
            type_path,
            field,
            source: Box::new(self),
        }
    }
}

// -----------------------------------------------------------------------------
// DecodingError

/// Bytes could not be decoded into a message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodingError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("`{type_path}` does not expose its field `{field}`")]
    MissingField {
        type_path: &'static str,
        field: &'static str,
    },

    #[error("empty input for `{type_path}`, which always writes at least one field")]
    Empty { type_path: &'static str },

    #[error("input ends {needed} bytes early")]
    Truncated { needed: usize },

    #[error("varint is longer than 10 bytes or overflows 64 bits")]
    MalformedVarint,

    #[error("tag {tag:#x} has a field number outside 1..=536870911")]
    InvalidTag { tag: u64 },

    #[error("wire kind {bits} is not supported")]
    InvalidWireKind { bits: u8 },

    #[error("field {number} is {expected} but the input has {found}")]
    WireKindMismatch {
        number: u32,
        expected: WireKind,
        found: WireKind,
    },

    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("{value} does not fit in {kind}")]
    OutOfRange { value: i64, kind: &'static str },

    #[error("{value:#x} is not a valid char")]
    InvalidChar { value: u32 },

    #[error("`{type_path}` has no variant with index {index}")]
    UnknownEnumVariant { type_path: &'static str, index: u64 },

    #[error("cannot decode {expected} into a {found} value")]
    UnsupportedValue {
        expected: String,
        found: &'static str,
    },

    #[error("message nesting exceeds {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("map entry key or value has the wrong type")]
    InvalidMapEntry,

    #[error("in field `{field}` of `{type_path}`: {source}")]
    InField {
        type_path: &'static str,
        field: &'static str,
        #[source]
        source: Box<DecodingError>,
    },
}

impl DecodingError {
    /// Strips [`InField`](Self::InField) context down to the root cause.
    ///
    /// ```
    /// use tw_codec::DecodingError;
    ///
    /// let err = DecodingError::Truncated { needed: 2 };
    /// assert!(matches!(err.innermost(), DecodingError::Truncated { needed: 2 }));
    /// ```
    pub fn innermost(&self) -> &Self {
        let mut err = self;
        while let Self::InField { source, .. } = err {
            err = source;
        }
        err
    }

    #[inline]
    pub(crate) fn in_field(self, type_path: &'static str, field: &'static str) -> Self {
        Self::InField {
            type_path,
            field,
            source: Box::new(self),
        }
    }
}

// -----------------------------------------------------------------------------
// DeserializeError

/// Dynamic deserialization failed to create or to fill the instance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeError {
    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}
