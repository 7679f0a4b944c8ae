use core::fmt;

// -----------------------------------------------------------------------------
// WireKind

/// The on-the-wire encoding category of a value.
///
/// Stored in the low three bits of every tag.
///
/// | kind | bits | used for |
/// |------|------|----------|
/// | `Varint` | 0 | `bool`, enum variant index |
/// | `Fixed64` | 1 | `i64`, `u64`, `f64` |
/// | `LengthDelimited` | 2 | text, bytes, nested messages, map entries |
/// | `Fixed32` | 5 | `i8`-`i32`, `u8`-`u32`, `f32`, `char` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WireKind {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
}

impl WireKind {
    /// Returns the three tag bits of this kind.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::LengthDelimited => 2,
            Self::Fixed32 => 5,
        }
    }

    /// Parses tag bits, `None` for group markers and unassigned values.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "length-delimited",
            Self::Fixed32 => "fixed32",
        })
    }
}

// -----------------------------------------------------------------------------
// ValueKind

/// Classification of a field's value, as recorded in a [`FieldSchema`].
///
/// Composite kinds carry the kinds they contain, except messages and enums,
/// which are referenced by type path so recursive types stay finite.
///
/// [`FieldSchema`]: crate::schema::FieldSchema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    Text,
    Bytes,
    Enum(&'static str),
    Message(&'static str),
    List(Box<ValueKind>),
    Map(Box<ValueKind>, Box<ValueKind>),
    Optional(Box<ValueKind>),
    /// A value that cannot be introspected, e.g. a resource handle.
    Opaque(&'static str),
}

impl ValueKind {
    /// Returns the wire kind each tag of this value is written with.
    ///
    /// Lists and optionals use the wire kind of their element; `Opaque` has none.
    pub fn wire_kind(&self) -> Option<WireKind> {
        match self {
            Self::Bool | Self::Enum(_) => Some(WireKind::Varint),
            Self::I8 | Self::I16 | Self::I32 => Some(WireKind::Fixed32),
            Self::U8 | Self::U16 | Self::U32 => Some(WireKind::Fixed32),
            Self::F32 | Self::Char => Some(WireKind::Fixed32),
            Self::I64 | Self::U64 | Self::F64 => Some(WireKind::Fixed64),
            Self::Text | Self::Bytes | Self::Message(_) | Self::Map(..) => {
                Some(WireKind::LengthDelimited)
            }
            Self::List(item) | Self::Optional(item) => item.wire_kind(),
            Self::Opaque(_) => None,
        }
    }

    /// Whether a field of this kind may carry several tag/payload pairs.
    #[inline]
    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(..))
    }

    /// Whether encoding a field of this kind may produce no bytes at all.
    #[inline]
    pub fn may_be_absent(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(..) | Self::Optional(_))
    }

    /// Whether this kind is a single scalar, text or byte string payload.
    pub fn is_plain(&self) -> bool {
        !matches!(
            self,
            Self::Message(_) | Self::List(_) | Self::Map(..) | Self::Optional(_) | Self::Opaque(_)
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::I8 => f.write_str("i8"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::Char => f.write_str("char"),
            Self::Text => f.write_str("text"),
            Self::Bytes => f.write_str("bytes"),
            Self::Enum(path) => write!(f, "enum `{path}`"),
            Self::Message(path) => write!(f, "message `{path}`"),
            Self::List(item) => write!(f, "list<{item}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Optional(item) => write!(f, "option<{item}>"),
            Self::Opaque(path) => write!(f, "opaque `{path}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ValueKind, WireKind};

    #[test]
    fn wire_bits_round_trip() {
        for kind in [
            WireKind::Varint,
            WireKind::Fixed64,
            WireKind::LengthDelimited,
            WireKind::Fixed32,
        ] {
            assert_eq!(WireKind::from_bits(kind.bits()), Some(kind));
        }
        assert_eq!(WireKind::from_bits(3), None);
        assert_eq!(WireKind::from_bits(4), None);
        assert_eq!(WireKind::from_bits(7), None);
    }

    #[test]
    fn containers_use_element_wire_kind() {
        let list = ValueKind::List(Box::new(ValueKind::F64));
        let opt = ValueKind::Optional(Box::new(ValueKind::Text));
        let map = ValueKind::Map(Box::new(ValueKind::U32), Box::new(ValueKind::Bool));

        assert_eq!(list.wire_kind(), Some(WireKind::Fixed64));
        assert_eq!(opt.wire_kind(), Some(WireKind::LengthDelimited));
        assert_eq!(map.wire_kind(), Some(WireKind::LengthDelimited));
        assert_eq!(ValueKind::Opaque("fd").wire_kind(), None);

        assert!(list.is_repeated());
        assert!(map.is_repeated());
        assert!(!opt.is_repeated());
        assert!(opt.may_be_absent());
        assert!(!ValueKind::F64.is_repeated());
    }

    #[test]
    fn display_nests() {
        let kind = ValueKind::Map(
            Box::new(ValueKind::Text),
            Box::new(ValueKind::List(Box::new(ValueKind::Message("a::B")))),
        );
        assert_eq!(kind.to_string(), "map<text, list<message `a::B`>>");
    }
}
