use crate::{ValueKind, WireKind};

/// One field of a [`FieldSchema`](crate::schema::FieldSchema).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    number: u32,
    index: usize,
    name: &'static str,
    kind: ValueKind,
    wire_kind: WireKind,
}

impl FieldDescriptor {
    #[inline]
    pub(crate) const fn new(
        number: u32,
        index: usize,
        name: &'static str,
        kind: ValueKind,
        wire_kind: WireKind,
    ) -> Self {
        Self {
            number,
            index,
            name,
            kind,
            wire_kind,
        }
    }

    /// The field number written in every tag of this field.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Position of the field for [`Message::field`](crate::Message::field).
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The wire kind of each tag, the element's for lists and optionals.
    #[inline]
    pub const fn wire_kind(&self) -> WireKind {
        self.wire_kind
    }

    /// Whether the field is written even when it holds a blank value.
    #[inline]
    pub fn is_always_written(&self) -> bool {
        !self.kind.may_be_absent()
    }
}
