use log::trace;
use tw_schema::registry::SchemaRegistry;
use tw_schema::{Message, Value, ValueKind, ValueRef, WireKind};

use crate::EncodingError;
use crate::wire::{
    encode_fixed32, encode_fixed64, encode_len_delimited, encode_tag, encode_varint_field,
    prefix_len_since,
};

// -----------------------------------------------------------------------------
// Encoder

/// Writes messages field by field, following their cached schemas.
pub(crate) struct Encoder<'a> {
    registry: &'a SchemaRegistry,
    max_depth: usize,
    depth: usize,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub(crate) const fn new(registry: &'a SchemaRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            max_depth,
            depth: 0,
        }
    }

    /// Appends the fields of `message` to `buf`, without a length prefix.
    pub(crate) fn encode_message(
        &mut self,
        message: &dyn Message,
        buf: &mut Vec<u8>,
    ) -> Result<(), EncodingError> {
        if self.depth >= self.max_depth {
            return Err(EncodingError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.encode_fields(message, buf);
        self.depth -= 1;
        result
    }

    fn encode_fields(
        &mut self,
        message: &dyn Message,
        buf: &mut Vec<u8>,
    ) -> Result<(), EncodingError> {
        let schema = self.registry.get_or_derive(&message.reflect_message_type())?;
        let type_path = schema.type_path();
        trace!("encoding `{type_path}` at depth {}", self.depth);

        for field in schema.iter() {
            let value = message
                .field(field.index())
                .ok_or(EncodingError::MissingField {
                    type_path,
                    field: field.name(),
                })?;

            self.encode_field(field.number(), field.kind(), value, buf)
                .map_err(|err| err.in_field(type_path, field.name()))?;
        }
        Ok(())
    }

    /// Writes every tag/payload pair of one field.
    fn encode_field(
        &mut self,
        number: u32,
        kind: &ValueKind,
        value: &dyn Value,
        buf: &mut Vec<u8>,
    ) -> Result<(), EncodingError> {
        match (kind, value.value_ref()) {
            (ValueKind::List(item), ValueRef::List(list)) => {
                for element in (0..list.len()).map_while(|index| list.get(index)) {
                    self.encode_single(number, item, element, buf)?;
                }
                Ok(())
            }
            (ValueKind::Optional(item), ValueRef::Optional(inner)) => match inner {
                Some(inner) => self.encode_single(number, item, inner, buf),
                None => Ok(()),
            },
            (ValueKind::Map(key_kind, value_kind), ValueRef::Map(map)) => {
                for (key, value) in map.entries() {
                    encode_tag(number, WireKind::LengthDelimited, buf);
                    let start = buf.len();
                    self.encode_field(1, key_kind, key, buf)?;
                    self.encode_field(2, value_kind, value, buf)?;
                    prefix_len_since(start, buf);
                }
                Ok(())
            }
            _ => self.encode_single(number, kind, value, buf),
        }
    }

    /// Writes one tag and the payload of a non-repeated value.
    fn encode_single(
        &mut self,
        number: u32,
        kind: &ValueKind,
        value: &dyn Value,
        buf: &mut Vec<u8>,
    ) -> Result<(), EncodingError> {
        let value = value.value_ref();
        match (kind, value) {
            (ValueKind::Bool, ValueRef::Bool(v)) => encode_varint_field(number, u64::from(v), buf),
            (ValueKind::I8, ValueRef::I8(v)) => {
                encode_fixed32(number, i32::from(v).to_le_bytes(), buf);
            }
            (ValueKind::I16, ValueRef::I16(v)) => {
                encode_fixed32(number, i32::from(v).to_le_bytes(), buf);
            }
            (ValueKind::I32, ValueRef::I32(v)) => encode_fixed32(number, v.to_le_bytes(), buf),
            (ValueKind::U8, ValueRef::U8(v)) => {
                encode_fixed32(number, u32::from(v).to_le_bytes(), buf);
            }
            (ValueKind::U16, ValueRef::U16(v)) => {
                encode_fixed32(number, u32::from(v).to_le_bytes(), buf);
            }
            (ValueKind::U32, ValueRef::U32(v)) => encode_fixed32(number, v.to_le_bytes(), buf),
            (ValueKind::Char, ValueRef::Char(v)) => {
                encode_fixed32(number, u32::from(v).to_le_bytes(), buf);
            }
            (ValueKind::F32, ValueRef::F32(v)) => encode_fixed32(number, v.to_le_bytes(), buf),
            (ValueKind::I64, ValueRef::I64(v)) => encode_fixed64(number, v.to_le_bytes(), buf),
            (ValueKind::U64, ValueRef::U64(v)) => encode_fixed64(number, v.to_le_bytes(), buf),
            (ValueKind::F64, ValueRef::F64(v)) => encode_fixed64(number, v.to_le_bytes(), buf),
            (ValueKind::Text, ValueRef::Text(v)) => encode_len_delimited(number, v.as_bytes(), buf),
            (ValueKind::Bytes, ValueRef::Bytes(v)) => encode_len_delimited(number, v, buf),
            (ValueKind::Enum(_), ValueRef::Enum(v)) => {
                encode_varint_field(number, u64::from(v.variant_index()), buf);
            }
            (ValueKind::Message(_), ValueRef::Message(v)) => {
                encode_tag(number, WireKind::LengthDelimited, buf);
                let start = buf.len();
                self.encode_message(v, buf)?;
                prefix_len_since(start, buf);
            }
            (kind, value) => {
                return Err(EncodingError::UnsupportedValue {
                    expected: kind.to_string(),
                    found: value.kind_name(),
                });
            }
        }
        Ok(())
    }
}
