use log::trace;
use tw_schema::registry::SchemaRegistry;
use tw_schema::{Message, Value, ValueKind, ValueMut, WireKind};

use crate::DecodingError;
use crate::wire::Reader;

#[inline]
fn narrow<T: TryFrom<i64>>(value: i64, kind: &'static str) -> Result<T, DecodingError> {
    T::try_from(value).map_err(|_| DecodingError::OutOfRange { value, kind })
}

#[inline]
fn unsupported(kind: &ValueKind, found: &'static str) -> DecodingError {
    DecodingError::UnsupportedValue {
        expected: kind.to_string(),
        found,
    }
}

// -----------------------------------------------------------------------------
// Decoder

/// Merges encoded fields into existing values, following their cached schemas.
pub(crate) struct Decoder<'a> {
    registry: &'a SchemaRegistry,
    max_depth: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub(crate) const fn new(registry: &'a SchemaRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            max_depth,
            depth: 0,
        }
    }

    /// Reads fields from `bytes` until it is exhausted, writing each into the
    /// matching field of `message`.
    ///
    /// Scalar fields seen twice keep the last value; nested messages merge.
    pub(crate) fn merge_message(
        &mut self,
        bytes: &[u8],
        message: &mut dyn Message,
    ) -> Result<(), DecodingError> {
        if self.depth >= self.max_depth {
            return Err(DecodingError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.merge_fields(bytes, message);
        self.depth -= 1;
        result
    }

    fn merge_fields(
        &mut self,
        bytes: &[u8],
        message: &mut dyn Message,
    ) -> Result<(), DecodingError> {
        let schema = self.registry.get_or_derive(&message.reflect_message_type())?;
        let type_path = schema.type_path();
        let mut reader = Reader::new(bytes);

        while !reader.is_empty() {
            let (number, wire_kind) = reader.read_tag()?;
            let Some(field) = schema.field(number) else {
                trace!("skipping unknown field {number} ({wire_kind}) of `{type_path}`");
                reader.skip(wire_kind)?;
                continue;
            };

            let value = message
                .field_mut(field.index())
                .ok_or(DecodingError::MissingField {
                    type_path,
                    field: field.name(),
                })?;

            self.merge_field(number, field.kind(), wire_kind, &mut reader, value)
                .map_err(|err| err.in_field(type_path, field.name()))?;
        }
        Ok(())
    }

    /// Reads one tag's payload into a field, appending to lists and maps.
    fn merge_field(
        &mut self,
        number: u32,
        kind: &ValueKind,
        wire_kind: WireKind,
        reader: &mut Reader<'_>,
        value: &mut dyn Value,
    ) -> Result<(), DecodingError> {
        match kind.wire_kind() {
            Some(expected) if expected == wire_kind => {}
            Some(expected) => {
                return Err(DecodingError::WireKindMismatch {
                    number,
                    expected,
                    found: wire_kind,
                });
            }
            None => return Err(unsupported(kind, value.value_mut().kind_name())),
        }

        match kind {
            ValueKind::List(item) => match value.value_mut() {
                ValueMut::List(list) => self.merge_single(item, reader, list.push_blank()),
                other => Err(unsupported(kind, other.kind_name())),
            },
            ValueKind::Optional(item) => match value.value_mut() {
                ValueMut::Optional(option) => {
                    self.merge_single(item, reader, option.get_or_insert_blank())
                }
                other => Err(unsupported(kind, other.kind_name())),
            },
            ValueKind::Map(key_kind, value_kind) => match value.value_mut() {
                ValueMut::Map(map) => {
                    let entry = reader.read_len_delimited()?;
                    let mut key = map.blank_key();
                    let mut item = map.blank_value();
                    self.merge_map_entry(entry, key_kind, value_kind, &mut *key, &mut *item)?;
                    if map.insert_boxed(key, item) {
                        Ok(())
                    } else {
                        Err(DecodingError::InvalidMapEntry)
                    }
                }
                other => Err(unsupported(kind, other.kind_name())),
            },
            _ => self.merge_single(kind, reader, value),
        }
    }

    /// Fills a blank key and value from one map entry.
    ///
    /// Missing parts keep their blank value.
    fn merge_map_entry(
        &mut self,
        bytes: &[u8],
        key_kind: &ValueKind,
        value_kind: &ValueKind,
        key: &mut dyn Value,
        value: &mut dyn Value,
    ) -> Result<(), DecodingError> {
        let mut reader = Reader::new(bytes);
        while !reader.is_empty() {
            match reader.read_tag()? {
                (1, wire_kind) => self.merge_field(1, key_kind, wire_kind, &mut reader, key)?,
                (2, wire_kind) => self.merge_field(2, value_kind, wire_kind, &mut reader, value)?,
                (_, wire_kind) => reader.skip(wire_kind)?,
            }
        }
        Ok(())
    }

    /// Reads the payload of one non-repeated value.
    fn merge_single(
        &mut self,
        kind: &ValueKind,
        reader: &mut Reader<'_>,
        value: &mut dyn Value,
    ) -> Result<(), DecodingError> {
        match (kind, value.value_mut()) {
            (ValueKind::Bool, ValueMut::Bool(v)) => *v = reader.read_varint()? != 0,
            (ValueKind::I8, ValueMut::I8(v)) => {
                *v = narrow(i32::from_le_bytes(reader.read_fixed32()?).into(), "i8")?;
            }
            (ValueKind::I16, ValueMut::I16(v)) => {
                *v = narrow(i32::from_le_bytes(reader.read_fixed32()?).into(), "i16")?;
            }
            (ValueKind::I32, ValueMut::I32(v)) => *v = i32::from_le_bytes(reader.read_fixed32()?),
            (ValueKind::U8, ValueMut::U8(v)) => {
                *v = narrow(u32::from_le_bytes(reader.read_fixed32()?).into(), "u8")?;
            }
            (ValueKind::U16, ValueMut::U16(v)) => {
                *v = narrow(u32::from_le_bytes(reader.read_fixed32()?).into(), "u16")?;
            }
            (ValueKind::U32, ValueMut::U32(v)) => *v = u32::from_le_bytes(reader.read_fixed32()?),
            (ValueKind::Char, ValueMut::Char(v)) => {
                let raw = u32::from_le_bytes(reader.read_fixed32()?);
                *v = char::from_u32(raw).ok_or(DecodingError::InvalidChar { value: raw })?;
            }
            (ValueKind::F32, ValueMut::F32(v)) => *v = f32::from_le_bytes(reader.read_fixed32()?),
            (ValueKind::I64, ValueMut::I64(v)) => *v = i64::from_le_bytes(reader.read_fixed64()?),
            (ValueKind::U64, ValueMut::U64(v)) => *v = u64::from_le_bytes(reader.read_fixed64()?),
            (ValueKind::F64, ValueMut::F64(v)) => *v = f64::from_le_bytes(reader.read_fixed64()?),
            (ValueKind::Text, ValueMut::Text(v)) => {
                let text = core::str::from_utf8(reader.read_len_delimited()?)?;
                v.clear();
                v.push_str(text);
            }
            (ValueKind::Bytes, ValueMut::Bytes(v)) => {
                let bytes = reader.read_len_delimited()?;
                v.clear();
                v.extend_from_slice(bytes);
            }
            (ValueKind::Enum(type_path), ValueMut::Enum(v)) => {
                let index = reader.read_varint()?;
                let known = u32::try_from(index).is_ok_and(|index| v.set_variant_index(index));
                if !known {
                    return Err(DecodingError::UnknownEnumVariant {
                        type_path: *type_path,
                        index,
                    });
                }
            }
            (ValueKind::Message(_), ValueMut::Message(v)) => {
                let bytes = reader.read_len_delimited()?;
                self.merge_message(bytes, v)?;
            }
            (kind, other) => return Err(unsupported(kind, other.kind_name())),
        }
        Ok(())
    }
}
