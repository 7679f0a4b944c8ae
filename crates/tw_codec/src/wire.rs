//! Low-level wire primitives: varints, tags, fixed-width values and a
//! bounds-checked [`Reader`].

use tw_schema::WireKind;
use tw_schema::schema::MAX_FIELD_NUMBER;

use crate::DecodingError;

/// The longest varint encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

// -----------------------------------------------------------------------------
// Writing

/// Appends `value` as a base-128 varint, least significant group first.
///
/// ```
/// let mut buf = Vec::new();
/// tw_codec::wire::encode_varint(300, &mut buf);
/// assert_eq!(buf, [0xAC, 0x02]);
/// ```
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// The number of bytes [`encode_varint`] writes for `value`.
#[inline]
pub const fn encoded_len_varint(value: u64) -> usize {
    // `| 1` so that zero takes one byte.
    (64 - (value | 1).leading_zeros() as usize).div_ceil(7)
}

/// Appends the tag of a field.
#[inline]
pub fn encode_tag(number: u32, wire_kind: WireKind, buf: &mut Vec<u8>) {
    encode_varint((u64::from(number) << 3) | u64::from(wire_kind.bits()), buf);
}

#[inline]
pub fn encode_fixed32(number: u32, bytes: [u8; 4], buf: &mut Vec<u8>) {
    encode_tag(number, WireKind::Fixed32, buf);
    buf.extend_from_slice(&bytes);
}

#[inline]
pub fn encode_fixed64(number: u32, bytes: [u8; 8], buf: &mut Vec<u8>) {
    encode_tag(number, WireKind::Fixed64, buf);
    buf.extend_from_slice(&bytes);
}

#[inline]
pub fn encode_varint_field(number: u32, value: u64, buf: &mut Vec<u8>) {
    encode_tag(number, WireKind::Varint, buf);
    encode_varint(value, buf);
}

#[inline]
pub fn encode_len_delimited(number: u32, payload: &[u8], buf: &mut Vec<u8>) {
    encode_tag(number, WireKind::LengthDelimited, buf);
    encode_varint(payload.len() as u64, buf);
    buf.extend_from_slice(payload);
}

/// Prefixes everything written since `start` with its varint length.
///
/// Lets nested payloads be written in place before their size is known.
pub fn prefix_len_since(start: usize, buf: &mut Vec<u8>) {
    let body_len = buf.len() - start;
    encode_varint(body_len as u64, buf);
    let prefix_len = buf.len() - start - body_len;
    buf[start..].rotate_right(prefix_len);
}

// -----------------------------------------------------------------------------
// Reader

/// A cursor over an input slice; every read is bounds-checked.
///
/// ```
/// use tw_codec::wire::Reader;
/// use tw_schema::WireKind;
///
/// let mut reader = Reader::new(&[0x08, 0x96, 0x01, 0x12, 0x01, b'x']);
///
/// assert_eq!(reader.read_tag().unwrap(), (1, WireKind::Varint));
/// assert_eq!(reader.read_varint().unwrap(), 150);
///
/// let (_, kind) = reader.read_tag().unwrap();
/// reader.skip(kind).unwrap();
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    #[inline]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodingError> {
        if self.buf.len() < len {
            return Err(DecodingError::Truncated {
                needed: len - self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodingError> {
        let mut value = 0_u64;
        for (index, &byte) in self.buf.iter().take(MAX_VARINT_LEN).enumerate() {
            // The tenth byte only has room for the top bit of a u64.
            if index == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(DecodingError::MalformedVarint);
            }
            value |= u64::from(byte & 0x7F) << (7 * index);
            if byte < 0x80 {
                self.buf = &self.buf[index + 1..];
                return Ok(value);
            }
        }

        if self.buf.len() >= MAX_VARINT_LEN {
            Err(DecodingError::MalformedVarint)
        } else {
            Err(DecodingError::Truncated { needed: 1 })
        }
    }

    /// Reads a tag and splits it into field number and wire kind.
    pub fn read_tag(&mut self) -> Result<(u32, WireKind), DecodingError> {
        let tag = self.read_varint()?;
        let number = tag >> 3;
        if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
            return Err(DecodingError::InvalidTag { tag });
        }
        let bits = (tag & 0b111) as u8;
        let wire_kind = WireKind::from_bits(bits).ok_or(DecodingError::InvalidWireKind { bits })?;
        Ok((number as u32, wire_kind))
    }

    pub fn read_fixed32(&mut self) -> Result<[u8; 4], DecodingError> {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(self.take(4)?);
        Ok(bytes)
    }

    pub fn read_fixed64(&mut self) -> Result<[u8; 8], DecodingError> {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(bytes)
    }

    /// Reads a varint length and returns that many bytes.
    pub fn read_len_delimited(&mut self) -> Result<&'a [u8], DecodingError> {
        let len = self.read_varint()?;
        match usize::try_from(len) {
            Ok(len) => self.take(len),
            Err(_) => Err(DecodingError::Truncated { needed: usize::MAX }),
        }
    }

    /// Skips one payload of the given wire kind.
    pub fn skip(&mut self, wire_kind: WireKind) -> Result<(), DecodingError> {
        match wire_kind {
            WireKind::Varint => self.read_varint().map(drop),
            WireKind::Fixed64 => self.take(8).map(drop),
            WireKind::LengthDelimited => self.read_len_delimited().map(drop),
            WireKind::Fixed32 => self.take(4).map(drop),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
