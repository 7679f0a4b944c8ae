use core::any::TypeId;
use std::sync::{Arc, LazyLock};

use log::trace;
use tw_schema::registry::SchemaRegistry;
use tw_schema::{Message, Schema};

use crate::buffer::WriteBuffer;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::{CodecConfig, DecodingError, DeserializeError, EncodingError};

// -----------------------------------------------------------------------------
// Codec

/// Serializes and deserializes messages against a [`SchemaRegistry`].
///
/// A codec is cheap to clone and safe to share between threads; schemas are
/// derived once per type and cached in the registry.
///
/// ```
/// use std::sync::Arc;
/// use tw_codec::{Codec, CodecConfig};
/// use tw_schema::{derive::Schema, registry::SchemaRegistry};
///
/// #[derive(Schema, Debug, PartialEq)]
/// struct Reading {
///     sensor: String,
///     celsius: Option<f32>,
/// }
///
/// let registry = Arc::new(SchemaRegistry::new());
/// let codec = Codec::with_config(registry, CodecConfig::new().with_max_depth(8));
///
/// let reading = Reading { sensor: "north".into(), celsius: None };
/// let bytes = codec.serialize(&reading).unwrap();
/// assert_eq!(codec.deserialize::<Reading>(&bytes).unwrap(), reading);
/// ```
#[derive(Clone)]
pub struct Codec {
    registry: Arc<SchemaRegistry>,
    config: CodecConfig,
}

impl Codec {
    #[inline]
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self::with_config(registry, CodecConfig::DEFAULT)
    }

    #[inline]
    pub const fn with_config(registry: Arc<SchemaRegistry>, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    /// The codec over [`SchemaRegistry::global`] with the default config.
    pub fn global() -> &'static Self {
        static GLOBAL: LazyLock<Codec> = LazyLock::new(|| Codec::new(SchemaRegistry::global()));
        &GLOBAL
    }

    #[inline]
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    #[inline]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Encodes `message` into a new byte vector.
    ///
    /// The same value always produces the same bytes, as long as it holds no
    /// hash maps.
    pub fn serialize(&self, message: &dyn Message) -> Result<Vec<u8>, EncodingError> {
        let mut buffer = WriteBuffer::acquire(&self.config);
        Encoder::new(&self.registry, self.config.max_depth())
            .encode_message(message, buffer.as_mut_vec())?;
        Ok(buffer.as_slice().to_vec())
    }

    /// Appends the encoding of `message` to `out`, returning its length.
    ///
    /// On failure `out` is left as it was.
    pub fn serialize_into(
        &self,
        message: &dyn Message,
        out: &mut Vec<u8>,
    ) -> Result<usize, EncodingError> {
        let start = out.len();
        match Encoder::new(&self.registry, self.config.max_depth()).encode_message(message, out) {
            Ok(()) => Ok(out.len() - start),
            Err(err) => {
                out.truncate(start);
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Decodes a `T` from `bytes`.
    ///
    /// The value starts blank, so fields missing from the input keep their
    /// zero value, and `T`'s constructors never run.
    ///
    /// Empty input fails with [`DecodingError::Empty`] only if `T` has a field
    /// that is always written. A type whose fields are all lists, maps or
    /// options encodes its blank value as no bytes, so empty input decodes to
    /// that blank value instead.
    pub fn deserialize<T: Schema>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        let mut value = T::blank();
        self.fill(bytes, &mut value)?;
        Ok(value)
    }

    /// Decodes `bytes` on top of an existing message.
    ///
    /// Scalars present in the input overwrite, lists and maps grow, and nested
    /// messages merge field by field.
    pub fn merge(&self, bytes: &[u8], message: &mut dyn Message) -> Result<(), DecodingError> {
        Decoder::new(&self.registry, self.config.max_depth()).merge_message(bytes, message)
    }

    /// Decodes a registered type chosen at runtime.
    ///
    /// Empty input is handled as in [`deserialize`](Self::deserialize).
    pub fn deserialize_dyn(
        &self,
        bytes: &[u8],
        type_id: TypeId,
    ) -> Result<Box<dyn Message>, DeserializeError> {
        let mut message = self.registry.create_blank(type_id)?;
        self.fill(bytes, &mut *message)?;
        Ok(message)
    }

    /// Decodes a registered type named by its type path.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tw_codec::Codec;
    /// use tw_schema::{derive::Schema, registry::SchemaRegistry};
    ///
    /// #[derive(Schema, Debug, PartialEq)]
    /// struct Ping(u64);
    ///
    /// let registry = Arc::new(SchemaRegistry::new());
    /// registry.register::<Ping>();
    /// let codec = Codec::new(registry);
    ///
    /// let bytes = codec.serialize(&Ping(7)).unwrap();
    /// let message = codec
    ///     .deserialize_by_path(&bytes, core::any::type_name::<Ping>())
    ///     .unwrap();
    /// assert_eq!(message.downcast_ref::<Ping>(), Some(&Ping(7)));
    /// ```
    pub fn deserialize_by_path(
        &self,
        bytes: &[u8],
        type_path: &str,
    ) -> Result<Box<dyn Message>, DeserializeError> {
        let mut message = self.registry.create_blank_by_path(type_path)?;
        self.fill(bytes, &mut *message)?;
        Ok(message)
    }

    fn fill(&self, bytes: &[u8], message: &mut dyn Message) -> Result<(), DecodingError> {
        if bytes.is_empty() {
            let schema = self.registry.get_or_derive(&message.reflect_message_type())?;
            if schema.requires_payload() {
                return Err(DecodingError::Empty {
                    type_path: schema.type_path(),
                });
            }
            trace!("empty input for `{}`, keeping a blank value", schema.type_path());
            return Ok(());
        }
        self.merge(bytes, message)
    }
}

impl Default for Codec {
    /// A codec over a fresh, empty registry.
    #[inline]
    fn default() -> Self {
        Self::new(Arc::new(SchemaRegistry::new()))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;
    use std::thread;

    use tw_schema::derive::Schema;
    use tw_schema::registry::SchemaRegistry;
    use tw_schema::{Bytes, InstantiationError, SchemaError};

    use super::Codec;
    use crate::{CodecConfig, DecodingError, DeserializeError, EncodingError};

    #[derive(Schema, Debug, PartialEq, Clone)]
    struct Point {
        x: i32,
        y: i32,
        label: String,
    }

    #[derive(Schema, Debug, PartialEq, Clone)]
    struct PointV2 {
        x: i32,
        y: i32,
        label: String,
        z: f64,
        tags: Vec<String>,
    }

    #[derive(Schema, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Color {
        Red,
        Green,
        Blue = 10,
    }

    #[derive(Schema, Debug, PartialEq, Clone)]
    struct Shape {
        name: String,
        corners: Vec<Point>,
        color: Color,
        fill: Option<Color>,
        weights: BTreeMap<String, f64>,
        payload: Bytes,
        scale: Option<f32>,
        flags: Vec<bool>,
        id: u64,
        offset: i16,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Chain {
        value: u8,
        next: Option<Box<Chain>>,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Sparse {
        note: Option<String>,
        items: Vec<u32>,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Tagged {
        #[schema(tag = 16)]
        enabled: bool,
        #[schema(tag = 4)]
        level: u8,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Cached {
        name: String,
        #[schema(skip)]
        hits: u32,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Pair(u16, i64);

    #[derive(Schema, Debug, PartialEq)]
    struct Marker;

    #[derive(Schema, Debug, PartialEq)]
    struct Small {
        a: i8,
        b: u8,
        c: char,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Counts {
        counts: BTreeMap<String, u32>,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Index {
        by_id: HashMap<u32, Vec<String>>,
        by_color: BTreeMap<Color, Point>,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Paint {
        color: Color,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Schema, Debug, PartialEq)]
    struct Inner {
        a: u32,
        b: u32,
    }

    #[cfg(feature = "auto_register")]
    #[derive(Schema, Debug, PartialEq)]
    #[schema(auto_register)]
    struct Heartbeat {
        seq: u64,
    }

    #[derive(Schema)]
    struct Unsupported {
        grid: Vec<Vec<u8>>,
    }

    fn codec() -> Codec {
        Codec::new(Arc::new(SchemaRegistry::new()))
    }

    fn origin() -> Point {
        Point {
            x: 3,
            y: 4,
            label: "origin".into(),
        }
    }

    fn shape() -> Shape {
        Shape {
            name: "triangle".into(),
            corners: vec![
                origin(),
                Point {
                    x: -1,
                    y: 0,
                    label: String::new(),
                },
            ],
            color: Color::Blue,
            fill: Some(Color::Green),
            weights: BTreeMap::from([("edge".into(), 0.5), ("area".into(), -2.25)]),
            payload: Bytes::from(vec![0, 1, 2, 255]),
            scale: None,
            flags: vec![true, false, true],
            id: u64::MAX,
            offset: -300,
        }
    }

    fn chain(len: u8) -> Chain {
        (1..len).fold(Chain { value: 0, next: None }, |next, value| Chain {
            value,
            next: Some(Box::new(next)),
        })
    }

    const ORIGIN_BYTES: [u8; 18] = [
        0x0D, 0x03, 0x00, 0x00, 0x00, 0x15, 0x04, 0x00, 0x00, 0x00, 0x1A, 0x06, b'o', b'r', b'i',
        b'g', b'i', b'n',
    ];

    #[test]
    fn point_encodes_to_known_bytes() {
        assert_eq!(codec().serialize(&origin()).unwrap(), ORIGIN_BYTES);
        assert_eq!(codec().deserialize::<Point>(&ORIGIN_BYTES).unwrap(), origin());
    }

    #[test]
    fn composite_values_round_trip() {
        let codec = codec();
        let bytes = codec.serialize(&shape()).unwrap();
        assert_eq!(codec.deserialize::<Shape>(&bytes).unwrap(), shape());
    }

    #[test]
    fn enums_encode_declaration_index() {
        let codec = codec();
        let bytes = codec.serialize(&Paint { color: Color::Blue }).unwrap();
        assert_eq!(bytes, [0x08, 0x02]);

        let err = codec.deserialize::<Paint>(&[0x08, 0x07]).unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::UnknownEnumVariant { index: 7, .. }
        ));
    }

    #[test]
    fn recursive_messages_round_trip() {
        let codec = codec();
        let bytes = codec.serialize(&chain(20)).unwrap();
        assert_eq!(codec.deserialize::<Chain>(&bytes).unwrap(), chain(20));
    }

    #[test]
    fn depth_limit_applies_both_ways() {
        let shallow = Codec::with_config(
            Arc::new(SchemaRegistry::new()),
            CodecConfig::new().with_max_depth(3),
        );

        assert!(shallow.serialize(&chain(3)).is_ok());
        let err = shallow.serialize(&chain(4)).unwrap_err();
        assert!(matches!(
            err.innermost(),
            EncodingError::DepthLimitExceeded { limit: 3 }
        ));

        let bytes = codec().serialize(&chain(4)).unwrap();
        let err = shallow.deserialize::<Chain>(&bytes).unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::DepthLimitExceeded { limit: 3 }
        ));
    }

    #[test]
    fn truncated_input_is_rejected() {
        let err = codec()
            .deserialize::<Point>(&ORIGIN_BYTES[..ORIGIN_BYTES.len() - 1])
            .unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::Truncated { needed: 1 }
        ));

        let err = codec().deserialize::<Point>(&ORIGIN_BYTES[..3]).unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::Truncated { needed: 2 }
        ));
    }

    #[test]
    fn empty_input_needs_an_all_absent_layout() {
        let codec = codec();

        let err = codec.deserialize::<Point>(&[]).unwrap_err();
        assert!(matches!(err, DecodingError::Empty { .. }));

        let sparse = codec.deserialize::<Sparse>(&[]).unwrap();
        assert_eq!(
            sparse,
            Sparse {
                note: None,
                items: vec![]
            }
        );

        assert!(codec.serialize(&Marker).unwrap().is_empty());
        assert_eq!(codec.deserialize::<Marker>(&[]).unwrap(), Marker);

        codec.registry().register::<Point>();
        codec.registry().register::<Sparse>();
        assert!(matches!(
            codec.deserialize_dyn(&[], TypeId::of::<Point>()),
            Err(DeserializeError::Decoding(DecodingError::Empty { .. }))
        ));
        assert!(codec.deserialize_dyn(&[], TypeId::of::<Sparse>()).is_ok());
    }

    #[test]
    fn wire_kind_mismatch_is_rejected() {
        let err = codec().deserialize::<Point>(&[0x0A, 0x00]).unwrap_err();
        match &err {
            DecodingError::InField { field, source, .. } => {
                assert_eq!(*field, "x");
                assert!(matches!(
                    **source,
                    DecodingError::WireKindMismatch { number: 1, .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn newer_and_older_layouts_interoperate() {
        let codec = codec();
        let newer = PointV2 {
            x: 3,
            y: 4,
            label: "origin".into(),
            z: 1.5,
            tags: vec!["a".into(), "b".into()],
        };

        let bytes = codec.serialize(&newer).unwrap();
        assert_eq!(&bytes[..ORIGIN_BYTES.len()], ORIGIN_BYTES);
        assert_eq!(codec.deserialize::<Point>(&bytes).unwrap(), origin());

        let older = codec.deserialize::<PointV2>(&ORIGIN_BYTES).unwrap();
        assert_eq!(older.z, 0.0);
        assert!(older.tags.is_empty());
        assert_eq!(older.label, "origin");
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let mut bytes = vec![
            0x48, 0x96, 0x01, // field 9, varint
            0x51, 0, 0, 0, 0, 0, 0, 0, 0, // field 10, fixed64
            0x5A, 0x02, 0xAB, 0xCD, // field 11, length-delimited
        ];
        bytes.extend_from_slice(&ORIGIN_BYTES);
        bytes.extend_from_slice(&[0x65, 1, 2, 3, 4]); // field 12, fixed32

        assert_eq!(codec().deserialize::<Point>(&bytes).unwrap(), origin());

        // Group wire kinds are never skipped.
        let err = codec().deserialize::<Point>(&[0x4B, 0x4C]).unwrap_err();
        assert!(matches!(err, DecodingError::InvalidWireKind { bits: 3 }));
    }

    #[test]
    fn last_scalar_wins_and_messages_merge() {
        let codec = codec();

        let point = codec
            .deserialize::<Point>(&[0x0D, 1, 0, 0, 0, 0x0D, 2, 0, 0, 0])
            .unwrap();
        assert_eq!(point.x, 2);

        let outer = codec
            .deserialize::<Outer>(&[0x0A, 0x05, 0x0D, 1, 0, 0, 0, 0x0A, 0x05, 0x15, 2, 0, 0, 0])
            .unwrap();
        assert_eq!(outer, Outer { inner: Inner { a: 1, b: 2 } });
    }

    #[test]
    fn merge_extends_an_existing_value() {
        let codec = codec();
        let mut sparse = Sparse {
            note: Some("kept".into()),
            items: vec![1],
        };

        let bytes = codec
            .serialize(&Sparse {
                note: None,
                items: vec![2, 3],
            })
            .unwrap();
        codec.merge(&bytes, &mut sparse).unwrap();

        assert_eq!(sparse.note.as_deref(), Some("kept"));
        assert_eq!(sparse.items, [1, 2, 3]);
    }

    #[test]
    fn explicit_tags_and_skipped_fields() {
        let codec = codec();

        let bytes = codec
            .serialize(&Tagged {
                enabled: true,
                level: 9,
            })
            .unwrap();
        assert_eq!(bytes, [0x25, 9, 0, 0, 0, 0x80, 0x01, 0x01]);

        let bytes = codec
            .serialize(&Cached {
                name: "a".into(),
                hits: 42,
            })
            .unwrap();
        assert_eq!(bytes, [0x0A, 0x01, b'a']);
        assert_eq!(
            codec.deserialize::<Cached>(&bytes).unwrap(),
            Cached {
                name: "a".into(),
                hits: 0
            }
        );
    }

    #[test]
    fn tuple_structs_number_positionally() {
        let codec = codec();
        let bytes = codec.serialize(&Pair(7, -2)).unwrap();
        assert_eq!(
            bytes,
            [0x0D, 7, 0, 0, 0, 0x11, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(codec.deserialize::<Pair>(&bytes).unwrap(), Pair(7, -2));
    }

    #[test]
    fn narrow_integers_are_range_checked() {
        let codec = codec();
        let small = Small {
            a: -1,
            b: 200,
            c: 'é',
        };

        let bytes = codec.serialize(&small).unwrap();
        assert_eq!(&bytes[..5], [0x0D, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(codec.deserialize::<Small>(&bytes).unwrap(), small);

        let err = codec.deserialize::<Small>(&[0x15, 0, 1, 0, 0]).unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::OutOfRange {
                value: 256,
                kind: "u8"
            }
        ));

        let err = codec.deserialize::<Small>(&[0x1D, 0, 0xD8, 0, 0]).unwrap_err();
        assert!(matches!(
            err.innermost(),
            DecodingError::InvalidChar { value: 0xD800 }
        ));
    }

    #[test]
    fn invalid_text_is_rejected() {
        let err = codec()
            .deserialize::<Point>(&[0x1A, 0x02, 0xC3, 0x28])
            .unwrap_err();
        assert!(matches!(err.innermost(), DecodingError::InvalidUtf8(_)));
    }

    #[test]
    fn map_entries_are_nested_messages() {
        let codec = codec();
        let counts = Counts {
            counts: BTreeMap::from([("a".into(), 1)]),
        };

        let bytes = codec.serialize(&counts).unwrap();
        assert_eq!(bytes, [0x0A, 0x08, 0x0A, 0x01, b'a', 0x15, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(codec.deserialize::<Counts>(&bytes).unwrap(), counts);

        // An entry without a value keeps the blank value.
        let sparse = codec.deserialize::<Counts>(&[0x0A, 0x03, 0x0A, 0x01, b'b']).unwrap();
        assert_eq!(sparse.counts.get("b"), Some(&0));
    }

    #[test]
    fn maps_with_composite_values_round_trip() {
        let codec = codec();
        let index = Index {
            by_id: HashMap::from([
                (1, vec!["one".into()]),
                (2, vec![]),
                (3, vec!["three".into(), "drei".into()]),
            ]),
            by_color: BTreeMap::from([(Color::Red, origin())]),
        };

        let bytes = codec.serialize(&index).unwrap();
        assert_eq!(codec.deserialize::<Index>(&bytes).unwrap(), index);
    }

    #[test]
    fn schema_errors_surface_when_encoding() {
        let err = codec()
            .serialize(&Unsupported {
                grid: vec![vec![1]],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            EncodingError::Schema(SchemaError::UnsupportedField { field: "grid", .. })
        ));
    }

    #[test]
    fn serialize_into_appends_or_restores() {
        let codec = codec();
        let mut out = vec![0xEE];

        let written = codec.serialize_into(&origin(), &mut out).unwrap();
        assert_eq!(written, ORIGIN_BYTES.len());
        assert_eq!(&out[1..], ORIGIN_BYTES);

        let shallow = Codec::with_config(
            Arc::clone(codec.registry()),
            CodecConfig::new().with_max_depth(2),
        );
        assert!(shallow.serialize_into(&chain(5), &mut out).is_err());
        assert_eq!(out.len(), 1 + ORIGIN_BYTES.len());
    }

    #[test]
    fn failures_leave_no_state_behind() {
        let codec = Codec::with_config(
            Arc::new(SchemaRegistry::new()),
            CodecConfig::new().with_max_depth(4),
        );

        assert!(codec.serialize(&chain(10)).is_err());
        assert_eq!(codec.serialize(&origin()).unwrap(), ORIGIN_BYTES);
    }

    #[test]
    fn concurrent_use_is_deterministic() {
        let codec = codec();
        let expected = codec.serialize(&shape()).unwrap();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .map(|_| codec.serialize(&shape()).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                for bytes in handle.join().unwrap() {
                    assert_eq!(bytes, expected);
                }
            }
        });

        assert!(codec.registry().is_cached(TypeId::of::<Shape>()));
    }

    #[test]
    fn dynamic_deserialization_uses_the_factory() {
        let codec = codec();
        codec.registry().register::<Shape>();

        let bytes = codec.serialize(&shape()).unwrap();
        let message = codec.deserialize_dyn(&bytes, TypeId::of::<Shape>()).unwrap();
        assert_eq!(message.downcast_ref::<Shape>(), Some(&shape()));

        // Dependencies were registered along the way.
        let point = codec
            .deserialize_by_path(&ORIGIN_BYTES, core::any::type_name::<Point>())
            .unwrap();
        assert_eq!(point.take::<Point>().unwrap(), origin());

        let err = codec
            .deserialize_dyn(&bytes, TypeId::of::<Sparse>())
            .unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::Instantiation(InstantiationError::UnknownType(_))
        ));

        let err = codec
            .deserialize_dyn(&[], TypeId::of::<Shape>())
            .unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::Decoding(DecodingError::Empty { .. })
        ));
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn global_codec_finds_auto_registered_types() {
        let global = Codec::global();
        if !global.registry().auto_register() {
            // Link-time collection is unavailable on this target.
            return;
        }

        let bytes = crate::serialize(&Heartbeat { seq: 9 }).unwrap();
        let message = global
            .deserialize_by_path(&bytes, core::any::type_name::<Heartbeat>())
            .unwrap();
        assert_eq!(message.downcast_ref::<Heartbeat>(), Some(&Heartbeat { seq: 9 }));
        assert_eq!(crate::deserialize::<Heartbeat>(&bytes).unwrap().seq, 9);
    }
}
