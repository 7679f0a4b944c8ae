use core::any::TypeId;

use tw_utils::hash::HashMap;

use crate::SchemaError;
use crate::info::MessageType;
use crate::schema::validate::check_kind;
use crate::schema::{FieldDescriptor, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER};

// -----------------------------------------------------------------------------
// FieldSchema

/// The serializable field layout of one message type.
///
/// Descriptors are ordered by ascending field number, which is also the order
/// fields are written in.
///
/// # Examples
///
/// ```
/// use tw_schema::{Schema, ValueKind, WireKind, derive::Schema, schema::FieldSchema};
///
/// #[derive(Schema)]
/// struct Login {
///     user: String,
///     #[schema(skip)]
///     cached: u64,
///     attempts: Option<u32>,
/// }
///
/// let schema = FieldSchema::derive(&Login::message_type()).unwrap();
///
/// let user = schema.field(1).unwrap();
/// assert_eq!(user.name(), "user");
/// assert_eq!(user.wire_kind(), WireKind::LengthDelimited);
///
/// let attempts = schema.field(2).unwrap();
/// assert_eq!(attempts.kind(), &ValueKind::Optional(Box::new(ValueKind::U32)));
/// assert_eq!(attempts.index(), 1);
///
/// assert_eq!(schema.field_len(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSchema {
    #[cfg_attr(feature = "serde", serde(skip))]
    type_id: TypeId,
    type_path: &'static str,
    fields: Box<[FieldDescriptor]>,
    #[cfg_attr(feature = "serde", serde(skip))]
    by_number: HashMap<u32, usize>,
}

impl FieldSchema {
    /// Derives the layout of a message type.
    ///
    /// Untagged fields are numbered from 1 in declaration order. Tagged
    /// fields keep their tag, and a type must tag all fields or none.
    pub fn derive(message: &MessageType) -> Result<Self, SchemaError> {
        let type_path = message.type_path();
        let infos = message.fields();

        let tagged = infos.iter().filter(|info| info.tag().is_some()).count();
        if tagged != 0 && tagged != infos.len() {
            return Err(SchemaError::MixedTagging { type_path });
        }

        let mut fields = Vec::with_capacity(infos.len());
        for (index, info) in infos.iter().enumerate() {
            let number = match info.tag() {
                Some(tag) => tag,
                None => u32::try_from(index + 1).unwrap_or(u32::MAX),
            };
            if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number) {
                return Err(SchemaError::InvalidFieldNumber {
                    type_path,
                    field: info.name(),
                    number,
                });
            }

            let kind = info.kind();
            let wire_kind = check_kind(&kind).map_err(|reason| SchemaError::UnsupportedField {
                type_path,
                field: info.name(),
                kind: kind.to_string(),
                reason,
            })?;

            fields.push(FieldDescriptor::new(
                number,
                index,
                info.name(),
                kind,
                wire_kind,
            ));
        }

        fields.sort_by_key(FieldDescriptor::number);

        if let Some(pair) = fields.windows(2).find(|w| w[0].number() == w[1].number()) {
            let (first, second) = if pair[0].index() < pair[1].index() {
                (pair[0].name(), pair[1].name())
            } else {
                (pair[1].name(), pair[0].name())
            };
            return Err(SchemaError::DuplicateFieldNumber {
                type_path,
                first,
                second,
                number: pair[0].number(),
            });
        }

        let by_number = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.number(), position))
            .collect();

        Ok(Self {
            type_id: message.type_id(),
            type_path,
            fields: fields.into_boxed_slice(),
            by_number,
        })
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Looks up a field by its number.
    #[inline]
    pub fn field(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&at| &self.fields[at])
    }

    /// Looks up a field by its name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Iterates over the fields in ascending field number order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Whether every encoding of this type has at least one byte.
    ///
    /// True when some field is neither a list, a map nor an option.
    pub fn requires_payload(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_always_written)
    }
}

impl<'a> IntoIterator for &'a FieldSchema {
    type Item = &'a FieldDescriptor;
    type IntoIter = core::slice::Iter<'a, FieldDescriptor>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl PartialEq for FieldSchema {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.fields == other.fields
    }
}

impl Eq for FieldSchema {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FieldSchema;
    use crate::info::{FieldInfo, MessageType};
    use crate::{Schema, SchemaError, ValueKind, WireKind, derive::Schema};

    #[derive(Schema)]
    struct Point {
        x: i32,
        y: i32,
        label: String,
    }

    #[derive(Schema)]
    struct Tagged {
        #[schema(tag = 10)]
        late: u64,
        #[schema(tag = 2)]
        early: bool,
    }

    #[derive(Schema)]
    struct Mixed {
        #[schema(tag = 5)]
        a: u8,
        b: u8,
    }

    #[derive(Schema)]
    struct Duplicate {
        #[schema(tag = 3)]
        a: u8,
        #[schema(tag = 3)]
        b: u8,
    }

    #[derive(Schema)]
    struct TooLarge {
        #[schema(tag = 536_870_912)]
        a: u8,
    }

    #[derive(Schema)]
    struct Nested {
        grid: Vec<Vec<u8>>,
    }

    #[derive(Schema)]
    struct OnlyOptional {
        a: Option<u8>,
        b: Vec<String>,
    }

    #[test]
    fn numbers_follow_declaration_order() {
        let schema = FieldSchema::derive(&Point::message_type()).unwrap();
        let layout: Vec<_> = schema
            .iter()
            .map(|f| (f.number(), f.name(), f.kind().clone(), f.wire_kind()))
            .collect();

        assert_eq!(
            layout,
            [
                (1, "x", ValueKind::I32, WireKind::Fixed32),
                (2, "y", ValueKind::I32, WireKind::Fixed32),
                (3, "label", ValueKind::Text, WireKind::LengthDelimited),
            ]
        );
        assert!(schema.requires_payload());
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = FieldSchema::derive(&Point::message_type()).unwrap();
        let second = FieldSchema::derive(&Point::message_type()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn explicit_tags_sort_ascending() {
        let schema = FieldSchema::derive(&Tagged::message_type()).unwrap();
        let numbers: Vec<_> = schema.iter().map(|f| (f.number(), f.index())).collect();
        assert_eq!(numbers, [(2, 1), (10, 0)]);
        assert_eq!(schema.field(10).unwrap().name(), "late");
        assert!(schema.field(1).is_none());
        assert_eq!(schema.field_by_name("early").unwrap().number(), 2);
        assert!(schema.field_by_name("missing").is_none());
    }

    #[test]
    fn mixed_tagging_is_rejected() {
        let err = FieldSchema::derive(&Mixed::message_type()).unwrap_err();
        assert!(matches!(err, SchemaError::MixedTagging { .. }));
    }

    #[test]
    fn duplicate_numbers_are_rejected() {
        let err = FieldSchema::derive(&Duplicate::message_type()).unwrap_err();
        match err {
            SchemaError::DuplicateFieldNumber {
                first,
                second,
                number,
                ..
            } => {
                assert_eq!((first, second, number), ("a", "b", 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let err = FieldSchema::derive(&TooLarge::message_type()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidFieldNumber {
                number: 536_870_912,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_kinds_name_the_field() {
        let err = FieldSchema::derive(&Nested::message_type()).unwrap_err();
        match err {
            SchemaError::UnsupportedField { field, kind, .. } => {
                assert_eq!(field, "grid");
                assert_eq!(kind, "list<list<u8>>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn absent_only_layouts_need_no_payload() {
        let schema = FieldSchema::derive(&OnlyOptional::message_type()).unwrap();
        assert!(!schema.requires_payload());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn schemas_dump_as_json() {
        let schema = FieldSchema::derive(&Point::message_type()).unwrap();
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(json["fields"][2]["name"], "label");
        assert_eq!(json["fields"][2]["number"], 3);
        assert_eq!(json["fields"][0]["wire_kind"], "Fixed32");
        assert!(json.get("by_number").is_none());
    }

    #[test]
    fn hand_written_fields_are_validated() {
        fn fields() -> Vec<FieldInfo> {
            vec![FieldInfo::new::<u8>("a").with_tag(0)]
        }
        let ty = MessageType::encode_only::<Point>(fields);
        let err = FieldSchema::derive(&ty).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldNumber { number: 0, .. }));
    }
}
