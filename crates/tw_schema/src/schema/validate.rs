use crate::{ValueKind, WireKind};

/// Checks that a field kind can be encoded and returns its wire kind.
///
/// On rejection returns the reason, which ends up in
/// [`SchemaError::UnsupportedField`](crate::SchemaError::UnsupportedField).
pub(crate) fn check_kind(kind: &ValueKind) -> Result<WireKind, &'static str> {
    use ValueKind::{List, Map, Opaque, Optional};

    match kind {
        Opaque(_) => Err("opaque values have no wire representation"),
        List(item) => match **item {
            List(_) | Map(..) => Err("a list cannot directly contain a list or a map"),
            Optional(_) => Err("list elements cannot be optional"),
            _ => check_kind(item),
        },
        Optional(inner) => match **inner {
            List(_) | Map(..) | Optional(_) => {
                Err("an option may only wrap a single value or message")
            }
            _ => check_kind(inner),
        },
        Map(key, value) => {
            if !key.is_plain() {
                return Err("map keys must be scalars, text, bytes or enums");
            }
            if matches!(**value, Optional(_)) {
                return Err("map values cannot be optional");
            }
            check_kind(key)?;
            check_kind(value)?;
            Ok(WireKind::LengthDelimited)
        }
        _ => kind
            .wire_kind()
            .ok_or("value has no wire representation"),
    }
}

#[cfg(test)]
mod tests {
    use super::check_kind;
    use crate::{ValueKind, WireKind};

    fn list(kind: ValueKind) -> ValueKind {
        ValueKind::List(Box::new(kind))
    }

    fn opt(kind: ValueKind) -> ValueKind {
        ValueKind::Optional(Box::new(kind))
    }

    fn map(key: ValueKind, value: ValueKind) -> ValueKind {
        ValueKind::Map(Box::new(key), Box::new(value))
    }

    #[test]
    fn accepts_supported_shapes() {
        assert_eq!(check_kind(&ValueKind::I32), Ok(WireKind::Fixed32));
        assert_eq!(check_kind(&list(ValueKind::Text)), Ok(WireKind::LengthDelimited));
        assert_eq!(check_kind(&opt(ValueKind::Message("a::B"))), Ok(WireKind::LengthDelimited));
        assert_eq!(check_kind(&opt(ValueKind::U64)), Ok(WireKind::Fixed64));
        assert_eq!(
            check_kind(&map(ValueKind::Enum("a::E"), list(ValueKind::Bool))),
            Ok(WireKind::LengthDelimited),
        );
    }

    #[test]
    fn rejects_nested_containers() {
        assert!(check_kind(&list(list(ValueKind::U8))).is_err());
        assert!(check_kind(&list(map(ValueKind::U8, ValueKind::U8))).is_err());
        assert!(check_kind(&list(opt(ValueKind::U8))).is_err());
        assert!(check_kind(&opt(opt(ValueKind::U8))).is_err());
        assert!(check_kind(&opt(list(ValueKind::U8))).is_err());
    }

    #[test]
    fn rejects_bad_map_parts() {
        assert!(check_kind(&map(ValueKind::Message("a::B"), ValueKind::U8)).is_err());
        assert!(check_kind(&map(list(ValueKind::U8), ValueKind::U8)).is_err());
        assert!(check_kind(&map(ValueKind::Text, opt(ValueKind::U8))).is_err());
        assert!(check_kind(&map(ValueKind::Text, ValueKind::Opaque("fd"))).is_err());
    }

    #[test]
    fn rejects_opaque_anywhere() {
        assert!(check_kind(&ValueKind::Opaque("fd")).is_err());
        assert!(check_kind(&list(ValueKind::Opaque("fd"))).is_err());
        assert!(check_kind(&opt(ValueKind::Opaque("fd"))).is_err());
    }
}
