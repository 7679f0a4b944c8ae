use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident, $blank:expr;)*) => {$(
        impl Value for $ty {
            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::$variant(*self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::$variant(self)
            }

            crate::impls::impl_value_casts!();
        }

        impl Typed for $ty {
            #[inline]
            fn kind() -> ValueKind {
                ValueKind::$variant
            }
        }

        impl Blank for $ty {
            #[inline]
            fn blank() -> Self {
                $blank
            }
        }
    )*};
}

impl_scalar! {
    bool => Bool, false;
    i8 => I8, 0;
    i16 => I16, 0;
    i32 => I32, 0;
    i64 => I64, 0;
    u8 => U8, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    char => Char, '\0';
}

#[cfg(test)]
mod tests {
    use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

    #[test]
    fn views_read_and_write() {
        let mut value = 5_i16;
        assert!(matches!(value.value_ref(), ValueRef::I16(5)));

        if let ValueMut::I16(slot) = value.value_mut() {
            *slot = -3;
        }
        assert_eq!(value, -3);
    }

    #[test]
    fn blanks_are_zero() {
        assert!(!bool::blank());
        assert_eq!(char::blank(), '\0');
        assert_eq!(f64::blank().to_bits(), 0);
        assert_eq!(char::kind(), ValueKind::Char);
    }
}
