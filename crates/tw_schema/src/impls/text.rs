use crate::{Blank, Bytes, Typed, Value, ValueKind, ValueMut, ValueRef};

impl Value for String {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Text(self)
    }

    crate::impls::impl_value_casts!();
}

impl Typed for String {
    #[inline]
    fn kind() -> ValueKind {
        ValueKind::Text
    }
}

impl Blank for String {
    #[inline]
    fn blank() -> Self {
        String::new()
    }
}

impl Value for Bytes {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Bytes(&self.0)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Bytes(&mut self.0)
    }

    crate::impls::impl_value_casts!();
}

impl Typed for Bytes {
    #[inline]
    fn kind() -> ValueKind {
        ValueKind::Bytes
    }
}

impl Blank for Bytes {
    #[inline]
    fn blank() -> Self {
        Bytes::new()
    }
}
