use crate::registry::SchemaRegistry;
use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

// `Box<T>` is invisible on the wire: it exists so messages can nest themselves.

impl<T: Value> Value for Box<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        (**self).value_mut()
    }

    crate::impls::impl_value_casts!();
}

impl<T: Typed> Typed for Box<T> {
    #[inline]
    fn kind() -> ValueKind {
        T::kind()
    }

    #[inline]
    fn register_into(registry: &SchemaRegistry) {
        T::register_into(registry);
    }
}

impl<T: Blank> Blank for Box<T> {
    #[inline]
    fn blank() -> Self {
        Box::new(T::blank())
    }
}
