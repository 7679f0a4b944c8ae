use crate::ops::Optional;
use crate::registry::SchemaRegistry;
use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

impl<T: Typed + Blank> Value for Option<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Optional(self.as_ref().map(|value| value as &dyn Value))
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Optional(self)
    }

    crate::impls::impl_value_casts!();
}

impl<T: Typed + Blank> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Value> {
        self.as_ref().map(|value| value as &dyn Value)
    }

    #[inline]
    fn get_or_insert_blank(&mut self) -> &mut dyn Value {
        self.get_or_insert_with(T::blank)
    }

    #[inline]
    fn clear(&mut self) {
        *self = None;
    }
}

impl<T: Typed + Blank> Typed for Option<T> {
    #[inline]
    fn kind() -> ValueKind {
        ValueKind::Optional(Box::new(T::kind()))
    }

    #[inline]
    fn register_into(registry: &SchemaRegistry) {
        T::register_into(registry);
    }
}

impl<T> Blank for Option<T> {
    #[inline]
    fn blank() -> Self {
        None
    }
}
