use crate::ops::List;
use crate::registry::SchemaRegistry;
use crate::{Blank, Typed, Value, ValueKind, ValueMut, ValueRef};

impl<T: Typed + Blank> Value for Vec<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::List(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::List(self)
    }

    crate::impls::impl_value_casts!();
}

impl<T: Typed + Blank> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        <[T]>::get(self, index).map(|value| value as &dyn Value)
    }

    fn push_blank(&mut self) -> &mut dyn Value {
        let index = Vec::len(self);
        self.push(T::blank());
        &mut self[index]
    }
}

impl<T: Typed + Blank> Typed for Vec<T> {
    #[inline]
    fn kind() -> ValueKind {
        ValueKind::List(Box::new(T::kind()))
    }

    #[inline]
    fn register_into(registry: &SchemaRegistry) {
        T::register_into(registry);
    }
}

impl<T> Blank for Vec<T> {
    #[inline]
    fn blank() -> Self {
        Vec::new()
    }
}
